use serde::{Deserialize, Serialize};

/// 0-based index of a cell on the board.
pub type Position = usize;

/// Value shown by the die, always at least 1.
pub type DieValue = u8;

/// Tooth-coin balance.
pub type Coins = u32;

/// Number of resolved rolls in a session.
pub type Turn = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizKind {
    Caries,
    Gum,
}

/// Activity behind a `stop` cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    CariesQuiz,
    GumQuiz,
    JobExperience,
}

impl Route {
    pub const fn quiz(self) -> Option<QuizKind> {
        match self {
            Self::CariesQuiz => Some(QuizKind::Caries),
            Self::GumQuiz => Some(QuizKind::Gum),
            Self::JobExperience => None,
        }
    }
}

/// Routing directive handed back to the host after every engine call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Board,
    Quiz(QuizKind),
    Gateway(Route),
    Goal,
}

impl Screen {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Goal)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::Board
    }
}

/// Styling hint for host-side messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Info,
    Warning,
    Error,
}

/// Applies a signed offset to `position`, clamping the result to `0..=last`.
pub fn offset_position(position: Position, delta: i32, last: Position) -> Position {
    let delta = delta as isize;
    let position = position.min(last) as isize;
    position.saturating_add(delta).clamp(0, last as isize) as Position
}
