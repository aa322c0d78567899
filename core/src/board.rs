use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Normal,
    Event,
    Quiz,
    Stop,
    Goal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCell {
    pub index: Position,
    #[serde(default)]
    pub title: String,
    pub kind: CellKind,
    #[serde(default)]
    pub quiz: Option<QuizKind>,
    #[serde(default)]
    pub coin_delta: i32,
    #[serde(default)]
    pub step_delta: Option<i32>,
    #[serde(default)]
    pub forced_stop: bool,
    #[serde(default)]
    pub tooth_effect: Option<ToothEffect>,
    #[serde(default)]
    pub route: Option<Route>,
    /// Die values removed from the legal range while the pawn stands here.
    #[serde(default)]
    pub blocked_rolls: Vec<DieValue>,
}

impl BoardCell {
    pub fn new(index: Position, kind: CellKind) -> Self {
        Self {
            index,
            title: String::new(),
            kind,
            quiz: None,
            coin_delta: 0,
            step_delta: None,
            forced_stop: false,
            tooth_effect: None,
            route: None,
            blocked_rolls: Vec::new(),
        }
    }

    pub fn quiz(index: Position, kind: QuizKind) -> Self {
        Self {
            quiz: Some(kind),
            ..Self::new(index, CellKind::Quiz)
        }
    }

    /// Forced stop leading to the activity behind `route`.
    pub fn stop(index: Position, route: Route) -> Self {
        Self {
            forced_stop: true,
            route: Some(route),
            ..Self::new(index, CellKind::Stop)
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_coins(mut self, coin_delta: i32) -> Self {
        self.coin_delta = coin_delta;
        self
    }

    pub fn with_step(mut self, step_delta: i32) -> Self {
        self.step_delta = Some(step_delta);
        self
    }

    pub fn with_effect(mut self, effect: ToothEffect) -> Self {
        self.tooth_effect = Some(effect);
        self
    }

    pub fn with_blocked_rolls(mut self, blocked: &[DieValue]) -> Self {
        self.blocked_rolls = blocked.to_vec();
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Under5,
    FivePlus,
}

#[derive(Deserialize)]
struct BoardData {
    #[serde(default)]
    bracket: Option<AgeBracket>,
    cells: Vec<BoardCell>,
    #[serde(default)]
    quizzes: Option<QuizTable>,
    #[serde(default)]
    gateway_rewards: GatewayRewards,
}

/// Validated, immutable board. Index `N - 1` is the only goal cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    bracket: Option<AgeBracket>,
    cells: Vec<BoardCell>,
    quizzes: QuizTable,
    gateway_rewards: GatewayRewards,
}

impl Board {
    pub fn new(
        cells: Vec<BoardCell>,
        quizzes: QuizTable,
        gateway_rewards: GatewayRewards,
    ) -> Result<Self> {
        let board = Self {
            bracket: None,
            cells,
            quizzes,
            gateway_rewards,
        };
        board.validate()?;
        Ok(board)
    }

    /// Board with the default quiz table, its landings clamped to the board.
    pub fn from_cells(cells: Vec<BoardCell>) -> Result<Self> {
        let last = cells.len().saturating_sub(1);
        Self::new(
            cells,
            QuizTable::default().clamped_to(last),
            GatewayRewards::default(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: BoardData = serde_json::from_str(json)?;
        let last = data.cells.len().saturating_sub(1);
        let quizzes = match data.quizzes {
            Some(quizzes) => quizzes,
            None => QuizTable::default().clamped_to(last),
        };
        let mut board = Self::new(data.cells, quizzes, data.gateway_rewards)?;
        board.bracket = data.bracket;
        Ok(board)
    }

    /// One of the boards shipped with the crate.
    pub fn builtin(bracket: AgeBracket) -> Result<Self> {
        let json = match bracket {
            AgeBracket::Under5 => include_str!("../data/board_under5.json"),
            AgeBracket::FivePlus => include_str!("../data/board_five_plus.json"),
        };
        let mut board = Self::from_json(json)?;
        board.bracket = Some(bracket);
        Ok(board)
    }

    fn validate(&self) -> Result<()> {
        if self.cells.len() < 2 {
            return Err(GameError::BoardTooShort);
        }

        let last = self.last_index();
        for (position, cell) in self.cells.iter().enumerate() {
            if cell.index != position {
                return Err(GameError::NonContiguousIndex {
                    position,
                    index: cell.index,
                });
            }
            match cell.kind {
                CellKind::Goal if position != last => {
                    return Err(GameError::StrayGoal { index: position });
                }
                CellKind::Quiz if cell.quiz.is_none() => {
                    return Err(GameError::QuizWithoutKind { index: position });
                }
                CellKind::Stop if cell.route.is_none() => {
                    return Err(GameError::StopWithoutRoute { index: position });
                }
                _ => {}
            }
        }

        if self.cells[last].kind != CellKind::Goal {
            return Err(GameError::GoalNotLast);
        }

        for kind in [QuizKind::Caries, QuizKind::Gum] {
            let rule = self.quizzes.rule(kind);
            for position in [rule.high.position, rule.low.position] {
                if position > last {
                    return Err(GameError::LandingOutOfBounds { kind, position });
                }
            }
        }

        Ok(())
    }

    pub fn bracket(&self) -> Option<AgeBracket> {
        self.bracket
    }

    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Option<&BoardCell> {
        self.cells.get(position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn last_index(&self) -> Position {
        self.cells.len().saturating_sub(1)
    }

    pub fn quizzes(&self) -> &QuizTable {
        &self.quizzes
    }

    pub fn quiz_rule(&self, kind: QuizKind) -> &QuizRule {
        self.quizzes.rule(kind)
    }

    pub fn gateway_rewards(&self) -> &GatewayRewards {
        &self.gateway_rewards
    }

    /// Nearest forced-stop cell strictly after `position`.
    pub fn next_forced_stop(&self, position: Position) -> Option<Position> {
        self.cells
            .iter()
            .skip(position.saturating_add(1))
            .find(|cell| cell.forced_stop)
            .map(|cell| cell.index)
    }

    /// Screen the host shows once the pawn rests on `position`.
    pub fn screen_at(&self, position: Position) -> Screen {
        let position = position.min(self.last_index());
        let Some(cell) = self.cell(position) else {
            return Screen::Board;
        };
        match (cell.kind, cell.quiz, cell.route) {
            (CellKind::Quiz, Some(kind), _) => Screen::Quiz(kind),
            (CellKind::Stop, _, Some(route)) => Screen::Gateway(route),
            _ if position == self.last_index() => Screen::Goal,
            _ => Screen::Board,
        }
    }
}
