use thiserror::Error;

use crate::{QuizKind, Screen};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board has fewer than two cells")]
    BoardTooShort,
    #[error("Cell at position {position} declares index {index}")]
    NonContiguousIndex { position: usize, index: usize },
    #[error("Last cell must be the goal")]
    GoalNotLast,
    #[error("Goal cell at {index} is not the last cell")]
    StrayGoal { index: usize },
    #[error("Quiz cell at {index} does not name a quiz")]
    QuizWithoutKind { index: usize },
    #[error("Stop cell at {index} does not name a route")]
    StopWithoutRoute { index: usize },
    #[error("Quiz landing {position} for {kind:?} is outside the board")]
    LandingOutOfBounds { kind: QuizKind, position: usize },
    #[error("Expected the {expected:?} screen, currently on {actual:?}")]
    WrongScreen { expected: Screen, actual: Screen },
    #[error("Malformed board data at line {line}, column {column}")]
    MalformedData { line: usize, column: usize },
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedData {
            line: err.line(),
            column: err.column(),
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
