use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothChange {
    Lost { permanent: bool },
    Stained,
    Damaged,
    Restored,
    Prosthetic,
}

impl ToothChange {
    pub const fn for_status(status: ToothStatus) -> Self {
        match status {
            ToothStatus::Stained => Self::Stained,
            ToothStatus::Damaged => Self::Damaged,
            ToothStatus::LostTemporary => Self::Lost { permanent: false },
            ToothStatus::LostPermanent => Self::Lost { permanent: true },
            ToothStatus::Prosthetic => Self::Prosthetic,
            ToothStatus::Healthy | ToothStatus::Hidden => Self::Restored,
        }
    }
}

/// Something the host should tell the player about. The `Display` rendering is
/// a plain fallback; kiosk copy lives with the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    CoinsGained { amount: Coins, balance: Coins },
    CoinsLost { amount: Coins, balance: Coins },
    Teeth {
        change: ToothChange,
        teeth: Vec<ToothId>,
    },
    NoEligibleTeeth { effect: ToothEffect },
    StageUpgraded,
    Redirected { from: Position, to: Position },
    RedirectSkipped { at: Position },
    RedirectLimitReached { at: Position },
    QuizPassed { kind: QuizKind, correct: u32 },
    QuizFailed { kind: QuizKind, correct: u32 },
    ActivityCompleted { route: Route },
    NoMoveAvailable,
}

impl Event {
    pub fn tone(&self) -> Tone {
        use Event::*;
        match self {
            CoinsGained { .. } | StageUpgraded | QuizPassed { .. } | ActivityCompleted { .. } => {
                Tone::Success
            }
            Teeth { change, .. } => match change {
                ToothChange::Lost { permanent: true } => Tone::Error,
                ToothChange::Lost { permanent: false }
                | ToothChange::Restored
                | ToothChange::Prosthetic => Tone::Info,
                ToothChange::Stained | ToothChange::Damaged => Tone::Warning,
            },
            CoinsLost { .. } | QuizFailed { .. } => Tone::Warning,
            Redirected { from, to } if to < from => Tone::Warning,
            Redirected { .. }
            | RedirectSkipped { .. }
            | RedirectLimitReached { .. }
            | NoEligibleTeeth { .. }
            | NoMoveAvailable => Tone::Info,
        }
    }
}

struct ToothList<'a>(&'a [ToothId]);

impl fmt::Display for ToothList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Event::*;
        match self {
            CoinsGained { amount, balance } => {
                write!(f, "Gained {amount} tooth coins (total: {balance})")
            }
            CoinsLost { amount, balance } => {
                write!(f, "Lost {amount} tooth coins (left: {balance})")
            }
            Teeth { change, teeth } => {
                let teeth = ToothList(teeth);
                match change {
                    ToothChange::Lost { permanent: true } => write!(f, "Lost for good: {teeth}"),
                    ToothChange::Lost { permanent: false } => write!(f, "Wobbled out: {teeth}"),
                    ToothChange::Stained => write!(f, "Stained: {teeth}"),
                    ToothChange::Damaged => write!(f, "Damaged: {teeth}"),
                    ToothChange::Restored => write!(f, "Back to healthy: {teeth}"),
                    ToothChange::Prosthetic => write!(f, "Prosthetics fitted: {teeth}"),
                }
            }
            NoEligibleTeeth { effect } => write!(f, "No teeth affected by {effect:?}"),
            StageUpgraded => f.write_str("All baby teeth replaced by adult teeth"),
            Redirected { from, to } if to < from => {
                write!(f, "Moved back {} cells to cell {}", from - to, to + 1)
            }
            Redirected { from, to } => {
                write!(f, "Moved ahead {} cells to cell {}", to - from, to + 1)
            }
            RedirectSkipped { at } => write!(f, "Cell {} does not send you back this time", at + 1),
            RedirectLimitReached { at } => write!(f, "Stopped at cell {}", at + 1),
            QuizPassed { kind, correct } => write!(f, "{kind:?} quiz passed with {correct} correct"),
            QuizFailed { kind, correct } => write!(f, "{kind:?} quiz failed with {correct} correct"),
            ActivityCompleted { route } => write!(f, "Finished {route:?}"),
            NoMoveAvailable => f.write_str("No cells available to advance"),
        }
    }
}
