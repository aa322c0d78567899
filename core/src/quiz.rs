use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// When a caries quiz moves the chart to the adult stage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageUpgrade {
    #[default]
    OnPass,
    Always,
    Never,
}

impl StageUpgrade {
    pub const fn applies(self, passed: bool) -> bool {
        match self {
            Self::OnPass => passed,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBranch {
    #[serde(default)]
    pub coins: i32,
    pub position: Position,
    #[serde(default)]
    pub tooth_effect: Option<ToothEffect>,
}

impl QuizBranch {
    pub const fn new(coins: i32, position: Position) -> Self {
        Self {
            coins,
            position,
            tooth_effect: None,
        }
    }

    pub const fn with_effect(mut self, effect: ToothEffect) -> Self {
        self.tooth_effect = Some(effect);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRule {
    #[serde(default = "QuizRule::default_threshold")]
    pub threshold: u32,
    pub high: QuizBranch,
    pub low: QuizBranch,
    #[serde(default)]
    pub stage_upgrade: StageUpgrade,
}

impl QuizRule {
    const fn default_threshold() -> u32 {
        1
    }

    pub const fn branch(&self, correct: u32) -> (bool, &QuizBranch) {
        if correct >= self.threshold {
            (true, &self.high)
        } else {
            (false, &self.low)
        }
    }

    fn clamped_to(mut self, last: Position) -> Self {
        self.high.position = self.high.position.min(last);
        self.low.position = self.low.position.min(last);
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizTable {
    pub caries: QuizRule,
    pub gum: QuizRule,
}

impl QuizTable {
    pub const fn rule(&self, kind: QuizKind) -> &QuizRule {
        match kind {
            QuizKind::Caries => &self.caries,
            QuizKind::Gum => &self.gum,
        }
    }

    pub(crate) fn clamped_to(self, last: Position) -> Self {
        Self {
            caries: self.caries.clamped_to(last),
            gum: self.gum.clamped_to(last),
        }
    }
}

impl Default for QuizTable {
    fn default() -> Self {
        Self {
            caries: QuizRule {
                threshold: 1,
                high: QuizBranch::new(5, 10),
                low: QuizBranch::new(-3, 7),
                stage_upgrade: StageUpgrade::OnPass,
            },
            gum: QuizRule {
                threshold: 1,
                high: QuizBranch::new(5, 10),
                low: QuizBranch::new(-3, 7),
                stage_upgrade: StageUpgrade::Never,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub kind: QuizKind,
    pub correct: u32,
    pub passed: bool,
    /// Configured delta of the chosen branch, before clamping.
    pub coin_delta: i32,
    pub balance: Coins,
    pub landing: Position,
    pub stage_upgraded: bool,
    pub events: Vec<Event>,
}

/// Routes a quiz result through the board's rule for `kind`: pays the branch
/// reward, applies its tooth effect and the stage upgrade policy. The landing
/// position is not applied to any pawn; see [`Pawn::place`].
pub fn resolve_quiz<R: Rng + ?Sized>(
    board: &Board,
    kind: QuizKind,
    correct: u32,
    chart: &mut ToothChart,
    ledger: &mut Ledger,
    config: &GameConfig,
    rng: &mut R,
) -> QuizOutcome {
    let rule = board.quiz_rule(kind);
    let (passed, branch) = rule.branch(correct);

    let mut events = Vec::new();
    events.push(if passed {
        Event::QuizPassed { kind, correct }
    } else {
        Event::QuizFailed { kind, correct }
    });
    events.extend(ledger.apply_with_event(branch.coins));

    let stage_upgraded = rule.stage_upgrade.applies(passed) && chart.upgrade_stage();
    if stage_upgraded {
        events.push(Event::StageUpgraded);
    }

    if let Some(effect) = branch.tooth_effect {
        events.push(chart.apply_effect(effect, config.max_die, rng).into_event());
    }

    let landing = branch.position.min(board.last_index());
    log::debug!(
        "{kind:?} quiz with {correct} correct: passed={passed}, landing {landing}, balance {}",
        ledger.coins()
    );

    QuizOutcome {
        kind,
        correct,
        passed,
        coin_delta: branch.coins,
        balance: ledger.coins(),
        landing,
        stage_upgraded,
        events,
    }
}
