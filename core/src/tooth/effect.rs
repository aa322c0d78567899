use alloc::vec::Vec;
use rand::Rng;

use super::*;
use crate::{DieValue, Event, ToothChange};

/// Symbolic tooth effect attached to board cells and quiz branches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothEffect {
    LosePrimaryTooth,
    AccidentalLoss,
    LoseRolledTeeth,
    StainTeeth,
    DamageTooth,
    RepairDamaged,
    Whiten,
    AddProsthetics,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EffectCount {
    Fixed(usize),
    /// Rolled uniformly from `1..=max_die` when the effect is applied.
    Rolled,
}

/// Concrete chart mutation behind a [`ToothEffect`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EffectPlan {
    Lose {
        count: EffectCount,
        permanent: bool,
        kinds: Option<&'static [ToothKind]>,
        policy: SelectionPolicy,
    },
    Recolor {
        kinds: Option<&'static [ToothKind]>,
        from: &'static [ToothStatus],
        target: ToothStatus,
        selection: Selection,
    },
    FitProsthetics {
        count: usize,
    },
}

impl ToothEffect {
    pub const ALL: [ToothEffect; 8] = [
        Self::LosePrimaryTooth,
        Self::AccidentalLoss,
        Self::LoseRolledTeeth,
        Self::StainTeeth,
        Self::DamageTooth,
        Self::RepairDamaged,
        Self::Whiten,
        Self::AddProsthetics,
    ];

    pub const fn plan(self, stage: Stage) -> EffectPlan {
        use EffectPlan::*;
        use ToothStatus::*;

        match (self, stage) {
            (Self::LosePrimaryTooth, Stage::Child) => Lose {
                count: EffectCount::Fixed(1),
                permanent: false,
                kinds: None,
                policy: SelectionPolicy::Priority,
            },
            (Self::LosePrimaryTooth, Stage::Adult) => Lose {
                count: EffectCount::Fixed(1),
                permanent: false,
                kinds: Some(FRONT_KINDS),
                policy: SelectionPolicy::Random,
            },
            (Self::AccidentalLoss, _) => Lose {
                count: EffectCount::Fixed(1),
                permanent: true,
                kinds: None,
                policy: SelectionPolicy::Random,
            },
            (Self::LoseRolledTeeth, _) => Lose {
                count: EffectCount::Rolled,
                permanent: true,
                kinds: None,
                policy: SelectionPolicy::Random,
            },
            (Self::StainTeeth, _) => Recolor {
                kinds: Some(BACK_KINDS),
                from: &[Healthy],
                target: Stained,
                selection: Selection::Random(4),
            },
            (Self::DamageTooth, _) => Recolor {
                kinds: Some(DAMAGEABLE_KINDS),
                from: &[Healthy, Stained],
                target: Damaged,
                selection: Selection::Random(1),
            },
            (Self::RepairDamaged, _) => Recolor {
                kinds: None,
                from: &[Damaged],
                target: Healthy,
                selection: Selection::All,
            },
            (Self::Whiten, _) => Recolor {
                kinds: None,
                from: &[Stained, Damaged],
                target: Healthy,
                selection: Selection::All,
            },
            (Self::AddProsthetics, _) => FitProsthetics { count: 2 },
        }
    }
}

/// Teeth touched by one applied effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub effect: ToothEffect,
    pub change: ToothChange,
    pub teeth: Vec<ToothId>,
}

impl EffectReport {
    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }

    pub fn into_event(self) -> Event {
        if self.teeth.is_empty() {
            Event::NoEligibleTeeth {
                effect: self.effect,
            }
        } else {
            Event::Teeth {
                change: self.change,
                teeth: self.teeth,
            }
        }
    }
}

impl ToothChart {
    /// Resolves `effect` against the current stage and applies it. An effect
    /// with no eligible teeth leaves the chart untouched.
    pub fn apply_effect<R: Rng + ?Sized>(
        &mut self,
        effect: ToothEffect,
        max_die: DieValue,
        rng: &mut R,
    ) -> EffectReport {
        let (change, teeth) = match effect.plan(self.stage()) {
            EffectPlan::Lose {
                count,
                permanent,
                kinds,
                policy,
            } => {
                let count = match count {
                    EffectCount::Fixed(count) => count,
                    EffectCount::Rolled => usize::from(rng.random_range(1..=max_die.max(1))),
                };
                (
                    ToothChange::Lost { permanent },
                    self.lose_teeth(count, permanent, kinds, policy, rng),
                )
            }
            EffectPlan::Recolor {
                kinds,
                from,
                target,
                selection,
            } => (
                ToothChange::for_status(target),
                self.mutate_status(kinds, from, target, selection, rng),
            ),
            EffectPlan::FitProsthetics { count } => {
                (ToothChange::Prosthetic, self.add_prosthetics(count))
            }
        };

        log::debug!(
            "Applied {effect:?} to {} teeth, {}/{} present",
            teeth.len(),
            self.present_count(),
            self.max_count()
        );
        EffectReport {
            effect,
            change,
            teeth,
        }
    }
}
