use alloc::vec::Vec;

use super::*;

/// Bumped whenever the chart layout changes; charts restored from an older
/// store are regenerated by [`ToothChart::ensure`].
pub const TOOTH_CHART_VERSION: u32 = 3;

/// Per-session dental chart: one entry per blueprint slot, in blueprint order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothChart {
    schema_version: u32,
    stage: Stage,
    teeth: Vec<Tooth>,
    present: u8,
    missing: u8,
    max: u8,
}

impl ToothChart {
    pub fn new(stage: Stage) -> Self {
        let mut chart = Self {
            schema_version: TOOTH_CHART_VERSION,
            stage,
            teeth: blueprints().map(|bp| bp.tooth_in(stage)).collect(),
            present: 0,
            missing: 0,
            max: 0,
        };
        chart.sync_counts();
        chart
    }

    /// Makes sure `slot` holds a usable chart: a missing chart is created in the
    /// child stage, an outdated one is regenerated at its own stage with every
    /// tooth healthy. Counts are recomputed either way.
    pub fn ensure(slot: &mut Option<ToothChart>) -> &mut ToothChart {
        let stage = slot.as_ref().map(|chart| chart.stage).unwrap_or_default();

        if slot.as_ref().is_some_and(|chart| !chart.is_current()) {
            log::warn!("Tooth chart layout is outdated, regenerating at {stage:?} stage");
            *slot = None;
        }

        let chart = slot.get_or_insert_with(|| Self::new(stage));
        chart.sync_counts();
        chart
    }

    fn is_current(&self) -> bool {
        self.schema_version == TOOTH_CHART_VERSION
            && self.teeth.len() == SLOT_COUNT
            && self
                .teeth
                .iter()
                .zip(blueprints())
                .all(|(tooth, bp)| tooth.id == bp.id)
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn teeth(&self) -> &[Tooth] {
        &self.teeth
    }

    pub fn tooth(&self, id: ToothId) -> Option<&Tooth> {
        self.teeth.iter().find(|tooth| tooth.id == id)
    }

    pub(crate) fn teeth_mut(&mut self) -> &mut [Tooth] {
        &mut self.teeth
    }

    pub fn present_count(&self) -> u8 {
        self.present
    }

    pub fn missing_count(&self) -> u8 {
        self.missing
    }

    pub fn max_count(&self) -> u8 {
        self.max
    }

    pub fn visible_count(&self) -> u8 {
        self.teeth.iter().filter(|tooth| tooth.visible).count() as u8
    }

    /// One-way transition to the adult set. Shared slots keep their status,
    /// except temporarily lost baby teeth which come back as healthy permanent
    /// teeth. Returns `false` without touching the chart when already adult.
    pub fn upgrade_stage(&mut self) -> bool {
        if self.stage == Stage::Adult {
            return false;
        }

        for (tooth, bp) in self.teeth.iter_mut().zip(blueprints()) {
            let mut next = bp.tooth_in(Stage::Adult);
            if next.visible && tooth.visible {
                next.status = match tooth.status {
                    ToothStatus::LostTemporary => ToothStatus::Healthy,
                    status => status,
                };
                next.permanent_loss = tooth.permanent_loss;
            }
            *tooth = next;
        }

        self.stage = Stage::Adult;
        self.sync_counts();
        log::debug!(
            "Tooth chart upgraded to adult stage, {}/{} present",
            self.present,
            self.max
        );
        true
    }

    /// Restores every visible slot to a healthy tooth. Returns how many slots
    /// changed.
    pub fn reset_to_healthy(&mut self) -> usize {
        let mut changed = 0;
        for tooth in self.teeth.iter_mut().filter(|tooth| tooth.visible) {
            if tooth.status != ToothStatus::Healthy || tooth.permanent_loss {
                tooth.status = ToothStatus::Healthy;
                tooth.permanent_loss = false;
                changed += 1;
            }
        }
        self.sync_counts();
        changed
    }

    pub(crate) fn sync_counts(&mut self) {
        let mut present = 0;
        let mut missing = 0;
        for tooth in self.teeth.iter().filter(|tooth| tooth.visible) {
            if tooth.status.is_lost() {
                missing += 1;
            } else {
                present += 1;
            }
        }
        self.present = present;
        self.missing = missing;
        self.max = self.stage.tooth_count();
    }
}

impl Default for ToothChart {
    fn default() -> Self {
        Self::new(Stage::Child)
    }
}
