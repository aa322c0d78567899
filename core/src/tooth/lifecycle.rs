use alloc::vec::Vec;
use rand::Rng;
use rand::seq::index;

use super::*;

/// How teeth are picked when more are eligible than requested.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Follow [`NATURAL_LOSS_ORDER`], the way baby teeth fall out.
    Priority,
    /// Uniform sampling without replacement, for accidents and decay.
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    All,
    Random(usize),
}

impl ToothChart {
    /// Marks up to `count` eligible teeth as lost. Eligible teeth are visible,
    /// still in the mouth and not prosthetic. Returns the affected ids, which
    /// may be fewer than `count`.
    pub fn lose_teeth<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        permanent: bool,
        kinds: Option<&[ToothKind]>,
        policy: SelectionPolicy,
        rng: &mut R,
    ) -> Vec<ToothId> {
        let mut candidates = self.candidates(kinds, |status| !status.is_settled());
        let chosen = match policy {
            SelectionPolicy::Priority => {
                candidates.sort_by_key(|&slot| natural_loss_rank(self.teeth()[slot].id));
                candidates.truncate(count);
                candidates
            }
            SelectionPolicy::Random => sample_slots(rng, &candidates, count),
        };
        self.mark_lost(&chosen, permanent)
    }

    /// Marks the given teeth as lost, skipping ids that are unknown, hidden,
    /// already lost or prosthetic. Repeated ids are lost once.
    pub fn lose_specific(&mut self, ids: &[ToothId], permanent: bool) -> Vec<ToothId> {
        let mut chosen: Vec<usize> = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(slot) = self.teeth().iter().position(|tooth| tooth.id == id) else {
                continue;
            };
            let tooth = &self.teeth()[slot];
            if tooth.visible && !tooth.status.is_settled() && !chosen.contains(&slot) {
                chosen.push(slot);
            }
        }
        self.mark_lost(&chosen, permanent)
    }

    /// Moves teeth whose status is in `from` (and kind in `kinds`, when given)
    /// to `target`. Lost, hidden and prosthetic teeth are never touched, and
    /// those statuses are not valid targets: use [`ToothChart::lose_teeth`] or
    /// [`ToothChart::add_prosthetics`] for them.
    pub fn mutate_status<R: Rng + ?Sized>(
        &mut self,
        kinds: Option<&[ToothKind]>,
        from: &[ToothStatus],
        target: ToothStatus,
        selection: Selection,
        rng: &mut R,
    ) -> Vec<ToothId> {
        if target.is_settled() {
            log::warn!("Refusing status mutation to {target:?}");
            return Vec::new();
        }

        let candidates =
            self.candidates(kinds, |status| !status.is_settled() && from.contains(&status));
        let chosen = match selection {
            Selection::All => candidates,
            Selection::Random(count) => sample_slots(rng, &candidates, count),
        };
        self.set_status(&chosen, target)
    }

    pub fn stain_teeth<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<ToothId> {
        self.mutate_status(
            Some(BACK_KINDS),
            &[ToothStatus::Healthy],
            ToothStatus::Stained,
            Selection::Random(count),
            rng,
        )
    }

    pub fn damage_tooth<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ToothId> {
        self.mutate_status(
            Some(DAMAGEABLE_KINDS),
            &[ToothStatus::Healthy, ToothStatus::Stained],
            ToothStatus::Damaged,
            Selection::Random(1),
            rng,
        )
        .first()
        .copied()
    }

    pub fn repair_damaged(&mut self) -> Vec<ToothId> {
        self.restore(&[ToothStatus::Damaged])
    }

    pub fn whiten(&mut self) -> Vec<ToothId> {
        self.restore(&[ToothStatus::Stained, ToothStatus::Damaged])
    }

    /// Fits prosthetics on up to `count` permanently lost teeth, in chart
    /// order. Prosthetics count as present and are never mutated again.
    pub fn add_prosthetics(&mut self, count: usize) -> Vec<ToothId> {
        let mut fitted = Vec::new();
        for tooth in self
            .teeth_mut()
            .iter_mut()
            .filter(|tooth| tooth.visible && tooth.status == ToothStatus::LostPermanent)
            .take(count)
        {
            tooth.status = ToothStatus::Prosthetic;
            tooth.permanent_loss = true;
            fitted.push(tooth.id);
        }
        self.sync_counts();
        fitted
    }

    fn restore(&mut self, from: &[ToothStatus]) -> Vec<ToothId> {
        let candidates = self.candidates(None, |status| from.contains(&status));
        self.set_status(&candidates, ToothStatus::Healthy)
    }

    fn candidates(
        &self,
        kinds: Option<&[ToothKind]>,
        accept: impl Fn(ToothStatus) -> bool,
    ) -> Vec<usize> {
        self.teeth()
            .iter()
            .enumerate()
            .filter(|(_, tooth)| {
                tooth.visible
                    && kinds.is_none_or(|kinds| kinds.contains(&tooth.kind))
                    && accept(tooth.status)
            })
            .map(|(slot, _)| slot)
            .collect()
    }

    fn set_status(&mut self, slots: &[usize], target: ToothStatus) -> Vec<ToothId> {
        let teeth = self.teeth_mut();
        let ids = slots
            .iter()
            .map(|&slot| {
                let tooth = &mut teeth[slot];
                tooth.status = target;
                if target == ToothStatus::Healthy {
                    tooth.permanent_loss = false;
                }
                tooth.id
            })
            .collect();
        self.sync_counts();
        ids
    }

    fn mark_lost(&mut self, slots: &[usize], permanent: bool) -> Vec<ToothId> {
        let status = if permanent {
            ToothStatus::LostPermanent
        } else {
            ToothStatus::LostTemporary
        };
        let teeth = self.teeth_mut();
        let ids = slots
            .iter()
            .map(|&slot| {
                let tooth = &mut teeth[slot];
                tooth.status = status;
                tooth.permanent_loss = permanent;
                tooth.id
            })
            .collect();
        self.sync_counts();
        ids
    }
}

/// Samples up to `count` entries of `candidates` without replacement, returned
/// in chart order.
fn sample_slots<R: Rng + ?Sized>(rng: &mut R, candidates: &[usize], count: usize) -> Vec<usize> {
    let amount = count.min(candidates.len());
    let mut picked: Vec<usize> = index::sample(rng, candidates.len(), amount)
        .into_iter()
        .map(|pick| candidates[pick])
        .collect();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn id(quadrant: Quadrant, number: u8) -> ToothId {
        ToothId::new(quadrant, number)
    }

    fn status_of(chart: &ToothChart, id: ToothId) -> ToothStatus {
        chart.tooth(id).unwrap().status
    }

    fn assert_counts_consistent(chart: &ToothChart) {
        assert_eq!(
            chart.present_count() + chart.missing_count(),
            chart.visible_count()
        );
    }

    #[test]
    fn natural_loss_takes_a_central_incisor_first() {
        let mut chart = ToothChart::new(Stage::Child);

        let lost = chart.lose_teeth(1, false, None, SelectionPolicy::Priority, &mut rng());

        assert_eq!(lost, [id(Quadrant::UpperLeft, 1)]);
        let tooth = chart.tooth(lost[0]).unwrap();
        assert_eq!(tooth.kind, ToothKind::PrimaryCentralIncisor);
        assert_eq!(tooth.status, ToothStatus::LostTemporary);
        assert!(!tooth.permanent_loss);
        assert_eq!(chart.present_count(), 19);
        assert_counts_consistent(&chart);
    }

    #[test]
    fn natural_loss_walks_quadrants_then_ranks() {
        let mut chart = ToothChart::new(Stage::Child);
        chart.lose_specific(&[id(Quadrant::UpperRight, 1)], false);

        let lost = chart.lose_teeth(4, false, None, SelectionPolicy::Priority, &mut rng());

        assert_eq!(
            lost,
            [
                id(Quadrant::UpperLeft, 1),
                id(Quadrant::LowerLeft, 1),
                id(Quadrant::LowerRight, 1),
                id(Quadrant::UpperLeft, 2),
            ]
        );
    }

    #[test]
    fn random_loss_returns_fewer_when_short_of_candidates() {
        let mut chart = ToothChart::new(Stage::Child);

        let lost = chart.lose_teeth(
            10,
            true,
            Some(&[ToothKind::PrimaryCanine]),
            SelectionPolicy::Random,
            &mut rng(),
        );

        assert_eq!(lost.len(), 4);
        assert!(lost.iter().all(|&id| status_of(&chart, id) == ToothStatus::LostPermanent));
        assert_eq!(chart.present_count(), 16);
        assert_counts_consistent(&chart);
    }

    #[test]
    fn random_loss_never_repeats_a_tooth() {
        let mut chart = ToothChart::new(Stage::Adult);

        let mut lost = chart.lose_teeth(28, true, None, SelectionPolicy::Random, &mut rng());
        let total = lost.len();
        lost.dedup();

        assert_eq!(total, 28);
        assert_eq!(lost.len(), 28);
        assert_eq!(chart.present_count(), 0);
        assert!(
            chart
                .lose_teeth(1, true, None, SelectionPolicy::Random, &mut rng())
                .is_empty()
        );
    }

    #[test]
    fn lose_specific_skips_hidden_and_lost_slots() {
        let mut chart = ToothChart::new(Stage::Child);

        let lost = chart.lose_specific(
            &[
                id(Quadrant::UpperLeft, 6),
                id(Quadrant::UpperLeft, 2),
                id(Quadrant::UpperLeft, 2),
            ],
            true,
        );

        assert_eq!(lost, [id(Quadrant::UpperLeft, 2)]);
    }

    #[test]
    fn lose_specific_reports_repeated_ids_once() {
        let mut chart = ToothChart::new(Stage::Adult);

        let lost = chart.lose_specific(
            &[
                id(Quadrant::LowerRight, 3),
                id(Quadrant::UpperLeft, 5),
                id(Quadrant::LowerRight, 3),
                id(Quadrant::UpperLeft, 5),
            ],
            false,
        );

        assert_eq!(lost, [id(Quadrant::LowerRight, 3), id(Quadrant::UpperLeft, 5)]);
        assert_eq!(chart.missing_count(), 2);
        assert_eq!(chart.present_count(), 26);
    }

    #[test]
    fn stain_only_touches_healthy_back_teeth() {
        let mut chart = ToothChart::new(Stage::Adult);

        let stained = chart.stain_teeth(4, &mut rng());

        assert_eq!(stained.len(), 4);
        for id in stained {
            let tooth = chart.tooth(id).unwrap();
            assert!(BACK_KINDS.contains(&tooth.kind));
            assert_eq!(tooth.status, ToothStatus::Stained);
        }
        assert_eq!(chart.present_count(), 28);
    }

    #[test]
    fn damage_skips_primary_front_teeth() {
        let mut chart = ToothChart::new(Stage::Child);
        let mut rng = rng();

        for _ in 0..8 {
            chart.damage_tooth(&mut rng).unwrap();
        }

        assert_eq!(chart.damage_tooth(&mut rng), None);
        assert!(chart.teeth().iter().all(|tooth| {
            tooth.status != ToothStatus::Damaged
                || matches!(
                    tooth.kind,
                    ToothKind::PrimaryFirstMolar | ToothKind::PrimarySecondMolar
                )
        }));
    }

    #[test]
    fn whiten_restores_stained_and_damaged_but_not_lost() {
        let mut chart = ToothChart::new(Stage::Adult);
        let mut rng = rng();
        let lost = chart.lose_specific(&[id(Quadrant::LowerLeft, 1)], true);
        let damaged = chart.damage_tooth(&mut rng).unwrap();
        let stained = chart.stain_teeth(2, &mut rng);

        let restored = chart.whiten();

        assert_eq!(restored.len(), 3);
        for id in stained.iter().chain([&damaged]) {
            assert_eq!(status_of(&chart, *id), ToothStatus::Healthy);
        }
        assert_eq!(status_of(&chart, lost[0]), ToothStatus::LostPermanent);
        assert_eq!(chart.present_count(), 27);
    }

    #[test]
    fn repair_only_touches_damaged() {
        let mut chart = ToothChart::new(Stage::Adult);
        let mut rng = rng();
        let damaged = chart.damage_tooth(&mut rng).unwrap();
        let stained = chart.stain_teeth(1, &mut rng);

        assert_eq!(chart.repair_damaged(), [damaged]);
        assert_eq!(status_of(&chart, stained[0]), ToothStatus::Stained);
    }

    #[test]
    fn prosthetics_are_present_and_terminal() {
        let mut chart = ToothChart::new(Stage::Adult);
        let mut rng = rng();
        chart.lose_specific(
            &[
                id(Quadrant::UpperLeft, 4),
                id(Quadrant::UpperLeft, 5),
                id(Quadrant::UpperLeft, 6),
            ],
            true,
        );
        chart.lose_specific(&[id(Quadrant::UpperRight, 4)], false);

        let fitted = chart.add_prosthetics(5);

        assert_eq!(
            fitted,
            [
                id(Quadrant::UpperLeft, 4),
                id(Quadrant::UpperLeft, 5),
                id(Quadrant::UpperLeft, 6),
            ]
        );
        assert_eq!(chart.present_count(), 27);
        assert_eq!(
            status_of(&chart, id(Quadrant::UpperRight, 4)),
            ToothStatus::LostTemporary
        );

        chart.mutate_status(
            None,
            &[ToothStatus::Prosthetic],
            ToothStatus::Damaged,
            Selection::All,
            &mut rng,
        );
        chart.lose_specific(&fitted, true);
        assert!(
            fitted
                .iter()
                .all(|&id| status_of(&chart, id) == ToothStatus::Prosthetic)
        );
    }

    #[test]
    fn mutate_status_rejects_loss_targets() {
        let mut chart = ToothChart::new(Stage::Child);

        let changed = chart.mutate_status(
            None,
            &[ToothStatus::Healthy],
            ToothStatus::LostPermanent,
            Selection::All,
            &mut rng(),
        );

        assert!(changed.is_empty());
        assert_eq!(chart.present_count(), 20);
    }

    #[test]
    fn counts_stay_consistent_through_mixed_mutations() {
        let mut chart = ToothChart::new(Stage::Child);
        let mut rng = rng();

        for round in 0..12 {
            match round % 6 {
                0 => {
                    chart.lose_teeth(2, false, None, SelectionPolicy::Priority, &mut rng);
                }
                1 => {
                    chart.stain_teeth(3, &mut rng);
                }
                2 => {
                    chart.damage_tooth(&mut rng);
                }
                3 => {
                    chart.lose_teeth(1, true, None, SelectionPolicy::Random, &mut rng);
                }
                4 => {
                    chart.add_prosthetics(1);
                }
                _ => {
                    chart.whiten();
                    chart.upgrade_stage();
                }
            }
            assert_counts_consistent(&chart);
        }
    }
}
