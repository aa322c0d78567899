use super::*;

/// Highest slot number in a quadrant (third molar).
pub const SLOTS_PER_QUADRANT: u8 = 8;

/// Total potential slots across all four quadrants.
pub const SLOT_COUNT: usize = Quadrant::ALL.len() * SLOTS_PER_QUADRANT as usize;

/// Static description of one anatomical slot. Which kind occupies the slot (if
/// any) depends on the stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToothBlueprint {
    pub id: ToothId,
    pub child_kind: Option<ToothKind>,
    pub adult_kind: Option<ToothKind>,
}

impl ToothBlueprint {
    pub const fn for_slot(quadrant: Quadrant, number: u8) -> Self {
        use ToothKind::*;

        let child_kind = match number {
            1 => Some(PrimaryCentralIncisor),
            2 => Some(PrimaryLateralIncisor),
            3 => Some(PrimaryCanine),
            4 => Some(PrimaryFirstMolar),
            5 => Some(PrimarySecondMolar),
            _ => None,
        };
        let adult_kind = match number {
            1 => Some(CentralIncisor),
            2 => Some(LateralIncisor),
            3 => Some(Canine),
            4 => Some(FirstPremolar),
            5 => Some(SecondPremolar),
            6 => Some(FirstMolar),
            7 => Some(SecondMolar),
            _ => None,
        };

        Self {
            id: ToothId::new(quadrant, number),
            child_kind,
            adult_kind,
        }
    }

    /// Kind shown in `stage`, or `None` when the slot is empty in that stage.
    pub const fn kind_in(&self, stage: Stage) -> Option<ToothKind> {
        match stage {
            Stage::Child => self.child_kind,
            Stage::Adult => self.adult_kind,
        }
    }

    pub fn tooth_in(&self, stage: Stage) -> Tooth {
        let visible_kind = self.kind_in(stage);
        let kind = visible_kind
            .or(self.adult_kind)
            .or(self.child_kind)
            .unwrap_or(ToothKind::ThirdMolar);

        Tooth {
            id: self.id,
            kind,
            status: if visible_kind.is_some() {
                ToothStatus::Healthy
            } else {
                ToothStatus::Hidden
            },
            visible: visible_kind.is_some(),
            permanent_loss: false,
        }
    }
}

/// All slots in chart order: quadrant by quadrant, midline outwards.
pub fn blueprints() -> impl Iterator<Item = ToothBlueprint> {
    Quadrant::ALL.into_iter().flat_map(|quadrant| {
        (1..=SLOTS_PER_QUADRANT).map(move |number| ToothBlueprint::for_slot(quadrant, number))
    })
}

pub fn blueprint(id: ToothId) -> Option<ToothBlueprint> {
    (1..=SLOTS_PER_QUADRANT)
        .contains(&id.number)
        .then(|| ToothBlueprint::for_slot(id.quadrant, id.number))
}

/// Order used for natural (baby tooth) loss: central incisors, lateral
/// incisors, canines, then molars; each rank walks UL, UR, LL, LR.
pub const NATURAL_LOSS_ORDER: [ToothId; 28] = {
    use Quadrant::*;
    [
        ToothId::new(UpperLeft, 1),
        ToothId::new(UpperRight, 1),
        ToothId::new(LowerLeft, 1),
        ToothId::new(LowerRight, 1),
        ToothId::new(UpperLeft, 2),
        ToothId::new(UpperRight, 2),
        ToothId::new(LowerLeft, 2),
        ToothId::new(LowerRight, 2),
        ToothId::new(UpperLeft, 3),
        ToothId::new(UpperRight, 3),
        ToothId::new(LowerLeft, 3),
        ToothId::new(LowerRight, 3),
        ToothId::new(UpperLeft, 4),
        ToothId::new(UpperRight, 4),
        ToothId::new(LowerLeft, 4),
        ToothId::new(LowerRight, 4),
        ToothId::new(UpperLeft, 5),
        ToothId::new(UpperRight, 5),
        ToothId::new(LowerLeft, 5),
        ToothId::new(LowerRight, 5),
        ToothId::new(UpperLeft, 6),
        ToothId::new(UpperRight, 6),
        ToothId::new(LowerLeft, 6),
        ToothId::new(LowerRight, 6),
        ToothId::new(UpperLeft, 7),
        ToothId::new(UpperRight, 7),
        ToothId::new(LowerLeft, 7),
        ToothId::new(LowerRight, 7),
    ]
};

pub(crate) fn natural_loss_rank(id: ToothId) -> usize {
    NATURAL_LOSS_ORDER
        .iter()
        .position(|&ranked| ranked == id)
        .unwrap_or(NATURAL_LOSS_ORDER.len())
}

/// Front teeth of the adult set.
pub const FRONT_KINDS: &[ToothKind] = &[
    ToothKind::CentralIncisor,
    ToothKind::LateralIncisor,
    ToothKind::Canine,
];

/// Chewing surfaces that pick up stains.
pub const BACK_KINDS: &[ToothKind] = &[
    ToothKind::FirstPremolar,
    ToothKind::SecondPremolar,
    ToothKind::FirstMolar,
    ToothKind::SecondMolar,
    ToothKind::PrimaryFirstMolar,
    ToothKind::PrimarySecondMolar,
];

/// Every adult tooth plus the primary molars; primary front teeth are not
/// damaged since they fall out on their own.
pub const DAMAGEABLE_KINDS: &[ToothKind] = &[
    ToothKind::CentralIncisor,
    ToothKind::LateralIncisor,
    ToothKind::Canine,
    ToothKind::FirstPremolar,
    ToothKind::SecondPremolar,
    ToothKind::FirstMolar,
    ToothKind::SecondMolar,
    ToothKind::PrimaryFirstMolar,
    ToothKind::PrimarySecondMolar,
];
