use core::fmt;
use serde::{Deserialize, Serialize};

pub use blueprint::*;
pub use chart::*;
pub use effect::*;
pub use lifecycle::*;

mod blueprint;
mod chart;
mod effect;
mod lifecycle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Upper,
    Lower,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    pub const fn arch(self) -> Arch {
        match self {
            Self::UpperLeft | Self::UpperRight => Arch::Upper,
            Self::LowerLeft | Self::LowerRight => Arch::Lower,
        }
    }

    pub const fn side(self) -> Side {
        match self {
            Self::UpperLeft | Self::LowerLeft => Side::Left,
            Self::UpperRight | Self::LowerRight => Side::Right,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::UpperLeft => "UL",
            Self::UpperRight => "UR",
            Self::LowerLeft => "LL",
            Self::LowerRight => "LR",
        }
    }
}

/// Stable slot identifier: quadrant plus position counted from the midline
/// (1 = central incisor, 8 = third molar).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToothId {
    pub quadrant: Quadrant,
    pub number: u8,
}

impl ToothId {
    pub const fn new(quadrant: Quadrant, number: u8) -> Self {
        Self { quadrant, number }
    }

    pub const fn arch(self) -> Arch {
        self.quadrant.arch()
    }

    pub const fn side(self) -> Side {
        self.quadrant.side()
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quadrant.prefix(), self.number)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothKind {
    CentralIncisor,
    LateralIncisor,
    Canine,
    FirstPremolar,
    SecondPremolar,
    FirstMolar,
    SecondMolar,
    ThirdMolar,
    PrimaryCentralIncisor,
    PrimaryLateralIncisor,
    PrimaryCanine,
    PrimaryFirstMolar,
    PrimarySecondMolar,
}

impl ToothKind {
    pub const fn is_primary(self) -> bool {
        matches!(
            self,
            Self::PrimaryCentralIncisor
                | Self::PrimaryLateralIncisor
                | Self::PrimaryCanine
                | Self::PrimaryFirstMolar
                | Self::PrimarySecondMolar
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothStatus {
    Healthy,
    Stained,
    Damaged,
    LostTemporary,
    LostPermanent,
    Prosthetic,
    Hidden,
}

impl ToothStatus {
    pub const fn is_lost(self) -> bool {
        matches!(self, Self::LostTemporary | Self::LostPermanent)
    }

    /// Statuses that no mutator moves a tooth out of, except the dedicated
    /// prosthetic fitting for `LostPermanent`.
    pub const fn is_settled(self) -> bool {
        matches!(
            self,
            Self::LostTemporary | Self::LostPermanent | Self::Prosthetic | Self::Hidden
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Child,
    Adult,
}

impl Stage {
    /// Number of visible slots in this stage.
    pub const fn tooth_count(self) -> u8 {
        match self {
            Self::Child => 20,
            Self::Adult => 28,
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Child
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooth {
    pub id: ToothId,
    pub kind: ToothKind,
    pub status: ToothStatus,
    pub visible: bool,
    /// Set when the slot has ever been lost for good; prosthetics keep it.
    pub permanent_loss: bool,
}

impl Tooth {
    pub const fn arch(&self) -> Arch {
        self.id.arch()
    }

    pub const fn side(&self) -> Side {
        self.id.side()
    }

    pub const fn is_present(&self) -> bool {
        self.visible && !self.status.is_lost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn tooth_id_displays_quadrant_prefix() {
        assert_eq!(ToothId::new(Quadrant::UpperLeft, 1).to_string(), "UL1");
        assert_eq!(ToothId::new(Quadrant::LowerRight, 7).to_string(), "LR7");
    }

    #[test]
    fn quadrant_maps_to_arch_and_side() {
        let id = ToothId::new(Quadrant::LowerLeft, 3);

        assert_eq!(id.arch(), Arch::Lower);
        assert_eq!(id.side(), Side::Left);
    }
}
