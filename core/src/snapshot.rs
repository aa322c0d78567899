use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothSnapshot {
    pub id: ToothId,
    pub kind: ToothKind,
    pub status: ToothStatus,
}

/// Plain view of a session for hosts and logs. Only visible teeth are listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub position: Position,
    pub turn: Turn,
    pub coins: Coins,
    pub stage: Stage,
    pub present: u8,
    pub missing: u8,
    pub max: u8,
    pub teeth: Vec<ToothSnapshot>,
    pub screen: Screen,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self::from_parts(
            session.pawn(),
            session.chart(),
            session.ledger(),
            session.screen(),
        )
    }

    pub fn from_parts(pawn: &Pawn, chart: &ToothChart, ledger: &Ledger, screen: Screen) -> Self {
        let teeth = chart
            .teeth()
            .iter()
            .filter(|tooth| tooth.visible)
            .map(|tooth| ToothSnapshot {
                id: tooth.id,
                kind: tooth.kind,
                status: tooth.status,
            })
            .collect();

        Self {
            position: pawn.position(),
            turn: pawn.turn(),
            coins: ledger.coins(),
            stage: chart.stage(),
            present: chart.present_count(),
            missing: chart.missing_count(),
            max: chart.max_count(),
            teeth,
            screen,
        }
    }

    pub fn count_with(&self, status: ToothStatus) -> usize {
        self.teeth
            .iter()
            .filter(|tooth| tooth.status == status)
            .count()
    }
}
