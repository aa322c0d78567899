use serde::{Deserialize, Serialize};

use crate::*;

/// Tooth-coin balance. The balance never drops below zero; a debit larger than
/// the balance empties it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    coins: Coins,
}

impl Ledger {
    pub const fn new(coins: Coins) -> Self {
        Self { coins }
    }

    pub const fn coins(&self) -> Coins {
        self.coins
    }

    pub fn apply_delta(&mut self, delta: i32) -> Coins {
        let next = i64::from(self.coins) + i64::from(delta);
        self.coins = next.clamp(0, i64::from(Coins::MAX)) as Coins;
        self.coins
    }

    /// Like [`Ledger::apply_delta`] but also reports the balance change as a
    /// host message. Returns `None` for a zero delta.
    pub fn apply_with_event(&mut self, delta: i32) -> Option<Event> {
        if delta == 0 {
            return None;
        }

        let before = self.coins;
        let balance = self.apply_delta(delta);
        Some(if delta > 0 {
            Event::CoinsGained {
                amount: balance - before,
                balance,
            }
        } else {
            Event::CoinsLost {
                amount: before - balance,
                balance,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_larger_than_balance_empties_ledger() {
        let mut ledger = Ledger::new(2);

        assert_eq!(ledger.apply_delta(-5), 0);
        assert_eq!(ledger.coins(), 0);
    }

    #[test]
    fn inverse_pair_restores_balance_when_clamp_not_hit() {
        let mut ledger = Ledger::new(7);

        ledger.apply_delta(-4);
        ledger.apply_delta(4);

        assert_eq!(ledger.coins(), 7);
    }

    #[test]
    fn inverse_pair_after_clamp_does_not_restore() {
        let mut ledger = Ledger::new(3);

        ledger.apply_delta(-10);
        ledger.apply_delta(10);

        assert_eq!(ledger.coins(), 10);
    }

    #[test]
    fn repeated_debits_stay_at_zero() {
        let mut ledger = Ledger::default();
        let balances: alloc::vec::Vec<Coins> = [-1, -100, i32::MIN, 3, -2, -2]
            .into_iter()
            .map(|delta| ledger.apply_delta(delta))
            .collect();

        assert_eq!(balances, [0, 0, 0, 3, 1, 0]);
    }

    #[test]
    fn saturates_at_upper_bound() {
        let mut ledger = Ledger::new(Coins::MAX - 1);

        assert_eq!(ledger.apply_delta(i32::MAX), Coins::MAX);
    }

    #[test]
    fn event_reports_effective_amount() {
        let mut ledger = Ledger::new(2);

        assert_eq!(
            ledger.apply_with_event(-5),
            Some(Event::CoinsLost {
                amount: 2,
                balance: 0
            })
        );
        assert_eq!(ledger.apply_with_event(0), None);
        assert_eq!(
            ledger.apply_with_event(3),
            Some(Event::CoinsGained {
                amount: 3,
                balance: 3
            })
        );
    }
}
