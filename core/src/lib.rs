#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use events::*;
pub use gateway::*;
pub use ledger::*;
pub use movement::*;
pub use quiz::*;
pub use session::*;
pub use snapshot::*;
pub use tooth::*;
pub use types::*;

mod board;
mod error;
mod events;
mod gateway;
mod ledger;
mod movement;
mod quiz;
mod session;
mod snapshot;
mod tooth;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_die: DieValue,
    pub max_redirect_hops: u8,
    pub starting_coins: Coins,
}

impl GameConfig {
    pub const MAX_DIE: DieValue = 6;
    /// Hard cap on forced redirects per roll; configs may only lower it.
    pub const MAX_REDIRECT_HOPS: u8 = 3;

    pub const fn new_unchecked(
        max_die: DieValue,
        max_redirect_hops: u8,
        starting_coins: Coins,
    ) -> Self {
        Self {
            max_die,
            max_redirect_hops,
            starting_coins,
        }
    }

    pub fn new(max_die: DieValue, max_redirect_hops: u8, starting_coins: Coins) -> Self {
        let max_die = max_die.clamp(1, Self::MAX_DIE);
        let max_redirect_hops = max_redirect_hops.clamp(1, Self::MAX_REDIRECT_HOPS);
        Self::new_unchecked(max_die, max_redirect_hops, starting_coins)
    }

    /// Parses a config document; missing fields take their defaults and
    /// out-of-range values are clamped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        Ok(raw.clamped())
    }

    pub fn clamped(self) -> Self {
        Self::new(self.max_die, self.max_redirect_hops, self.starting_coins)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(3, 3, 10)
    }
}
