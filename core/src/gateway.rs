use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Coins paid when a gateway activity is completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayRewards {
    pub checkup_coins: i32,
    pub job_experience_coins: i32,
}

impl GatewayRewards {
    pub const fn coins_for(&self, route: Route) -> i32 {
        match route {
            Route::CariesQuiz | Route::GumQuiz => self.checkup_coins,
            Route::JobExperience => self.job_experience_coins,
        }
    }
}

impl Default for GatewayRewards {
    fn default() -> Self {
        Self {
            checkup_coins: 3,
            job_experience_coins: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOutcome {
    pub route: Route,
    pub coin_delta: i32,
    pub balance: Coins,
    pub next_screen: Screen,
    pub events: Vec<Event>,
}

/// Pays the reward for finishing the activity behind `route` and names the
/// screen that follows: the checkup leads into its quiz, job experience goes
/// back to the board.
pub fn complete_gateway(
    route: Route,
    rewards: &GatewayRewards,
    ledger: &mut Ledger,
) -> GatewayOutcome {
    let coin_delta = rewards.coins_for(route);

    let mut events = Vec::new();
    events.push(Event::ActivityCompleted { route });
    events.extend(ledger.apply_with_event(coin_delta));

    let next_screen = match route.quiz() {
        Some(kind) => Screen::Quiz(kind),
        None => Screen::Board,
    };
    log::debug!("Completed {route:?}, next {next_screen:?}");

    GatewayOutcome {
        route,
        coin_delta,
        balance: ledger.coins(),
        next_screen,
        events,
    }
}
