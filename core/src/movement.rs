use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Backward redirect taken on `turn` from `cell`. Landing on `cell` again on
/// the very next turn skips its backward redirect once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectImmunity {
    pub cell: Position,
    pub turn: Turn,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pawn {
    position: Position,
    turn: Turn,
    immunity: Option<RedirectImmunity>,
}

impl Pawn {
    pub const fn new() -> Self {
        Self {
            position: 0,
            turn: 0,
            immunity: None,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn turn(&self) -> Turn {
        self.turn
    }

    pub const fn immunity(&self) -> Option<RedirectImmunity> {
        self.immunity
    }

    pub fn is_at_goal(&self, board: &Board) -> bool {
        self.position >= board.last_index()
    }

    /// Moves the pawn to a position handed out by the quiz router, clamped to
    /// the board. No cell effects are applied.
    pub fn place(&mut self, position: Position, board: &Board) -> Position {
        self.position = position.min(board.last_index());
        self.position
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub rolled: DieValue,
    pub from: Position,
    pub to: Position,
    /// Every cell the pawn landed on, redirect targets included.
    pub path: Vec<Position>,
    pub coin_messages: Vec<Event>,
    pub tooth_messages: Vec<Event>,
    pub move_messages: Vec<Event>,
    pub next_screen: Screen,
}

impl MoveResult {
    fn standing(rolled: DieValue, position: Position, next_screen: Screen) -> Self {
        Self {
            rolled,
            from: position,
            to: position,
            path: Vec::new(),
            coin_messages: Vec::new(),
            tooth_messages: Vec::new(),
            move_messages: alloc::vec![Event::NoMoveAvailable],
            next_screen,
        }
    }

    pub fn has_update(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.move_messages
            .iter()
            .chain(&self.coin_messages)
            .chain(&self.tooth_messages)
    }
}

/// Die values the host may offer at `position`: `1..=k` where `k` is bounded by
/// the die, the distance to the goal and the distance to the next forced stop.
/// The current cell's `blocked_rolls` are removed unless that leaves nothing.
pub fn legal_range(position: Position, board: &Board, config: &GameConfig) -> Vec<DieValue> {
    let last = board.last_index();
    let position = position.min(last);

    let mut reach = usize::from(config.max_die.max(1)).min(last - position);
    if let Some(stop) = board.next_forced_stop(position) {
        reach = reach.min(stop - position);
    }

    let range: Vec<DieValue> = (1..=reach).filter_map(|value| value.try_into().ok()).collect();
    let blocked = match board.cell(position) {
        Some(cell) if !cell.blocked_rolls.is_empty() => &cell.blocked_rolls,
        _ => return range,
    };

    let allowed: Vec<DieValue> = range
        .iter()
        .copied()
        .filter(|value| !blocked.contains(value))
        .collect();
    if allowed.is_empty() && !range.is_empty() {
        log::warn!("Blocked rolls at cell {position} leave no legal value, ignoring them");
        return range;
    }
    allowed
}

/// Uniform pick from a legal range; `None` when there is nothing to roll.
pub fn roll_die<R: Rng + ?Sized>(legal: &[DieValue], rng: &mut R) -> Option<DieValue> {
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.random_range(0..legal.len())])
}

/// Advances `pawn` by `rolled`, resolves every landing and follows forced
/// redirects up to `config.max_redirect_hops` hops.
pub fn apply_roll<R: Rng + ?Sized>(
    pawn: &mut Pawn,
    rolled: DieValue,
    board: &Board,
    chart: &mut ToothChart,
    ledger: &mut Ledger,
    config: &GameConfig,
    rng: &mut R,
) -> MoveResult {
    let last = board.last_index();
    let from = pawn.position.min(last);
    if from == last {
        return MoveResult::standing(rolled, from, Screen::Goal);
    }

    pawn.turn += 1;
    let turn = pawn.turn;
    let immunity = pawn.immunity.take().filter(|tag| tag.turn + 1 == turn);

    let mut result = MoveResult {
        rolled,
        from,
        to: from,
        path: Vec::new(),
        coin_messages: Vec::new(),
        tooth_messages: Vec::new(),
        move_messages: Vec::new(),
        next_screen: Screen::Board,
    };

    let mut position = from.saturating_add(usize::from(rolled.max(1))).min(last);
    result.path.push(position);
    resolve_landing(position, board, chart, ledger, config, rng, &mut result);

    let max_hops = config.max_redirect_hops.min(GameConfig::MAX_REDIRECT_HOPS);
    let mut hops = 0;
    while let Some(step_delta) = board.cell(position).and_then(|cell| cell.step_delta) {
        let target = offset_position(position, step_delta, last);
        if target == position {
            break;
        }

        if target < position && immunity.is_some_and(|tag| tag.cell == position) {
            log::debug!("Redirect at cell {position} skipped on turn {turn}");
            result.move_messages.push(Event::RedirectSkipped { at: position });
            break;
        }

        if hops >= max_hops {
            log::warn!("Redirect limit reached at cell {position}, ignoring its redirect");
            result
                .move_messages
                .push(Event::RedirectLimitReached { at: position });
            break;
        }
        hops += 1;

        if target < position {
            pawn.immunity = Some(RedirectImmunity {
                cell: position,
                turn,
            });
        }
        result.move_messages.push(Event::Redirected {
            from: position,
            to: target,
        });
        position = target;
        result.path.push(position);
        resolve_landing(position, board, chart, ledger, config, rng, &mut result);
    }

    pawn.position = position;
    result.to = position;
    result.next_screen = board.screen_at(position);
    log::debug!(
        "Turn {turn}: rolled {rolled}, {from} -> {position} via {:?}, next {:?}",
        result.path,
        result.next_screen
    );
    result
}

fn resolve_landing<R: Rng + ?Sized>(
    position: Position,
    board: &Board,
    chart: &mut ToothChart,
    ledger: &mut Ledger,
    config: &GameConfig,
    rng: &mut R,
    result: &mut MoveResult,
) {
    let Some(cell) = board.cell(position) else {
        return;
    };

    result
        .coin_messages
        .extend(ledger.apply_with_event(cell.coin_delta));

    if let Some(effect) = cell.tooth_effect {
        result
            .tooth_messages
            .push(chart.apply_effect(effect, config.max_die, rng).into_event());
    }
}
