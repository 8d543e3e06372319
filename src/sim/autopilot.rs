//! Demo/attract-mode player
//!
//! Picks moves from the public game state only, like a human would. Uses a
//! seeded RNG so a given seed always plays the same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::hits;
use super::player::{Direction, Player};
use super::state::GameState;

/// Ticks between decisions (a human presses keys a few times per second)
pub const DECISION_INTERVAL: u32 = 8;
/// How far ahead a cell must stay clear before stepping into it
pub const LOOKAHEAD_TICKS: u32 = 24;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    cooldown: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            cooldown: 0,
        }
    }

    /// Decide this tick's move, if any
    pub fn next_move(&mut self, state: &GameState) -> Option<Direction> {
        if !state.phase.is_playing() {
            self.cooldown = 0;
            return None;
        }
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }
        self.cooldown = DECISION_INTERVAL;

        let player = &state.player;
        let target = nearest_open_goal(state, player.col)?;
        let toward = match target.cmp(&player.col) {
            std::cmp::Ordering::Less => Some(Direction::Left),
            std::cmp::Ordering::Greater => Some(Direction::Right),
            std::cmp::Ordering::Equal => None,
        };

        // The goal row is only worth entering when lined up with an open goal
        let may_advance = player.row > 1 || toward.is_none();

        if let Some(side) = toward {
            let urgent = player.row == 1;
            if (urgent || self.rng.random_bool(0.4)) && is_clear(state, side) {
                return Some(side);
            }
        }

        if may_advance && is_clear(state, Direction::Up) {
            return Some(Direction::Up);
        }

        // Standing still is fine unless something is about to arrive
        if stays_clear(state, player.col, player.row) {
            return None;
        }

        let mut escapes = [Direction::Left, Direction::Right, Direction::Down];
        if self.rng.random_bool(0.5) {
            escapes.swap(0, 1);
        }
        escapes.into_iter().find(|&d| is_clear(state, d))
    }
}

/// Closest unclaimed goal column
fn nearest_open_goal(state: &GameState, col: i32) -> Option<i32> {
    state
        .goals
        .iter()
        .filter(|g| !g.reached)
        .min_by_key(|g| (g.col - col).abs())
        .map(|g| g.col)
}

/// Would stepping in `direction` land on a cell that stays clear?
fn is_clear(state: &GameState, direction: Direction) -> bool {
    let mut probe = state.player.clone();
    probe.step(direction, &state.field(), state.edge);
    if probe == state.player {
        return false;
    }
    stays_clear(state, probe.col, probe.row)
}

/// Is the cell free of obstacles for the next `LOOKAHEAD_TICKS` ticks?
fn stays_clear(state: &GameState, col: i32, row: i32) -> bool {
    let field = state.field();
    let probe = Player {
        col,
        row,
        furthest_row: row,
    };
    let mut lane: Vec<_> = state
        .obstacles
        .iter()
        .filter(|o| o.row == row)
        .cloned()
        .collect();

    for _ in 0..=LOOKAHEAD_TICKS {
        if lane.iter().any(|o| hits(&probe, o)) {
            return false;
        }
        for o in &mut lane {
            o.advance(&field);
        }
    }
    true
}
