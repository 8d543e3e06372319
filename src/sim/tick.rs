//! Fixed timestep simulation tick
//!
//! Processing order while playing:
//!   1. Queued moves (a move into the goal row resolves the goal at once)
//!   2. Obstacle lanes advance
//!   3. Lane collision test
//!
//! While dying only the death timer runs. Terminal phases ignore ticks.

use super::collision::{first_hit, matching_goal};
use super::lanes::advance_all;
use super::player::Direction;
use super::state::{AfterDeath, GameEvent, GameState, Outcome, Phase};
use crate::consts::*;

/// Input commands for a single tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub moves: Vec<Direction>,
}

impl TickInput {
    pub fn single(direction: Direction) -> Self {
        Self {
            moves: vec![direction],
        }
    }
}

/// Advance the game state by one tick, returning the events it produced
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        Phase::Terminal(_) => return events,
        Phase::Dying { ticks_left, then } => {
            state.time_ticks += 1;
            run_death_timer(state, ticks_left, then, &mut events);
            return events;
        }
        Phase::Playing => {}
    }

    state.time_ticks += 1;

    for &direction in &input.moves {
        apply_move(state, direction, &mut events);
    }

    if !state.phase.is_playing() {
        return events;
    }

    let field = state.field();
    advance_all(&mut state.obstacles, &field);
    resolve(state, &mut events);

    events
}

/// Apply one player move. A no-op unless the round is playing.
pub fn apply_move(state: &mut GameState, direction: Direction, events: &mut Vec<GameEvent>) {
    if !state.phase.is_playing() {
        return;
    }

    let field = state.field();
    if state.player.step(direction, &field, state.edge) {
        state.score += FORWARD_BONUS;
    }

    if state.player.in_goal_row(&field) {
        resolve_goal(state, events);
    }
}

/// Per-tick collision resolution. The goal row is settled by `apply_move`,
/// so the player never sits in row 0 here.
fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if let Some(obstacle) = first_hit(&state.player, &state.obstacles) {
        log::debug!(
            "Hit obstacle at x={:.2} in row {} (player col {})",
            obstacle.x,
            obstacle.row,
            state.player.col
        );
        lose_life(state, events);
    }
}

/// Claim the goal under the player, or treat the miss as a death
fn resolve_goal(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(index) = matching_goal(&state.player, &state.goals) else {
        log::debug!("Reached row 0 at col {} outside any open goal", state.player.col);
        lose_life(state, events);
        return;
    };

    let goal = &mut state.goals[index];
    goal.reached = true;
    let col = goal.col;

    state.score += GOAL_POINTS;
    events.push(GameEvent::GoalReached { col });
    log::info!(
        "Goal {} claimed ({}/{})",
        col,
        state.goals_reached(),
        state.goals.len()
    );

    state.respawn_player();

    if state.all_goals_reached() {
        state.phase = Phase::Terminal(Outcome::Won);
        events.push(GameEvent::Won);
        log::info!("All goals claimed, final score {}", state.score);
    }
}

/// Shared life-loss procedure for obstacle hits and missed goals
fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.phase.is_playing() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    state.phase = if state.lives > 0 {
        Phase::Dying {
            ticks_left: DEATH_TICKS,
            then: AfterDeath::Respawn,
        }
    } else {
        Phase::Dying {
            ticks_left: FINAL_DEATH_TICKS,
            then: AfterDeath::GameOver,
        }
    };
    log::info!("Life lost, {} remaining", state.lives);
}

fn run_death_timer(
    state: &mut GameState,
    ticks_left: u32,
    then: AfterDeath,
    events: &mut Vec<GameEvent>,
) {
    let ticks_left = ticks_left.saturating_sub(1);
    if ticks_left > 0 {
        state.phase = Phase::Dying { ticks_left, then };
        return;
    }

    match then {
        AfterDeath::Respawn => {
            state.respawn_player();
            state.phase = Phase::Playing;
            events.push(GameEvent::Respawned);
        }
        AfterDeath::GameOver => {
            state.phase = Phase::Terminal(Outcome::GameOver);
            events.push(GameEvent::GameOver);
            log::info!("Game over, final score {}", state.score);
        }
    }
}
