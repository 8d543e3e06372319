//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here, and everything
//! here is mutated only by `tick`.

use serde::{Deserialize, Serialize};

use super::grid::Field;
use super::lanes::Obstacle;
use super::layout::Layout;
use super::player::{EdgePolicy, Player};
use crate::consts::*;

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    GameOver,
    Won,
}

/// What happens once a death animation finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AfterDeath {
    Respawn,
    GameOver,
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Obstacles move, input is accepted
    Playing,
    /// Death animation; the world is frozen until `ticks_left` runs out
    Dying { ticks_left: u32, then: AfterDeath },
    /// Round is over until restart
    Terminal(Outcome),
}

impl Phase {
    /// Remaining death animation ticks (0 outside `Dying`)
    pub fn death_timer(&self) -> u32 {
        match *self {
            Phase::Dying { ticks_left, .. } => ticks_left,
            _ => 0,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }
}

/// A goal slot in the top row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub col: i32,
    pub reached: bool,
}

/// Events emitted during a tick, for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    LifeLost { lives_left: u32 },
    GoalReached { col: i32 },
    Respawned,
    Won,
    GameOver,
    MusicToggled { enabled: bool },
    NewBestScore { score: u64 },
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Layout the round was built from (kept for restarts)
    pub layout: Layout,
    /// Horizontal edge behavior for player moves
    pub edge: EdgePolicy,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub goals: Vec<Goal>,
    pub lives: u32,
    pub score: u64,
    pub phase: Phase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh round from a layout
    pub fn new(layout: Layout, edge: EdgePolicy) -> Self {
        let field = layout.field;
        Self {
            player: Player::at_spawn(&field, layout.spawn_column),
            obstacles: layout.spawn_obstacles(),
            goals: layout
                .goal_columns
                .iter()
                .map(|&col| Goal {
                    col,
                    reached: false,
                })
                .collect(),
            lives: START_LIVES,
            score: 0,
            phase: Phase::Playing,
            time_ticks: 0,
            layout,
            edge,
        }
    }

    /// Back to the initial configuration of the same layout
    pub fn restart(&mut self) {
        let layout = std::mem::take(&mut self.layout);
        *self = Self::new(layout, self.edge);
    }

    #[inline]
    pub fn field(&self) -> Field {
        self.layout.field
    }

    /// Put the player back on the spawn cell
    pub fn respawn_player(&mut self) {
        let field = self.field();
        self.player.reset(&field, self.layout.spawn_column);
    }

    pub fn goals_reached(&self) -> usize {
        self.goals.iter().filter(|g| g.reached).count()
    }

    pub fn all_goals_reached(&self) -> bool {
        self.goals.iter().all(|g| g.reached)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Layout::default(), EdgePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::default();
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.goals.len(), 4);
        assert_eq!(state.goals_reached(), 0);
        assert_eq!((state.player.col, state.player.row), (5, 13));
    }

    #[test]
    fn test_death_timer() {
        let dying = Phase::Dying {
            ticks_left: 12,
            then: AfterDeath::Respawn,
        };
        assert_eq!(dying.death_timer(), 12);
        assert_eq!(Phase::Playing.death_timer(), 0);
        assert!(Phase::Terminal(Outcome::Won).is_terminal());
    }

    #[test]
    fn test_restart_keeps_layout_and_edge() {
        let mut state = GameState::new(Layout::default(), EdgePolicy::Clamp);
        state.lives = 1;
        state.score = 420;
        state.goals[2].reached = true;
        state.player.row = 3;
        state.obstacles[0].x = 9.0;
        state.phase = Phase::Terminal(Outcome::GameOver);

        state.restart();

        assert_eq!(state.edge, EdgePolicy::Clamp);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.goals_reached(), 0);
        assert_eq!(state.player.row, 13);
        assert_eq!(state.obstacles[0].x, 0.0);
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GameEvent::GoalReached { col: 4 }).unwrap();
        assert_eq!(json, r#"{"type":"GoalReached","col":4}"#);
    }
}
