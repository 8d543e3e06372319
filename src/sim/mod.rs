//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame, no delta time)
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (layout order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod lanes;
pub mod layout;
pub mod player;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Span, first_hit, hits, matching_goal};
pub use grid::Field;
pub use lanes::{LaneDirection, Obstacle};
pub use layout::{LaneSpec, Layout, LayoutError, ObstacleKind};
pub use player::{Direction, EdgePolicy, Player};
pub use state::{AfterDeath, GameEvent, GameState, Goal, Outcome, Phase};
pub use tick::{TickInput, apply_move, tick};
