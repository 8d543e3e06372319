//! Ghost Crossing - a haunted-house lane crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic tick engine (lanes, player, collisions, round phases)
//! - `session`: Input queue, restart, best score and snapshots for collaborators
//! - `settings`: Player preferences (music, volumes, edge policy)
//! - `best_score`: The single persisted best score
//! - `web`: Browser binding for a JS renderer/audio layer (wasm32 only)

pub mod best_score;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use session::{Command, Session, Snapshot};
pub use settings::{EdgePolicy, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default field dimensions (grid cells)
    pub const FIELD_COLUMNS: i32 = 12;
    pub const FIELD_ROWS: i32 = 14;
    /// Default spawn column (row is always the bottom row)
    pub const SPAWN_COLUMN: i32 = 5;

    /// Lives at the start of a round
    pub const START_LIVES: u32 = 3;

    /// Points for reaching a new furthest row
    pub const FORWARD_BONUS: u64 = 5;
    /// Points for claiming a goal
    pub const GOAL_POINTS: u64 = 100;

    /// Collision spans are shrunk by this much on each side (grid units)
    pub const COLLISION_INSET: f32 = 0.2;
    /// Player column must be strictly closer than this to a goal column
    pub const GOAL_MATCH_DISTANCE: f32 = 1.0;

    /// Dying phase length when lives remain
    pub const DEATH_TICKS: u32 = 30;
    /// Dying phase length for the final life
    pub const FINAL_DEATH_TICKS: u32 = 60;
}
