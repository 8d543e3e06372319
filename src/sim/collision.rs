//! Collision and goal tests
//!
//! Collisions are 1D span overlaps within a single row. Both spans are shrunk
//! by `COLLISION_INSET` on each side first, so grazing an obstacle's edge is
//! forgiven.

use super::lanes::Obstacle;
use super::player::Player;
use super::state::Goal;
use crate::consts::{COLLISION_INSET, GOAL_MATCH_DISTANCE};

/// A closed horizontal interval in grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// The cell `[col, col + 1]`
    pub fn cell(col: i32) -> Self {
        Self::new(col as f32, col as f32 + 1.0)
    }

    pub fn of_obstacle(obstacle: &Obstacle) -> Self {
        Self::new(obstacle.x, obstacle.right())
    }

    /// Shrink both ends inward
    pub fn inset(self, amount: f32) -> Self {
        Self::new(self.left + amount, self.right - amount)
    }

    /// Strict overlap; spans that only touch do not overlap
    pub fn overlaps(&self, other: &Span) -> bool {
        self.right > other.left && self.left < other.right
    }
}

/// Do the player's cell and an obstacle overlap after the inset shrink?
pub fn hits(player: &Player, obstacle: &Obstacle) -> bool {
    if obstacle.row != player.row {
        return false;
    }
    let p = Span::cell(player.col).inset(COLLISION_INSET);
    let o = Span::of_obstacle(obstacle).inset(COLLISION_INSET);
    p.overlaps(&o)
}

/// First obstacle the player is touching, if any
pub fn first_hit<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| hits(player, o))
}

/// Index of the first unclaimed goal the player's column matches
pub fn matching_goal(player: &Player, goals: &[Goal]) -> Option<usize> {
    goals.iter().position(|g| {
        !g.reached && ((player.col - g.col).abs() as f32) < GOAL_MATCH_DISTANCE
    })
}
