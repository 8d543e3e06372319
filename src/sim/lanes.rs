//! Obstacle lane kinematics
//!
//! Obstacles slide horizontally at a fixed speed and wrap off one edge back
//! onto the other, so a lane repeats forever without spawning or despawning.

use serde::{Deserialize, Serialize};

use super::grid::Field;

/// Horizontal travel direction of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            LaneDirection::Left => -1.0,
            LaneDirection::Right => 1.0,
        }
    }
}

/// A moving obstacle. `x` is the left edge in grid units and may sit outside
/// `[0, columns)` while the obstacle is wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub row: i32,
    pub x: f32,
    pub width: f32,
    pub speed: f32,
    pub direction: LaneDirection,
}

impl Obstacle {
    /// Advance one tick and wrap at the field edges
    pub fn advance(&mut self, field: &Field) {
        self.x += self.speed * self.direction.sign();

        let columns = field.columns as f32;
        match self.direction {
            LaneDirection::Right if self.x > columns => self.x = -self.width,
            LaneDirection::Left if self.x < -self.width => self.x = columns,
            _ => {}
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Advance every obstacle by one tick
pub fn advance_all(obstacles: &mut [Obstacle], field: &Field) {
    for obstacle in obstacles {
        obstacle.advance(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn obstacle(x: f32, width: f32, speed: f32, direction: LaneDirection) -> Obstacle {
        Obstacle {
            row: 3,
            x,
            width,
            speed,
            direction,
        }
    }

    #[test]
    fn test_moves_by_speed() {
        let field = Field::new(12, 14);
        let mut right = obstacle(2.0, 1.0, 0.5, LaneDirection::Right);
        let mut left = obstacle(2.0, 1.0, 0.5, LaneDirection::Left);
        right.advance(&field);
        left.advance(&field);
        assert!((right.x - 2.5).abs() < 1e-6);
        assert!((left.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_right_wrap_reappears_off_left_edge() {
        let field = Field::new(12, 14);
        let mut obs = obstacle(11.9, 2.0, 0.25, LaneDirection::Right);
        obs.advance(&field);
        assert_eq!(obs.x, -2.0);
    }

    #[test]
    fn test_left_wrap_reappears_off_right_edge() {
        let field = Field::new(12, 14);
        let mut obs = obstacle(-1.4, 1.5, 0.25, LaneDirection::Left);
        obs.advance(&field);
        assert_eq!(obs.x, 12.0);
    }

    #[test]
    fn test_exactly_at_edge_does_not_wrap() {
        let field = Field::new(12, 14);
        let mut obs = obstacle(11.5, 1.0, 0.5, LaneDirection::Right);
        obs.advance(&field);
        assert_eq!(obs.x, 12.0);
    }

    proptest! {
        #[test]
        fn prop_obstacle_stays_in_range(
            start in 0.0f32..12.0,
            width in 0.5f32..3.0,
            speed in 0.005f32..0.5,
            rightward in any::<bool>(),
            ticks in 1usize..5000,
        ) {
            let field = Field::new(12, 14);
            let direction = if rightward { LaneDirection::Right } else { LaneDirection::Left };
            let mut obs = obstacle(start, width, speed, direction);
            for _ in 0..ticks {
                obs.advance(&field);
                prop_assert!(obs.x >= -width - speed);
                prop_assert!(obs.x <= 12.0 + width);
            }
        }
    }
}
