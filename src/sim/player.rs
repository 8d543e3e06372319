//! Player controller: discrete grid moves
//!
//! Rows clamp at the field bounds. Columns wrap or clamp depending on the
//! configured `EdgePolicy`.

use serde::{Deserialize, Serialize};

use super::grid::Field;

/// A directional move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (d_col, d_row) grid offset
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a browser `KeyboardEvent.key` value (arrows and WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// What happens when the player steps off the left or right edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Reappear on the opposite edge
    #[default]
    Wrap,
    /// Stay on the edge column
    Clamp,
}

/// The player token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub col: i32,
    pub row: i32,
    /// Lowest row reached since the last reset (forward-progress watermark)
    pub furthest_row: i32,
}

impl Player {
    /// A player standing on the spawn cell
    pub fn at_spawn(field: &Field, spawn_column: i32) -> Self {
        let row = field.spawn_row();
        Self {
            col: spawn_column,
            row,
            furthest_row: row,
        }
    }

    /// Return to the spawn cell and forget forward progress
    pub fn reset(&mut self, field: &Field, spawn_column: i32) {
        *self = Self::at_spawn(field, spawn_column);
    }

    /// Apply one move. Returns true when the move reached a new furthest row.
    pub fn step(&mut self, direction: Direction, field: &Field, edge: EdgePolicy) -> bool {
        let (dc, dr) = direction.delta();

        self.row = field.clamp_row(self.row + dr);
        self.col = match edge {
            EdgePolicy::Wrap => field.wrap_column(self.col + dc),
            EdgePolicy::Clamp => field.clamp_column(self.col + dc),
        };

        if self.row < self.furthest_row {
            self.furthest_row = self.row;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn in_goal_row(&self, field: &Field) -> bool {
        self.row == field.goal_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(12, 14)
    }

    #[test]
    fn test_spawn_cell() {
        let p = Player::at_spawn(&field(), 5);
        assert_eq!((p.col, p.row, p.furthest_row), (5, 13, 13));
    }

    #[test]
    fn test_column_wraps() {
        let f = field();
        let mut p = Player {
            col: 0,
            row: 6,
            furthest_row: 6,
        };
        p.step(Direction::Left, &f, EdgePolicy::Wrap);
        assert_eq!(p.col, 11);
        p.step(Direction::Right, &f, EdgePolicy::Wrap);
        assert_eq!(p.col, 0);
    }

    #[test]
    fn test_column_clamps() {
        let f = field();
        let mut p = Player {
            col: 0,
            row: 6,
            furthest_row: 6,
        };
        p.step(Direction::Left, &f, EdgePolicy::Clamp);
        assert_eq!(p.col, 0);
        p.col = 11;
        p.step(Direction::Right, &f, EdgePolicy::Clamp);
        assert_eq!(p.col, 11);
    }

    #[test]
    fn test_rows_clamp() {
        let f = field();
        let mut p = Player {
            col: 3,
            row: 0,
            furthest_row: 0,
        };
        assert!(!p.step(Direction::Up, &f, EdgePolicy::Wrap));
        assert_eq!(p.row, 0);

        let mut p = Player::at_spawn(&f, 3);
        assert!(!p.step(Direction::Down, &f, EdgePolicy::Wrap));
        assert_eq!(p.row, 13);
    }

    #[test]
    fn test_forward_progress_is_one_shot_per_row() {
        let f = field();
        let mut p = Player {
            col: 3,
            row: 10,
            furthest_row: 10,
        };
        assert!(p.step(Direction::Up, &f, EdgePolicy::Wrap)); // 10 -> 9
        assert!(!p.step(Direction::Down, &f, EdgePolicy::Wrap)); // 9 -> 10
        assert!(!p.step(Direction::Up, &f, EdgePolicy::Wrap)); // 10 -> 9 again
        assert!(!p.step(Direction::Left, &f, EdgePolicy::Wrap));
        assert!(p.step(Direction::Up, &f, EdgePolicy::Wrap)); // 9 -> 8
        assert_eq!(p.furthest_row, 8);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("q"), None);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(
            moves in proptest::collection::vec(0usize..4, 0..200),
            clamp in any::<bool>(),
        ) {
            let f = field();
            let edge = if clamp { EdgePolicy::Clamp } else { EdgePolicy::Wrap };
            let mut p = Player::at_spawn(&f, 5);
            for m in moves {
                p.step(Direction::ALL[m], &f, edge);
                prop_assert!(f.contains(p.col, p.row));
                prop_assert!(p.furthest_row <= p.row);
            }
        }
    }
}
