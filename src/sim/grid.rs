//! Grid and coordinate model
//!
//! The field is a `columns x rows` grid. Row 0 is the goal row, the bottom
//! row is the spawn row. Obstacles live in continuous grid units along x.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Field dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub columns: i32,
    pub rows: i32,
}

impl Field {
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub const fn goal_row(&self) -> i32 {
        0
    }

    #[inline]
    pub const fn spawn_row(&self) -> i32 {
        self.rows - 1
    }

    #[inline]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        (0..self.columns).contains(&col) && (0..self.rows).contains(&row)
    }

    /// Wrap a column index modulo the field width
    #[inline]
    pub fn wrap_column(&self, col: i32) -> i32 {
        col.rem_euclid(self.columns)
    }

    #[inline]
    pub fn clamp_column(&self, col: i32) -> i32 {
        col.clamp(0, self.columns - 1)
    }

    #[inline]
    pub fn clamp_row(&self, row: i32) -> i32 {
        row.clamp(0, self.rows - 1)
    }

    /// Continuous coordinate of a cell's top-left corner
    #[inline]
    pub fn cell_origin(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(col as f32, row as f32)
    }

    /// Continuous coordinate of a cell's center
    #[inline]
    pub fn cell_center(&self, col: i32, row: i32) -> Vec2 {
        self.cell_origin(col, row) + Vec2::splat(0.5)
    }

    /// Cell containing a continuous point, if it lies inside the field
    pub fn cell_at(&self, point: Vec2) -> Option<(i32, i32)> {
        let col = point.x.floor() as i32;
        let row = point.y.floor() as i32;
        self.contains(col, row).then_some((col, row))
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(crate::consts::FIELD_COLUMNS, crate::consts::FIELD_ROWS)
    }
}
