//! Static level layout: field size, spawn cell, goal columns and lanes
//!
//! The layout is configuration data supplied at initialization. The default
//! table is the haunted house; alternative layouts can be loaded from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::Field;
use super::lanes::{LaneDirection, Obstacle};
use crate::consts::*;

/// Cosmetic obstacle type for renderers (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Candle,
    Shadow,
    Furniture,
    Book,
    #[default]
    Ghost,
    Bat,
}

/// One lane of identical obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneSpec {
    pub row: i32,
    pub count: u32,
    /// Distance between consecutive obstacles' left edges at round start
    pub spacing: f32,
    pub width: f32,
    pub speed: f32,
    pub direction: LaneDirection,
    #[serde(default)]
    pub kind: ObstacleKind,
}

impl LaneSpec {
    /// Obstacles in their round-start positions
    pub fn spawn(&self) -> impl Iterator<Item = Obstacle> + '_ {
        (0..self.count).map(move |i| Obstacle {
            row: self.row,
            x: i as f32 * self.spacing,
            width: self.width,
            speed: self.speed,
            direction: self.direction,
        })
    }
}

/// Complete level layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub field: Field,
    pub spawn_column: i32,
    pub goal_columns: Vec<i32>,
    pub lanes: Vec<LaneSpec>,
}

/// Reasons a layout is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    FieldTooSmall { columns: i32, rows: i32 },
    SpawnOutsideField { col: i32 },
    NoGoals,
    GoalOutsideField { col: i32 },
    DuplicateGoal { col: i32 },
    LaneOutOfRange { row: i32 },
    InvalidLaneSpeed { row: i32 },
    InvalidLaneWidth { row: i32 },
    InvalidLaneSpacing { row: i32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::FieldTooSmall { columns, rows } => {
                write!(f, "field {columns}x{rows} is too small (minimum 2x2)")
            }
            LayoutError::SpawnOutsideField { col } => {
                write!(f, "spawn column {col} is outside the field")
            }
            LayoutError::NoGoals => write!(f, "layout has no goals"),
            LayoutError::GoalOutsideField { col } => {
                write!(f, "goal column {col} is outside the field")
            }
            LayoutError::DuplicateGoal { col } => write!(f, "goal column {col} appears twice"),
            LayoutError::LaneOutOfRange { row } => {
                write!(f, "lane row {row} must lie between the goal row and the spawn row")
            }
            LayoutError::InvalidLaneSpeed { row } => {
                write!(f, "lane row {row} needs a positive, finite speed")
            }
            LayoutError::InvalidLaneWidth { row } => {
                write!(f, "lane row {row} needs a positive, finite width")
            }
            LayoutError::InvalidLaneSpacing { row } => {
                write!(f, "lane row {row} has obstacles spaced outside the field")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

impl Layout {
    /// Parse and validate a JSON layout
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let Field { columns, rows } = self.field;
        if columns < 2 || rows < 2 {
            return Err(LayoutError::FieldTooSmall { columns, rows });
        }
        if !(0..columns).contains(&self.spawn_column) {
            return Err(LayoutError::SpawnOutsideField {
                col: self.spawn_column,
            });
        }
        if self.goal_columns.is_empty() {
            return Err(LayoutError::NoGoals);
        }
        for (i, &col) in self.goal_columns.iter().enumerate() {
            if !(0..columns).contains(&col) {
                return Err(LayoutError::GoalOutsideField { col });
            }
            if self.goal_columns[..i].contains(&col) {
                return Err(LayoutError::DuplicateGoal { col });
            }
        }
        for lane in &self.lanes {
            if lane.row <= self.field.goal_row() || lane.row >= self.field.spawn_row() {
                return Err(LayoutError::LaneOutOfRange { row: lane.row });
            }
            if !(lane.speed.is_finite() && lane.speed > 0.0) {
                return Err(LayoutError::InvalidLaneSpeed { row: lane.row });
            }
            if !(lane.width.is_finite() && lane.width > 0.0) {
                return Err(LayoutError::InvalidLaneWidth { row: lane.row });
            }
            // The last obstacle must start inside [-width, columns + width]
            let last_x = lane.count.saturating_sub(1) as f32 * lane.spacing;
            if !(lane.spacing.is_finite() && lane.spacing >= 0.0)
                || last_x > columns as f32 + lane.width
            {
                return Err(LayoutError::InvalidLaneSpacing { row: lane.row });
            }
        }
        Ok(())
    }

    /// All obstacles in their round-start positions
    pub fn spawn_obstacles(&self) -> Vec<Obstacle> {
        self.lanes.iter().flat_map(LaneSpec::spawn).collect()
    }

    /// The haunted house table
    pub fn haunted_house() -> Self {
        use LaneDirection::{Left, Right};
        use ObstacleKind::*;

        let lane = |row: i32,
                    count: u32,
                    spacing: f32,
                    width: f32,
                    speed: f32,
                    direction: LaneDirection,
                    kind: ObstacleKind| LaneSpec {
            row,
            count,
            spacing,
            width,
            speed,
            direction,
            kind,
        };

        Self {
            field: Field::new(FIELD_COLUMNS, FIELD_ROWS),
            spawn_column: SPAWN_COLUMN,
            goal_columns: vec![1, 4, 7, 10],
            lanes: vec![
                lane(2, 3, 4.0, 2.0, 0.02, Right, Candle),
                lane(3, 4, 3.0, 1.5, 0.025, Left, Shadow),
                lane(5, 2, 6.0, 2.5, 0.015, Right, Furniture),
                lane(7, 5, 2.5, 1.0, 0.03, Left, Book),
                lane(9, 3, 4.5, 1.8, 0.022, Right, Ghost),
                lane(11, 4, 3.5, 1.2, 0.035, Left, Bat),
            ],
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::haunted_house()
    }
}
