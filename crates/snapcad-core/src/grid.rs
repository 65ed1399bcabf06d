//! Grid settings and snap quantization.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default grid cell size in world units.
pub const DEFAULT_GRID_SIZE: f64 = 50.0;

/// Grid configuration for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Whether pointer positions snap to grid intersections.
    pub snap_enabled: bool,
    /// Whether the grid overlay is drawn (renderer concern, toggled here).
    pub visible: bool,
    /// Grid cell size in world units.
    pub cell_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            snap_enabled: true,
            visible: true,
            cell_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridSettings {
    /// Snap a point to the nearest grid intersection.
    ///
    /// Identity when snapping is disabled or the cell size is not positive.
    /// Idempotent: snapping a snapped point returns it unchanged.
    pub fn snap(&self, point: Point) -> Point {
        if !self.snap_enabled || self.cell_size <= 0.0 {
            return point;
        }
        Point::new(
            (point.x / self.cell_size).round() * self.cell_size,
            (point.y / self.cell_size).round() * self.cell_size,
        )
    }
}
