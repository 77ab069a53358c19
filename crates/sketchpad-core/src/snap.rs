//! Grid display and snapping.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default grid cell size in world units.
pub const GRID_SIZE: f64 = 20.0;

/// Snap a single coordinate to the nearest multiple of `cell_size`.
///
/// A non-positive cell size leaves the value untouched.
pub fn snap_value(value: f64, cell_size: f64) -> f64 {
    if cell_size <= 0.0 {
        return value;
    }
    (value / cell_size).round() * cell_size
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, cell_size: f64) -> Point {
    Point::new(snap_value(point.x, cell_size), snap_value(point.y, cell_size))
}

/// Grid settings. Visibility only affects rendering; snapping is independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub cell_size: f64,
    pub visible: bool,
    pub snap_enabled: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cell_size: GRID_SIZE,
            visible: true,
            snap_enabled: false,
        }
    }
}

impl Grid {
    pub fn new(cell_size: f64, visible: bool, snap_enabled: bool) -> Self {
        Self {
            cell_size,
            visible,
            snap_enabled,
        }
    }

    /// Snap a point if snapping is enabled.
    pub fn snap(&self, point: Point) -> Point {
        if self.snap_enabled {
            snap_to_grid(point, self.cell_size)
        } else {
            point
        }
    }

    /// Offset that moves `point` onto the grid (zero when snapping is off).
    pub fn snap_offset(&self, point: Point) -> Vec2 {
        self.snap(point) - point
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn toggle_snap(&mut self) {
        self.snap_enabled = !self.snap_enabled;
    }
}
