//! Viewport transform: pan and zoom.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;
/// Default upper zoom bound.
pub const MAX_ZOOM: f64 = 10.0;

/// Camera maps between screen and world coordinates.
///
/// `screen = world * zoom + pan`. The zoom never leaves
/// `[min_zoom, max_zoom]`, so the inverse mapping is always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen-space translation.
    pub pan: Vec2,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom bounds. Bounds are sorted and kept positive.
    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        let min_zoom = min_zoom.min(max_zoom).max(f64::EPSILON);
        let max_zoom = max_zoom.max(min_zoom);
        Self {
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Set the zoom directly, clamped to the allowed range. NaN is ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// World-to-screen affine for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.zoom)
    }

    /// Screen-to-world affine for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.pan)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Change the zoom by `delta`, keeping the world point under `screen_point` fixed.
    pub fn zoom_about(&mut self, delta: f64, screen_point: Point) {
        if !delta.is_finite() {
            return;
        }
        let world_point = self.screen_to_world(screen_point);
        self.set_zoom(self.zoom + delta);
        self.pan = screen_point.to_vec2() - world_point.to_vec2() * self.zoom;
    }

    /// Restore unit zoom and no pan.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }
}
