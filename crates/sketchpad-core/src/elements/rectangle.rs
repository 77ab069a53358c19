//! Rectangle shape.

use super::{ElementId, ElementShape, ElementStyle, ElementTransform, HIT_PADDING, normalized_rect, rect_contains_point};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest corner radius drawn, in screen pixels.
pub const MAX_CORNER_RADIUS: f64 = 10.0;

/// A rectangle spanned by two opposite corners.
///
/// The corners are stored as drawn and may be in any order; use
/// [`ElementShape::bounds`] for the normalized box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    pub start: Point,
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub transform: ElementTransform,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
            transform: ElementTransform::default(),
        }
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        normalized_rect(self.start, self.end)
    }

    /// Corner radius for rounded rendering at the given zoom.
    ///
    /// Capped at a quarter of each side so tiny rectangles stay convex.
    pub fn corner_radius(&self, zoom: f64) -> f64 {
        let rect = self.as_rect();
        (MAX_CORNER_RADIUS / zoom)
            .min(rect.width() / 4.0)
            .min(rect.height() / 4.0)
    }
}

impl ElementShape for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, zoom: f64) -> bool {
        let pad = HIT_PADDING / zoom;
        rect_contains_point(self.as_rect().inflate(pad, pad), point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }

    fn anchor(&self) -> Point {
        self.start
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn transform(&self) -> &ElementTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut ElementTransform {
        &mut self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rectangle {
        Rectangle::new(Point::new(x0, y0), Point::new(x1, y1), ElementStyle::default())
    }

    #[test]
    fn test_bounds() {
        let r = rect(110.0, 70.0, 10.0, 20.0);
        let bounds = r.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let r = rect(0.0, 0.0, 100.0, 100.0);
        assert!(r.hit_test(Point::new(50.0, 50.0), 1.0));
        assert!(r.hit_test(Point::new(105.0, 50.0), 1.0));
        assert!(!r.hit_test(Point::new(106.0, 50.0), 1.0));
        assert!(r.hit_test(Point::new(109.0, 50.0), 0.5));
    }

    #[test]
    fn test_corner_radius_caps() {
        // Large rectangle: limited by the zoom term.
        assert!((rect(0.0, 0.0, 200.0, 200.0).corner_radius(1.0) - 10.0).abs() < f64::EPSILON);
        assert!((rect(0.0, 0.0, 200.0, 200.0).corner_radius(2.0) - 5.0).abs() < f64::EPSILON);
        // Thin rectangle: limited by its short side.
        assert!((rect(0.0, 0.0, 200.0, 8.0).corner_radius(1.0) - 2.0).abs() < f64::EPSILON);
    }
}
