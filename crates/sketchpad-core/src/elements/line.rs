//! Straight line segment.

use super::{ElementId, ElementShape, ElementStyle, ElementTransform, HIT_PADDING, normalized_rect, rect_contains_point};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line from `start` to `end`. The endpoints keep the order they were drawn in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ElementId,
    pub start: Point,
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub transform: ElementTransform,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style,
            transform: ElementTransform::default(),
        }
    }
}

impl ElementShape for Line {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        normalized_rect(self.start, self.end)
    }

    fn hit_test(&self, point: Point, zoom: f64) -> bool {
        let pad = HIT_PADDING / zoom;
        rect_contains_point(self.bounds().inflate(pad, pad), point)
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

    #[test]
    fn test_bounds_normalized_for_reversed_endpoints() {
        let line = Line::new(Point::new(50.0, 10.0), Point::new(10.0, 40.0), ElementStyle::default());
        let bounds = line.bounds();
        assert_eq!(bounds, Rect::new(10.0, 10.0, 50.0, 40.0));
        // Endpoints themselves are untouched.
        assert_eq!(line.start, Point::new(50.0, 10.0));
    }

    #[test]
    fn test_hit_test_uses_padded_box() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), ElementStyle::default());
        assert!(line.hit_test(Point::new(50.0, 4.0), 1.0));
        assert!(!line.hit_test(Point::new(50.0, 6.0), 1.0));
        assert!(line.hit_test(Point::new(50.0, 9.0), 0.5));
    }
}
