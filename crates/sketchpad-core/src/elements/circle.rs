//! Circle shape.

use super::{ElementId, ElementShape, ElementStyle, ElementTransform, HIT_PADDING};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle given by its center and a point on its rim.
///
/// The radius is always derived from the two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ElementId,
    /// Center point.
    pub start: Point,
    /// Point on the circumference.
    pub end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub transform: ElementTransform,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, rim: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: center,
            end: rim,
            style,
            transform: ElementTransform::default(),
        }
    }

    pub fn center(&self) -> Point {
        self.start
    }

    pub fn radius(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Move the rim point so the radius becomes `radius`, keeping its direction.
    pub fn set_radius(&mut self, radius: f64) {
        let offset = self.end - self.start;
        let len = offset.hypot();
        let dir = if len > f64::EPSILON {
            offset / len
        } else {
            Vec2::new(1.0, 0.0)
        };
        self.end = self.start + dir * radius;
    }
}

impl ElementShape for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.start.x - r,
            self.start.y - r,
            self.start.x + r,
            self.start.y + r,
        )
    }

    fn hit_test(&self, point: Point, zoom: f64) -> bool {
        self.start.distance(point) <= self.radius() + HIT_PADDING / zoom
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
    fn test_radius_derived() {
        let c = Circle::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0), ElementStyle::default());
        assert!((c.radius() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_radius_keeps_direction() {
        let mut c = Circle::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0), ElementStyle::default());
        c.set_radius(10.0);
        assert!((c.end.x - 6.0).abs() < 1e-9);
        assert!((c.end.y - 8.0).abs() < 1e-9);

        let mut degenerate = Circle::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0), ElementStyle::default());
        degenerate.set_radius(4.0);
        assert_eq!(degenerate.end, Point::new(5.0, 1.0));
    }

    #[test]
    fn test_hit_test_tolerance() {
        let c = Circle::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), ElementStyle::default());
        assert!(c.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(c.hit_test(Point::new(15.0, 0.0), 1.0));
        assert!(!c.hit_test(Point::new(15.5, 0.0), 1.0));
        assert!(c.hit_test(Point::new(19.0, 0.0), 0.5));
    }

    #[test]
    fn test_bounds() {
        let c = Circle::new(Point::new(50.0, 50.0), Point::new(50.0, 80.0), ElementStyle::default());
        assert_eq!(c.bounds(), Rect::new(20.0, 20.0, 80.0, 80.0));
    }
}
