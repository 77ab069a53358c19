//! Freehand pen stroke.

use super::{ElementId, ElementShape, ElementStyle, ElementTransform, STROKE_HIT_RADIUS};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand drawing (series of points).
///
/// `start` and `end` track the first and most recently appended points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: ElementId,
    /// Recorded path points, never empty.
    pub(crate) points: Vec<Point>,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub style: ElementStyle,
    #[serde(default)]
    pub transform: ElementTransform,
}

impl Stroke {
    /// Start a stroke at its first point.
    pub fn new(first: Point, style: ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![first],
            start: first,
            end: first,
            style,
            transform: ElementTransform::default(),
        }
    }

    /// Create from existing points. Returns `None` for an empty path.
    pub fn from_points(points: Vec<Point>, style: ElementStyle) -> Option<Self> {
        let start = *points.first()?;
        let end = *points.last()?;
        Some(Self {
            id: Uuid::new_v4(),
            points,
            start,
            end,
            style,
            transform: ElementTransform::default(),
        })
    }

    /// Append a point while the stroke is being drawn.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.end = point;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ElementShape for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }

    fn hit_test(&self, point: Point, zoom: f64) -> bool {
        // Only recorded samples count; the gap between two distant samples is a miss.
        let radius = STROKE_HIT_RADIUS / zoom;
        self.points.iter().any(|p| p.distance(point) <= radius)
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
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
