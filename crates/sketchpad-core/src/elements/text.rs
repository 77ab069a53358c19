//! Text label.

use super::{ElementId, ElementShape, ElementStyle, ElementTransform, rect_contains_point};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size per unit of line width at creation.
pub const FONT_SIZE_PER_LINE_WIDTH: f64 = 10.0;

/// Width of the box used for text bounds. Glyphs are never measured.
pub const NOMINAL_TEXT_WIDTH: f64 = 100.0;

/// A text label anchored at the left end of its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Baseline anchor.
    pub position: Point,
    pub content: String,
    /// Font size in world units.
    pub font_size: f64,
    pub style: ElementStyle,
    #[serde(default)]
    pub transform: ElementTransform,
}

impl Text {
    /// Create a label; the font size follows the style's line width.
    pub fn new(position: Point, content: String, style: &ElementStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: style.line_width * FONT_SIZE_PER_LINE_WIDTH,
            style: style.clone(),
            transform: ElementTransform::default(),
        }
    }
}

impl ElementShape for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + NOMINAL_TEXT_WIDTH,
            self.position.y,
        )
    }

    fn hit_test(&self, point: Point, _zoom: f64) -> bool {
        rect_contains_point(self.bounds(), point)
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn anchor(&self) -> Point {
        self.position
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
