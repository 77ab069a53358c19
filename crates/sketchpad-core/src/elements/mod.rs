//! Drawing element definitions.
//!
//! Every element lives in world coordinates. The store orders them
//! back to front; the variants below carry only what their geometry needs,
//! everything else (bounds, hit areas, radius) is derived on demand.

mod circle;
mod line;
mod rectangle;
mod stroke;
mod text;

pub use circle::Circle;
pub use line::Line;
pub use rectangle::Rectangle;
pub use stroke::Stroke;
pub use text::Text;

use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Padding around lines, rectangles and circles accepted as a hit, in screen pixels.
pub const HIT_PADDING: f64 = 5.0;

/// Radius around each recorded stroke point accepted as a hit, in screen pixels.
pub const STROKE_HIT_RADIUS: f64 = 10.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke properties shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color.
    pub color: SerializableColor,
    /// Line width in world units.
    pub line_width: f64,
}

impl ElementStyle {
    pub fn new(color: SerializableColor, line_width: f64) -> Self {
        Self { color, line_width }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            line_width: 2.0,
        }
    }
}

/// Rotation and mirroring applied around an element's center at render time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementTransform {
    /// Cumulative rotation in degrees. Never normalized.
    pub rotation_degrees: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl ElementTransform {
    pub fn is_identity(&self) -> bool {
        self.rotation_degrees == 0.0 && !self.flip_x && !self.flip_y
    }

    /// The world-space affine for this transform pivoting on `center`.
    ///
    /// Mirroring happens first, then rotation.
    pub fn about(&self, center: Point) -> Affine {
        if self.is_identity() {
            return Affine::IDENTITY;
        }
        let sx = if self.flip_x { -1.0 } else { 1.0 };
        let sy = if self.flip_y { -1.0 } else { 1.0 };
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.rotation_degrees.to_radians())
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate(-center.to_vec2())
    }
}

/// Discriminant of [`DrawingElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Stroke,
    Line,
    Rectangle,
    Circle,
    Text,
}

/// Common behavior of all element variants.
pub trait ElementShape {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Untransformed bounding box in world coordinates, always normalized.
    fn bounds(&self) -> Rect;

    /// Check if a point in the element's own (untransformed) space hits it.
    fn hit_test(&self, point: Point, zoom: f64) -> bool;

    /// Translate every stored coordinate.
    fn translate(&mut self, delta: Vec2);

    /// Reference point used for snapping and placement.
    fn anchor(&self) -> Point;

    fn style(&self) -> &ElementStyle;

    fn style_mut(&mut self) -> &mut ElementStyle;

    fn transform(&self) -> &ElementTransform;

    fn transform_mut(&mut self) -> &mut ElementTransform;
}

/// Tagged union of everything that can be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawingElement {
    Stroke(Stroke),
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
}

impl DrawingElement {
    fn shape(&self) -> &dyn ElementShape {
        match self {
            DrawingElement::Stroke(s) => s,
            DrawingElement::Line(s) => s,
            DrawingElement::Rectangle(s) => s,
            DrawingElement::Circle(s) => s,
            DrawingElement::Text(s) => s,
        }
    }

    fn shape_mut(&mut self) -> &mut dyn ElementShape {
        match self {
            DrawingElement::Stroke(s) => s,
            DrawingElement::Line(s) => s,
            DrawingElement::Rectangle(s) => s,
            DrawingElement::Circle(s) => s,
            DrawingElement::Text(s) => s,
        }
    }

    pub fn id(&self) -> ElementId {
        self.shape().id()
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            DrawingElement::Stroke(_) => ElementKind::Stroke,
            DrawingElement::Line(_) => ElementKind::Line,
            DrawingElement::Rectangle(_) => ElementKind::Rectangle,
            DrawingElement::Circle(_) => ElementKind::Circle,
            DrawingElement::Text(_) => ElementKind::Text,
        }
    }

    /// Normalized, untransformed bounding box.
    pub fn bounding_box(&self) -> Rect {
        self.shape().bounds()
    }

    /// Pivot for rotation and mirroring.
    pub fn center(&self) -> Point {
        self.bounding_box().center()
    }

    /// World-space transform the renderer applies to this element.
    pub fn render_transform(&self) -> Affine {
        self.transform().about(self.center())
    }

    /// Axis-aligned box around the element as it is drawn.
    pub fn visual_bounds(&self) -> Rect {
        let bounds = self.bounding_box();
        if self.transform().is_identity() {
            return bounds;
        }
        self.render_transform().transform_rect_bbox(bounds)
    }

    /// Map a world point into the element's untransformed space.
    pub fn to_local(&self, point: Point) -> Point {
        if self.transform().is_identity() {
            return point;
        }
        self.render_transform().inverse() * point
    }

    /// Check if a world point hits the element as drawn.
    pub fn hit_test(&self, point: Point, zoom: f64) -> bool {
        self.shape().hit_test(self.to_local(point), zoom)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.shape_mut().translate(delta);
    }

    pub fn anchor(&self) -> Point {
        self.shape().anchor()
    }

    pub fn style(&self) -> &ElementStyle {
        self.shape().style()
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        self.shape_mut().style_mut()
    }

    pub fn transform(&self) -> &ElementTransform {
        self.shape().transform()
    }

    pub fn transform_mut(&mut self) -> &mut ElementTransform {
        self.shape_mut().transform_mut()
    }

    /// Replace the identifier with a fresh one (used when copying elements).
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            DrawingElement::Stroke(s) => s.id = new_id,
            DrawingElement::Line(s) => s.id = new_id,
            DrawingElement::Rectangle(s) => s.id = new_id,
            DrawingElement::Circle(s) => s.id = new_id,
            DrawingElement::Text(s) => s.id = new_id,
        }
    }

    /// Whether the element exposes resize handles.
    pub fn is_resizable(&self) -> bool {
        matches!(
            self,
            DrawingElement::Line(_) | DrawingElement::Rectangle(_) | DrawingElement::Circle(_)
        )
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            DrawingElement::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            DrawingElement::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Rectangle spanned by two corners given in any order.
pub fn normalized_rect(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Closed containment test; kurbo's `Rect::contains` excludes the far edges.
pub fn rect_contains_point(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// True when `inner` lies entirely within `outer`, edges included.
pub fn rect_contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}
