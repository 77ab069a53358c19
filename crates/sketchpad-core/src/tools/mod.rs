//! Tool selection and draw-gesture element construction.

use crate::elements::{Circle, DrawingElement, ElementStyle, Line, Rectangle, Stroke};
use crate::snap::Grid;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Line,
    Rectangle,
    Circle,
    Text,
    Eraser,
    Select,
    Move,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Pen,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Text,
        ToolKind::Eraser,
        ToolKind::Select,
        ToolKind::Move,
    ];

    /// Whether a pointer-down with this tool starts a draw gesture.
    pub fn creates_element(self) -> bool {
        matches!(
            self,
            ToolKind::Pen | ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle
        )
    }

    /// Whether pointer-down picks, moves and resizes elements.
    pub fn manipulates_selection(self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Move)
    }

    /// Single-letter keyboard shortcut.
    pub fn shortcut(self) -> char {
        match self {
            ToolKind::Pen => 'p',
            ToolKind::Line => 'l',
            ToolKind::Rectangle => 'r',
            ToolKind::Circle => 'c',
            ToolKind::Text => 't',
            ToolKind::Eraser => 'e',
            ToolKind::Select => 's',
            ToolKind::Move => 'm',
        }
    }

    pub fn from_shortcut(c: char) -> Option<ToolKind> {
        let c = c.to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.shortcut() == c)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Line => "line",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
            ToolKind::Eraser => "eraser",
            ToolKind::Select => "select",
            ToolKind::Move => "move",
        }
    }
}

/// The active tool and the style applied to new elements.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub current_style: ElementStyle,
}

impl ToolManager {
    pub fn new(style: ElementStyle) -> Self {
        Self {
            current_tool: ToolKind::default(),
            current_style: style,
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Create the in-progress element for a draw gesture starting at `point`.
    ///
    /// Returns `None` for tools that don't draw.
    pub fn begin(&self, point: Point) -> Option<DrawingElement> {
        let style = self.current_style.clone();
        let element = match self.current_tool {
            ToolKind::Pen => DrawingElement::Stroke(Stroke::new(point, style)),
            ToolKind::Line => DrawingElement::Line(Line::new(point, point, style)),
            ToolKind::Rectangle => DrawingElement::Rectangle(Rectangle::new(point, point, style)),
            ToolKind::Circle => DrawingElement::Circle(Circle::new(point, point, style)),
            ToolKind::Text | ToolKind::Eraser | ToolKind::Select | ToolKind::Move => return None,
        };
        Some(element)
    }
}

/// Advance an in-progress element to the pointer.
///
/// Strokes append a point; two-point shapes move their `end`.
pub fn extend(element: &mut DrawingElement, point: Point) {
    match element {
        DrawingElement::Stroke(stroke) => stroke.add_point(point),
        DrawingElement::Line(Line { end, .. })
        | DrawingElement::Rectangle(Rectangle { end, .. })
        | DrawingElement::Circle(Circle { end, .. }) => *end = point,
        DrawingElement::Text(_) => {}
    }
}

/// Quantize a just-drawn element to the grid.
///
/// Two-point shapes snap each point; a stroke is shifted as a whole so its
/// first point lands on the grid.
pub fn snap_on_commit(element: &mut DrawingElement, grid: &Grid) {
    if !grid.snap_enabled {
        return;
    }
    match element {
        DrawingElement::Line(Line { start, end, .. })
        | DrawingElement::Rectangle(Rectangle { start, end, .. })
        | DrawingElement::Circle(Circle { start, end, .. }) => {
            *start = grid.snap(*start);
            *end = grid.snap(*end);
        }
        DrawingElement::Stroke(_) | DrawingElement::Text(_) => {
            let shift = grid.snap_offset(element.anchor());
            element.translate(shift);
        }
    }
}
