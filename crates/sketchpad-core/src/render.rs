//! Per-frame view of the editor for rendering backends.

use crate::camera::Camera;
use crate::elements::{DrawingElement, ElementId};
use crate::handles::HandleMarker;
use crate::selection::Selection;
use crate::snap::Grid;
use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

/// Everything a renderer needs to draw one frame. Borrowed, never mutated.
pub struct RenderFrame<'a> {
    /// Elements back to front.
    pub elements: &'a [DrawingElement],
    pub selection: &'a Selection,
    /// Resize handles of selected resizable elements, in world coordinates.
    pub handles: Vec<HandleMarker>,
    /// Box-selection marquee in world coordinates.
    pub selection_rect: Option<Rect>,
    pub camera: &'a Camera,
    pub grid: &'a Grid,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    pub background_color: Color,
    pub selection_color: Color,
}

impl<'a> RenderFrame<'a> {
    pub fn new(
        elements: &'a [DrawingElement],
        selection: &'a Selection,
        camera: &'a Camera,
        grid: &'a Grid,
        viewport_size: Size,
    ) -> Self {
        Self {
            elements,
            selection,
            handles: Vec::new(),
            selection_rect: None,
            camera,
            grid,
            viewport_size,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    pub fn with_handles(mut self, handles: Vec<HandleMarker>) -> Self {
        self.handles = handles;
        self
    }

    pub fn with_selection_rect(mut self, rect: Option<Rect>) -> Self {
        self.selection_rect = rect;
        self
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selection.contains(id)
    }

    /// World to screen.
    pub fn view_transform(&self) -> Affine {
        self.camera.transform()
    }

    /// Full transform for drawing an element: its own rotation and flips
    /// about its center, then the view.
    pub fn element_transform(&self, element: &DrawingElement) -> Affine {
        self.view_transform() * element.render_transform()
    }

    /// Corner radius for rectangles at the current zoom, zero for other elements.
    pub fn corner_radius(&self, element: &DrawingElement) -> f64 {
        match element {
            DrawingElement::Rectangle(rect) => rect.corner_radius(self.camera.zoom()),
            _ => 0.0,
        }
    }

    /// Grid lines covering the viewport, or `None` when the grid is hidden.
    pub fn grid_lines(&self) -> Option<GridLines> {
        let cell = self.grid.cell_size;
        if !self.grid.visible || !cell.is_finite() || cell <= 0.0 {
            return None;
        }
        let inv = self.camera.inverse_transform();
        let top_left = inv * Point::ZERO;
        let bottom_right = inv * Point::new(self.viewport_size.width, self.viewport_size.height);

        let start_x = (top_left.x / cell).floor() as i64;
        let start_y = (top_left.y / cell).floor() as i64;
        let end_x = (bottom_right.x / cell).ceil() as i64;
        let end_y = (bottom_right.y / cell).ceil() as i64;

        Some(GridLines {
            bounds: Rect::new(
                start_x as f64 * cell,
                start_y as f64 * cell,
                end_x as f64 * cell,
                end_y as f64 * cell,
            ),
            xs: (start_x..=end_x).map(|i| i as f64 * cell).collect(),
            ys: (start_y..=end_y).map(|i| i as f64 * cell).collect(),
        })
    }
}

/// Grid line positions in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    /// World-space area the lines span.
    pub bounds: Rect,
    /// Vertical line x positions.
    pub xs: Vec<f64>,
    /// Horizontal line y positions.
    pub ys: Vec<f64>,
}

/// Trait for rendering backends.
///
/// The editor hands a frame to the backend after every state-changing event.
pub trait Renderer {
    /// Draw the whole frame.
    fn render(&mut self, frame: &RenderFrame);

    fn background_color(&self, frame: &RenderFrame) -> Color {
        frame.background_color
    }
}
