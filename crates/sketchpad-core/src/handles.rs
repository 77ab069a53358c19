//! Resize handle resolution and resize application.

use crate::elements::{Circle, DrawingElement, ElementId, Line, Rectangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;
/// Smallest handle tolerance in world units, however far the view is zoomed in.
pub const MIN_HANDLE_TOLERANCE: f64 = 4.0;

/// One of the eight compass-point resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl ResizeHandle {
    /// Resolution order: corners before edges, so corners win where they overlap.
    pub const PRIORITY: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SE,
        ResizeHandle::SW,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::NE | ResizeHandle::SE | ResizeHandle::SW | ResizeHandle::NW
        )
    }

    /// Angle of this handle on a circle's rim, y axis pointing down.
    fn rim_angle_degrees(self) -> f64 {
        match self {
            ResizeHandle::E => 0.0,
            ResizeHandle::SE => 45.0,
            ResizeHandle::S => 90.0,
            ResizeHandle::SW => 135.0,
            ResizeHandle::W => 180.0,
            ResizeHandle::NW => 225.0,
            ResizeHandle::N => 270.0,
            ResizeHandle::NE => 315.0,
        }
    }
}

/// A handle position for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub element: ElementId,
    pub handle: ResizeHandle,
    /// Position in world coordinates, with the element's transform applied.
    pub position: Point,
}

/// World-space tolerance for handle hits at the given zoom.
pub fn handle_tolerance(zoom: f64) -> f64 {
    (HANDLE_HIT_TOLERANCE / zoom).max(MIN_HANDLE_TOLERANCE)
}

/// Handle anchor in the element's untransformed space.
///
/// Lines and rectangles use their raw `start`/`end` fields, not the normalized
/// box, so a handle follows its field when the shape is dragged inside out.
pub fn handle_anchor(element: &DrawingElement, handle: ResizeHandle) -> Option<Point> {
    match element {
        DrawingElement::Line(Line { start, end, .. })
        | DrawingElement::Rectangle(Rectangle { start, end, .. }) => {
            let mid_x = (start.x + end.x) / 2.0;
            let mid_y = (start.y + end.y) / 2.0;
            Some(match handle {
                ResizeHandle::NW => *start,
                ResizeHandle::SE => *end,
                ResizeHandle::NE => Point::new(end.x, start.y),
                ResizeHandle::SW => Point::new(start.x, end.y),
                ResizeHandle::N => Point::new(mid_x, start.y),
                ResizeHandle::S => Point::new(mid_x, end.y),
                ResizeHandle::W => Point::new(start.x, mid_y),
                ResizeHandle::E => Point::new(end.x, mid_y),
            })
        }
        DrawingElement::Circle(circle) => {
            let angle = handle.rim_angle_degrees().to_radians();
            let r = circle.radius();
            let c = circle.center();
            Some(Point::new(c.x + r * angle.cos(), c.y + r * angle.sin()))
        }
        DrawingElement::Stroke(_) | DrawingElement::Text(_) => None,
    }
}

/// Handle markers for one element, positioned as drawn.
pub fn handle_markers(element: &DrawingElement) -> Vec<HandleMarker> {
    let transform = element.render_transform();
    ResizeHandle::PRIORITY
        .iter()
        .filter_map(|&handle| {
            handle_anchor(element, handle).map(|anchor| HandleMarker {
                element: element.id(),
                handle,
                position: transform * anchor,
            })
        })
        .collect()
}

/// Find which handle (if any) sits under a world point.
///
/// Always `None` for text and strokes.
pub fn resize_handle(point: Point, element: &DrawingElement, zoom: f64) -> Option<ResizeHandle> {
    if !element.is_resizable() {
        return None;
    }
    let local = element.to_local(point);
    let tolerance = handle_tolerance(zoom);
    ResizeHandle::PRIORITY.into_iter().find(|&handle| {
        handle_anchor(element, handle).is_some_and(|anchor| {
            (local.x - anchor.x).abs() <= tolerance && (local.y - anchor.y).abs() <= tolerance
        })
    })
}

/// Drag a handle to `pointer`, given in the element's untransformed space.
///
/// Rectangles and lines take the pointer coordinate(s) on the handle's side
/// verbatim, so dragging past the opposite side turns the shape inside out.
/// Circles keep their center and take a new radius.
pub fn apply_resize(element: &mut DrawingElement, handle: ResizeHandle, pointer: Point) {
    match element {
        DrawingElement::Line(Line { start, end, .. })
        | DrawingElement::Rectangle(Rectangle { start, end, .. }) => match handle {
            ResizeHandle::NW => *start = pointer,
            ResizeHandle::SE => *end = pointer,
            ResizeHandle::NE => {
                end.x = pointer.x;
                start.y = pointer.y;
            }
            ResizeHandle::SW => {
                start.x = pointer.x;
                end.y = pointer.y;
            }
            ResizeHandle::N => start.y = pointer.y,
            ResizeHandle::S => end.y = pointer.y,
            ResizeHandle::W => start.x = pointer.x,
            ResizeHandle::E => end.x = pointer.x,
        },
        DrawingElement::Circle(circle) => resize_circle(circle, handle, pointer),
        DrawingElement::Stroke(_) | DrawingElement::Text(_) => {}
    }
}

fn resize_circle(circle: &mut Circle, handle: ResizeHandle, pointer: Point) {
    let center = circle.center();
    let radius = match handle {
        ResizeHandle::N | ResizeHandle::S => (pointer.y - center.y).abs(),
        ResizeHandle::E | ResizeHandle::W => (pointer.x - center.x).abs(),
        _ => center.distance(pointer),
    };
    circle.set_radius(radius);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Stroke, Text};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawingElement {
        DrawingElement::Rectangle(Rectangle::new(
            Point::new(x0, y0),
            Point::new(x1, y1),
            ElementStyle::default(),
        ))
    }

    fn circle(r: f64) -> DrawingElement {
        DrawingElement::Circle(Circle::new(Point::ZERO, Point::new(r, 0.0), ElementStyle::default()))
    }

    #[test]
    fn test_tolerance_floor() {
        assert!((handle_tolerance(1.0) - 8.0).abs() < f64::EPSILON);
        assert!((handle_tolerance(0.5) - 16.0).abs() < f64::EPSILON);
        assert!((handle_tolerance(4.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_handles() {
        let r = rect(0.0, 0.0, 100.0, 50.0);
        assert_eq!(resize_handle(Point::new(2.0, -3.0), &r, 1.0), Some(ResizeHandle::NW));
        assert_eq!(resize_handle(Point::new(100.0, 50.0), &r, 1.0), Some(ResizeHandle::SE));
        assert_eq!(resize_handle(Point::new(100.0, 0.0), &r, 1.0), Some(ResizeHandle::NE));
        assert_eq!(resize_handle(Point::new(0.0, 50.0), &r, 1.0), Some(ResizeHandle::SW));
        assert_eq!(resize_handle(Point::new(50.0, 0.0), &r, 1.0), Some(ResizeHandle::N));
        assert_eq!(resize_handle(Point::new(100.0, 25.0), &r, 1.0), Some(ResizeHandle::E));
        assert_eq!(resize_handle(Point::new(50.0, 25.0), &r, 1.0), None);
        // Outside the tolerance box on one axis.
        assert_eq!(resize_handle(Point::new(9.0, 0.0), &r, 1.0), None);
    }

    #[test]
    fn test_corner_wins_over_edge() {
        // Tiny rectangle: every handle is within tolerance of the pointer.
        let r = rect(0.0, 0.0, 4.0, 4.0);
        assert_eq!(resize_handle(Point::new(1.0, 1.0), &r, 1.0), Some(ResizeHandle::NW));
    }

    #[test]
    fn test_handles_follow_raw_fields() {
        // Drawn right to left: `start` is the right-hand corner.
        let r = rect(100.0, 0.0, 0.0, 50.0);
        assert_eq!(resize_handle(Point::new(100.0, 0.0), &r, 1.0), Some(ResizeHandle::NW));
    }

    #[test]
    fn test_no_handles_for_text_or_stroke() {
        let text = DrawingElement::Text(Text::new(Point::ZERO, "x".into(), &ElementStyle::default()));
        let stroke = DrawingElement::Stroke(Stroke::new(Point::ZERO, ElementStyle::default()));
        assert_eq!(resize_handle(Point::ZERO, &text, 1.0), None);
        assert_eq!(resize_handle(Point::ZERO, &stroke, 1.0), None);
        assert!(handle_markers(&text).is_empty());
    }

    #[test]
    fn test_circle_handles_on_rim() {
        let c = circle(50.0);
        assert_eq!(resize_handle(Point::new(50.0, 0.0), &c, 1.0), Some(ResizeHandle::E));
        assert_eq!(resize_handle(Point::new(0.0, -50.0), &c, 1.0), Some(ResizeHandle::N));
        let d = 50.0 / 2.0_f64.sqrt();
        assert_eq!(resize_handle(Point::new(d, d), &c, 1.0), Some(ResizeHandle::SE));
        assert_eq!(handle_markers(&c).len(), 8);
    }

    fn marker_at(element: &DrawingElement, handle: ResizeHandle) -> Point {
        handle_markers(element)
            .into_iter()
            .find(|m| m.handle == handle)
            .map(|m| m.position)
            .unwrap()
    }

    #[test]
    fn test_rotated_rectangle_handles_where_drawn() {
        // Quarter turn about (50, 25): drawn box spans x 25..75, y -25..75.
        let mut r = rect(0.0, 0.0, 100.0, 50.0);
        r.transform_mut().rotation_degrees = 90.0;

        assert_eq!(resize_handle(Point::new(75.0, -25.0), &r, 1.0), Some(ResizeHandle::NW));
        assert_eq!(resize_handle(Point::new(25.0, 75.0), &r, 1.0), Some(ResizeHandle::SE));
        assert_eq!(resize_handle(Point::new(75.0, 25.0), &r, 1.0), Some(ResizeHandle::N));
        // The unrotated corner position is empty space now.
        assert_eq!(resize_handle(Point::new(100.0, 50.0), &r, 1.0), None);

        let nw = marker_at(&r, ResizeHandle::NW);
        assert!((nw - Point::new(75.0, -25.0)).hypot() < 1e-9);
        let se = marker_at(&r, ResizeHandle::SE);
        assert!((se - Point::new(25.0, 75.0)).hypot() < 1e-9);
        let drawn = r.visual_bounds().inflate(1e-9, 1e-9);
        assert!(handle_markers(&r).iter().all(|m| drawn.contains(m.position)));
    }

    #[test]
    fn test_flipped_rectangle_swaps_corners() {
        let mut r = rect(0.0, 0.0, 100.0, 50.0);
        assert_eq!(resize_handle(Point::new(100.0, 0.0), &r, 1.0), Some(ResizeHandle::NE));
        r.transform_mut().flip_x = true;
        assert_eq!(resize_handle(Point::new(100.0, 0.0), &r, 1.0), Some(ResizeHandle::NW));
        assert_eq!(resize_handle(Point::new(0.0, 0.0), &r, 1.0), Some(ResizeHandle::NE));
        let nw = marker_at(&r, ResizeHandle::NW);
        assert!((nw - Point::new(100.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_line_handles_and_resize() {
        let mut line = DrawingElement::Line(Line::new(
            Point::ZERO,
            Point::new(40.0, 30.0),
            ElementStyle::default(),
        ));
        assert_eq!(resize_handle(Point::new(41.0, 29.0), &line, 1.0), Some(ResizeHandle::SE));
        assert_eq!(resize_handle(Point::new(-2.0, 1.0), &line, 1.0), Some(ResizeHandle::NW));
        assert_eq!(handle_markers(&line).len(), 8);

        apply_resize(&mut line, ResizeHandle::SE, Point::new(60.0, 10.0));
        let DrawingElement::Line(inner) = &line else {
            panic!("Expected Line");
        };
        assert_eq!(inner.start, Point::ZERO);
        assert_eq!(inner.end, Point::new(60.0, 10.0));
    }

    #[test]
    fn test_corner_resize_can_flip() {
        let mut r = rect(0.0, 0.0, 100.0, 50.0);
        apply_resize(&mut r, ResizeHandle::SE, Point::new(-20.0, -10.0));
        let DrawingElement::Rectangle(inner) = &r else {
            panic!("Expected Rectangle");
        };
        assert_eq!(inner.end, Point::new(-20.0, -10.0));
        assert_eq!(r.bounding_box(), kurbo::Rect::new(-20.0, -10.0, 0.0, 0.0));
    }

    #[test]
    fn test_edge_resize_sets_one_coordinate() {
        let mut r = rect(0.0, 0.0, 100.0, 50.0);
        apply_resize(&mut r, ResizeHandle::E, Point::new(140.0, 999.0));
        apply_resize(&mut r, ResizeHandle::N, Point::new(999.0, -5.0));
        let DrawingElement::Rectangle(inner) = &r else {
            panic!("Expected Rectangle");
        };
        assert_eq!(inner.start, Point::new(0.0, -5.0));
        assert_eq!(inner.end, Point::new(140.0, 50.0));
    }

    #[test]
    fn test_ne_resize() {
        let mut r = rect(0.0, 0.0, 100.0, 50.0);
        apply_resize(&mut r, ResizeHandle::NE, Point::new(120.0, -10.0));
        assert_eq!(r.bounding_box(), kurbo::Rect::new(0.0, -10.0, 120.0, 50.0));
    }

    #[test]
    fn test_circle_cardinal_resize_uses_axis() {
        let mut c = circle(10.0);
        apply_resize(&mut c, ResizeHandle::E, Point::new(25.0, 40.0));
        let DrawingElement::Circle(inner) = &c else {
            panic!("Expected Circle");
        };
        assert!((inner.radius() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_diagonal_resize_uses_distance() {
        let mut c = circle(10.0);
        apply_resize(&mut c, ResizeHandle::NE, Point::new(6.0, -8.0));
        let DrawingElement::Circle(inner) = &c else {
            panic!("Expected Circle");
        };
        assert!((inner.radius() - 10.0).abs() < 1e-9);
        assert_eq!(inner.center(), Point::ZERO);
    }
}
