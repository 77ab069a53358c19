//! Copy, paste and duplicate.

use crate::elements::DrawingElement;
use crate::snap::Grid;
use kurbo::{Point, Vec2};

/// Default per-element paste stagger in world units.
pub const PASTE_STAGGER: f64 = 10.0;
/// Default duplicate offset in world units.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Deep copies of elements waiting to be pasted.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: Vec<DrawingElement>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents.
    pub fn copy<'a>(&mut self, elements: impl IntoIterator<Item = &'a DrawingElement>) {
        self.items = elements.into_iter().cloned().collect();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[DrawingElement] {
        &self.items
    }

    /// Fresh copies of the clipboard, placed at `anchor`.
    ///
    /// Element `i` has its bounding-box origin moved to `anchor + i * stagger`
    /// on both axes, then snapped. The clipboard itself is left untouched
    /// so the same contents can be pasted again.
    pub fn paste_at(&self, anchor: Point, stagger: f64, grid: &Grid) -> Vec<DrawingElement> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let offset = stagger * i as f64;
                let target = anchor + Vec2::new(offset, offset);
                let mut element = item.clone();
                element.regenerate_id();
                element.translate(target - element.bounding_box().origin());
                snap_origin(&mut element, grid);
                element
            })
            .collect()
    }
}

/// Fresh copies of `elements` shifted by `offset`, then snapped.
pub fn duplicate<'a>(
    elements: impl IntoIterator<Item = &'a DrawingElement>,
    offset: Vec2,
    grid: &Grid,
) -> Vec<DrawingElement> {
    elements
        .into_iter()
        .map(|original| {
            let mut element = original.clone();
            element.regenerate_id();
            element.translate(offset);
            snap_origin(&mut element, grid);
            element
        })
        .collect()
}

fn snap_origin(element: &mut DrawingElement, grid: &Grid) {
    if grid.snap_enabled {
        let shift = grid.snap_offset(element.bounding_box().origin());
        element.translate(shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Rectangle, Stroke};
    use kurbo::Rect;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawingElement {
        DrawingElement::Rectangle(Rectangle::new(
            Point::new(x0, y0),
            Point::new(x1, y1),
            ElementStyle::default(),
        ))
    }

    #[test]
    fn test_paste_empty_is_empty() {
        let clipboard = Clipboard::new();
        assert!(clipboard.paste_at(Point::ZERO, PASTE_STAGGER, &Grid::default()).is_empty());
    }

    #[test]
    fn test_paste_staggers_and_renews_ids() {
        let a = rect(100.0, 100.0, 120.0, 110.0);
        let b = rect(300.0, 300.0, 310.0, 330.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy([&a, &b]);

        let pasted = clipboard.paste_at(Point::new(50.0, 50.0), PASTE_STAGGER, &Grid::default());
        assert_eq!(pasted.len(), 2);
        assert_eq!(pasted[0].bounding_box(), Rect::new(50.0, 50.0, 70.0, 60.0));
        assert_eq!(pasted[1].bounding_box(), Rect::new(60.0, 60.0, 70.0, 90.0));
        assert_ne!(pasted[0].id(), a.id());
        assert_ne!(pasted[1].id(), b.id());

        // Pasting twice yields distinct ids again.
        let again = clipboard.paste_at(Point::new(50.0, 50.0), PASTE_STAGGER, &Grid::default());
        assert_ne!(again[0].id(), pasted[0].id());
    }

    #[test]
    fn test_paste_snaps_when_enabled() {
        let mut clipboard = Clipboard::new();
        clipboard.copy([&rect(0.0, 0.0, 10.0, 10.0)]);
        let grid = Grid::new(20.0, true, true);
        let pasted = clipboard.paste_at(Point::new(33.0, 47.0), PASTE_STAGGER, &grid);
        assert_eq!(pasted[0].bounding_box().origin(), Point::new(40.0, 40.0));
    }

    #[test]
    fn test_copy_is_deep() {
        let stroke = DrawingElement::Stroke(
            Stroke::from_points(vec![Point::ZERO, Point::new(5.0, 5.0)], ElementStyle::default())
                .unwrap(),
        );
        let mut clipboard = Clipboard::new();
        clipboard.copy([&stroke]);
        let pasted = clipboard.paste_at(Point::new(10.0, 10.0), PASTE_STAGGER, &Grid::default());
        let DrawingElement::Stroke(s) = &pasted[0] else {
            panic!("Expected Stroke");
        };
        assert_eq!(s.points(), &[Point::new(10.0, 10.0), Point::new(15.0, 15.0)]);
        assert_eq!(clipboard.items()[0], stroke);
    }

    #[test]
    fn test_duplicate_offsets_from_original() {
        let original = rect(10.0, 10.0, 50.0, 40.0);
        let copies = duplicate([&original], DUPLICATE_OFFSET, &Grid::default());
        assert_eq!(copies[0].bounding_box(), Rect::new(30.0, 30.0, 70.0, 60.0));
        assert_ne!(copies[0].id(), original.id());
    }
}
