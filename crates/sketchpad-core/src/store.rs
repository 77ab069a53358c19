//! Authoritative, z-ordered element storage.

use crate::elements::{DrawingElement, ElementId, rect_contains_rect};
use kurbo::{Point, Rect};

/// Owns every element of the drawing.
///
/// Elements are kept back to front: the position in the sequence is the
/// z-order, so later elements are drawn on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    elements: Vec<DrawingElement>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of all others.
    pub fn push(&mut self, element: DrawingElement) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Remove an element, returning it if present.
    pub fn remove(&mut self, id: ElementId) -> Option<DrawingElement> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    /// Swap in a new version of an element, keeping its z-order.
    ///
    /// Returns the stored version, or `None` if no element has that id.
    pub fn replace(&mut self, element: DrawingElement) -> Option<&DrawingElement> {
        let index = self.position(element.id())?;
        self.elements[index] = element;
        Some(&self.elements[index])
    }

    pub fn get(&self, id: ElementId) -> Option<&DrawingElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut DrawingElement> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Index of an element in z-order.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Iterate back to front.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DrawingElement> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Replace the whole contents, e.g. when restoring history.
    pub(crate) fn restore(&mut self, elements: Vec<DrawingElement>) {
        self.elements = elements;
    }

    /// The front-most element hit at a world point.
    pub fn topmost_at(&self, point: Point, zoom: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, zoom))
            .map(DrawingElement::id)
    }

    /// Elements whose drawn bounds lie entirely inside `rect`, back to front.
    pub fn ids_within(&self, rect: Rect) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| rect_contains_rect(rect, e.visual_bounds()))
            .map(DrawingElement::id)
            .collect()
    }
}
