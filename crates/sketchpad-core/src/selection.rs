//! Selection set.

use crate::elements::ElementId;
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};

/// The ids of the selected elements, in the order they were selected.
///
/// Holds references only; the elements themselves stay in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Select exactly one element.
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection wholesale.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        self.extend(ids);
    }

    /// Add elements not already selected.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        for id in ids {
            self.add(id);
        }
    }

    pub fn add(&mut self, id: ElementId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != before
    }

    /// Flip membership of one element.
    pub fn toggle(&mut self, id: ElementId) {
        if !self.remove(id) {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer exist in the store.
    pub fn retain_existing(&mut self, store: &ElementStore) {
        self.ids.retain(|&id| store.contains(id));
    }

    /// Selected ids ordered front to back by z-order.
    pub fn front_to_back(&self, store: &ElementStore) -> Vec<ElementId> {
        store
            .iter()
            .rev()
            .map(|e| e.id())
            .filter(|id| self.contains(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{DrawingElement, ElementStyle, Line};
    use kurbo::Point;
    use uuid::Uuid;

    #[test]
    fn test_toggle_membership() {
        let mut selection = Selection::new();
        let id = Uuid::new_v4();
        selection.toggle(id);
        assert!(selection.contains(id));
        selection.toggle(id);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_extend_skips_duplicates() {
        let mut selection = Selection::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        selection.select(a);
        selection.extend([a, b, b]);
        assert_eq!(selection.ids(), &[a, b]);

        selection.replace([b]);
        assert_eq!(selection.ids(), &[b]);
    }

    #[test]
    fn test_retain_existing_and_z_order() {
        let mut store = ElementStore::new();
        let line = |x: f64| {
            DrawingElement::Line(Line::new(Point::new(x, 0.0), Point::new(x + 1.0, 1.0), ElementStyle::default()))
        };
        let a = store.push(line(0.0));
        let b = store.push(line(5.0));
        let ghost = Uuid::new_v4();

        let mut selection = Selection::new();
        selection.extend([a, ghost, b]);
        selection.retain_existing(&store);
        assert_eq!(selection.ids(), &[a, b]);
        assert_eq!(selection.front_to_back(&store), vec![b, a]);
    }
}
