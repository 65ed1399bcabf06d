//! Selection: the set of shape ids targeted for bulk operations.

use crate::document::Document;
use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};

/// An ordered set of selected shape ids.
///
/// Holds identifiers only, never shapes; membership must stay a subset of
/// the document's live ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with a single id.
    pub fn select_only(&mut self, id: ShapeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add an id to the selection.
    pub fn insert(&mut self, id: ShapeId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Toggle membership of an id.
    pub fn toggle(&mut self, id: ShapeId) {
        if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Remove an id. Returns true if it was selected.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        let len = self.ids.len();
        self.ids.retain(|&s| s != id);
        self.ids.len() != len
    }

    /// Clear the selection. Returns true if it was non-empty.
    pub fn clear(&mut self) -> bool {
        let was_empty = self.ids.is_empty();
        self.ids.clear();
        !was_empty
    }

    /// Check membership.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    /// The selected ids, in selection order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    /// Add multiple ids.
    pub fn extend(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        for id in ids {
            self.insert(id);
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop ids no longer present in the document. Called after undo/redo to
    /// keep Selection a subset of the document.
    pub fn retain_existing(&mut self, document: &Document) {
        self.ids.retain(|&id| document.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Shape};
    use kurbo::Point;

    #[test]
    fn test_insert_is_set_like() {
        let mut sel = Selection::new();
        let id = ShapeId::new_v4();
        sel.insert(id);
        sel.insert(id);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut sel = Selection::new();
        let id = ShapeId::new_v4();
        sel.toggle(id);
        assert!(sel.contains(id));
        sel.toggle(id);
        assert!(!sel.contains(id));
    }

    #[test]
    fn test_select_only_replaces() {
        let mut sel = Selection::new();
        sel.insert(ShapeId::new_v4());
        sel.insert(ShapeId::new_v4());
        let id = ShapeId::new_v4();
        sel.select_only(id);
        assert_eq!(sel.ids(), &[id]);
    }

    #[test]
    fn test_retain_existing() {
        let mut doc = Document::new();
        let live = doc.add(Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 0.0))));
        let dead = ShapeId::new_v4();

        let mut sel = Selection::new();
        sel.insert(live);
        sel.insert(dead);
        sel.retain_existing(&doc);
        assert_eq!(sel.ids(), &[live]);
    }
}
