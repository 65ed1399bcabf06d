//! Reversible document mutations.
//!
//! Every edit to the [`Document`] is described by a [`Command`] holding the
//! state needed to both apply and invert itself. Commands snapshot shapes by
//! value at construction time, so undo restores exact coordinates rather
//! than recomputing them.

use crate::document::{Document, RemovedShape};
use crate::selection::Selection;
use crate::shapes::{Shape, ShapeId};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// One reversible document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Append a shape and select it.
    AddShape { shape: Shape },
    /// Remove shapes; entries record the removed shapes and their z
    /// positions so undo restores the exact order.
    DeleteShapes { entries: Vec<RemovedShape> },
    /// Translate shapes by a delta. Originals are pre-move snapshots so
    /// undo restores exact coordinates.
    MoveShapes {
        delta: Vec2,
        originals: Vec<(ShapeId, Shape)>,
    },
    /// Replace one shape's geometry (resize/reshape).
    ReshapeShape {
        id: ShapeId,
        before: Shape,
        after: Shape,
    },
}

impl Command {
    /// Command that adds `shape` to the document.
    pub fn add_shape(shape: Shape) -> Self {
        Command::AddShape { shape }
    }

    /// Command that deletes `ids`, snapshotting the affected shapes from the
    /// live document. Returns None when no listed id exists.
    pub fn delete_shapes(document: &Document, ids: &[ShapeId]) -> Option<Self> {
        let entries: Vec<RemovedShape> = document
            .iter()
            .enumerate()
            .filter(|(_, (id, _))| ids.contains(id))
            .map(|(index, (_, shape))| RemovedShape {
                index,
                shape: shape.clone(),
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(Command::DeleteShapes { entries })
    }

    /// Command that moves `ids` by `delta`. Returns None when no listed id
    /// exists or the delta is zero.
    pub fn move_shapes(document: &Document, ids: &[ShapeId], delta: Vec2) -> Option<Self> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        let originals: Vec<(ShapeId, Shape)> = document
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .map(|(id, shape)| (id, shape.clone()))
            .collect();
        if originals.is_empty() {
            return None;
        }
        Some(Command::MoveShapes { delta, originals })
    }

    /// Command that replaces the geometry of the shape `after.id()` refers
    /// to. Returns None when that shape is not in the document.
    pub fn reshape_shape(document: &Document, after: Shape) -> Option<Self> {
        let id = after.id();
        let before = document.get(id)?.clone();
        Some(Command::ReshapeShape { id, before, after })
    }

    /// Apply the mutation to the document, updating the selection where the
    /// command specifies selection changes.
    pub fn apply(&self, document: &mut Document, selection: &mut Selection) {
        match self {
            Command::AddShape { shape } => {
                let id = document.add(shape.clone());
                selection.select_only(id);
            }
            Command::DeleteShapes { entries } => {
                let ids: Vec<ShapeId> = entries.iter().map(|e| e.shape.id()).collect();
                document.remove(&ids);
                for id in ids {
                    selection.remove(id);
                }
            }
            Command::MoveShapes { delta, originals } => {
                for (id, original) in originals {
                    document.replace(*id, original.translated(*delta));
                }
            }
            Command::ReshapeShape { id, after, .. } => {
                document.replace(*id, after.clone());
            }
        }
    }

    /// Invert the mutation, restoring the document state that preceded
    /// [`Command::apply`].
    pub fn revert(&self, document: &mut Document, selection: &mut Selection) {
        match self {
            Command::AddShape { shape } => {
                let id = shape.id();
                document.remove(&[id]);
                selection.remove(id);
            }
            Command::DeleteShapes { entries } => {
                document.reinsert(entries.clone());
            }
            Command::MoveShapes { originals, .. } => {
                for (id, original) in originals {
                    document.replace(*id, original.clone());
                }
            }
            Command::ReshapeShape { id, before, .. } => {
                document.replace(*id, before.clone());
            }
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "AddShape",
            Command::DeleteShapes { .. } => "DeleteShapes",
            Command::MoveShapes { .. } => "MoveShapes",
            Command::ReshapeShape { .. } => "ReshapeShape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle};
    use kurbo::Point;

    fn line(x: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    #[test]
    fn test_add_shape_apply_revert() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let before = doc.clone();

        let shape = line(0.0);
        let id = shape.id();
        let cmd = Command::add_shape(shape);

        cmd.apply(&mut doc, &mut sel);
        assert!(doc.contains(id));
        assert_eq!(sel.ids(), &[id]);

        cmd.revert(&mut doc, &mut sel);
        assert_eq!(doc, before);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_delete_shapes_apply_revert_exact_order() {
        let mut doc = Document::new();
        let a = doc.add(line(0.0));
        let b = doc.add(line(20.0));
        let c = doc.add(line(40.0));
        let before = doc.clone();

        let mut sel = Selection::new();
        sel.extend([a, c]);

        let cmd = Command::delete_shapes(&doc, &[a, c]).unwrap();
        cmd.apply(&mut doc, &mut sel);
        assert_eq!(doc.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);
        assert!(sel.is_empty());

        cmd.revert(&mut doc, &mut sel);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_missing_ids_is_none() {
        let doc = Document::new();
        assert!(Command::delete_shapes(&doc, &[ShapeId::new_v4()]).is_none());
    }

    #[test]
    fn test_move_shapes_undo_is_exact() {
        let mut doc = Document::new();
        // Coordinates chosen to expose any add-then-subtract rounding
        let id = doc.add(line(0.1));
        let before = doc.clone();
        let mut sel = Selection::new();

        let cmd = Command::move_shapes(&doc, &[id], Vec2::new(0.3, 0.7)).unwrap();
        cmd.apply(&mut doc, &mut sel);
        assert_ne!(doc, before);

        cmd.revert(&mut doc, &mut sel);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_shapes_zero_delta_is_none() {
        let mut doc = Document::new();
        let id = doc.add(line(0.0));
        assert!(Command::move_shapes(&doc, &[id], Vec2::ZERO).is_none());
    }

    #[test]
    fn test_move_redo_matches_first_apply() {
        let mut doc = Document::new();
        let id = doc.add(line(0.0));
        let mut sel = Selection::new();

        let cmd = Command::move_shapes(&doc, &[id], Vec2::new(5.0, 5.0)).unwrap();
        cmd.apply(&mut doc, &mut sel);
        let after_first = doc.clone();

        cmd.revert(&mut doc, &mut sel);
        cmd.apply(&mut doc, &mut sel);
        assert_eq!(doc, after_first);
    }

    #[test]
    fn test_reshape_apply_revert() {
        let mut doc = Document::new();
        let rect = Rectangle::new(Point::ZERO, Point::new(10.0, 10.0));
        let id = doc.add(Shape::Rectangle(rect));
        let before = doc.clone();
        let mut sel = Selection::new();

        let after = doc.get(id).unwrap().with_point(1, Point::new(30.0, 40.0));
        let cmd = Command::reshape_shape(&doc, after.clone()).unwrap();

        cmd.apply(&mut doc, &mut sel);
        assert_eq!(doc.get(id), Some(&after));

        cmd.revert(&mut doc, &mut sel);
        assert_eq!(doc, before);
    }
}
