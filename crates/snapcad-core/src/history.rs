//! Linear undo/redo stack over [`Command`]s.

use crate::command::Command;
use crate::document::Document;
use crate::selection::Selection;
use log::debug;

/// Maximum number of applied commands to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Two ordered command sequences: `applied` (most recent last) and `undone`
/// (the redo buffer). Executing a fresh command clears the redo buffer.
#[derive(Debug, Clone, Default)]
pub struct CommandStack {
    applied: Vec<Command>,
    undone: Vec<Command>,
}

impl CommandStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command and push it onto the applied stack, invalidating any
    /// redo history.
    pub fn execute(
        &mut self,
        command: Command,
        document: &mut Document,
        selection: &mut Selection,
    ) {
        debug!("execute {}", command.kind());
        command.apply(document, selection);
        self.applied.push(command);
        self.undone.clear();
        if self.applied.len() > MAX_UNDO_HISTORY {
            self.applied.remove(0);
        }
    }

    /// Undo the most recent command.
    /// Returns false (leaving everything untouched) when there is nothing to
    /// undo.
    pub fn undo(&mut self, document: &mut Document, selection: &mut Selection) -> bool {
        let Some(command) = self.applied.pop() else {
            debug!("undo: nothing to undo");
            return false;
        };
        debug!("undo {}", command.kind());
        command.revert(document, selection);
        self.undone.push(command);
        true
    }

    /// Re-apply the most recently undone command.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self, document: &mut Document, selection: &mut Selection) -> bool {
        let Some(command) = self.undone.pop() else {
            debug!("redo: nothing to redo");
            return false;
        };
        debug!("redo {}", command.kind());
        command.apply(document, selection);
        self.applied.push(command);
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Shape};
    use kurbo::{Point, Vec2};

    fn line(x: f64) -> Shape {
        Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x + 10.0, 0.0)))
    }

    #[test]
    fn test_undo_restores_exact_state() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        stack.execute(Command::add_shape(line(0.0)), &mut doc, &mut sel);
        let after_add = doc.clone();

        let id = doc.iter().next().unwrap().0;
        let cmd = Command::move_shapes(&doc, &[id], Vec2::new(5.0, 5.0)).unwrap();
        stack.execute(cmd, &mut doc, &mut sel);

        assert!(stack.undo(&mut doc, &mut sel));
        assert_eq!(doc, after_add);

        assert!(stack.undo(&mut doc, &mut sel));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_redo_restores_executed_state() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        stack.execute(Command::add_shape(line(0.0)), &mut doc, &mut sel);
        let executed = doc.clone();

        stack.undo(&mut doc, &mut sel);
        assert!(stack.redo(&mut doc, &mut sel));
        assert_eq!(doc, executed);
    }

    #[test]
    fn test_new_edit_invalidates_redo() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        stack.execute(Command::add_shape(line(0.0)), &mut doc, &mut sel);
        stack.undo(&mut doc, &mut sel);
        assert!(stack.can_redo());

        stack.execute(Command::add_shape(line(20.0)), &mut doc, &mut sel);
        assert!(!stack.can_redo());
        assert!(!stack.redo(&mut doc, &mut sel));
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        assert!(!stack.can_undo());
        assert!(!stack.undo(&mut doc, &mut sel));
        assert!(!stack.can_redo());
        assert!(!stack.redo(&mut doc, &mut sel));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_mixed_history_unwinds_exactly() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        stack.execute(Command::add_shape(line(0.0)), &mut doc, &mut sel);
        stack.execute(Command::add_shape(line(20.0)), &mut doc, &mut sel);
        let a = doc.iter().next().unwrap().0;
        let cmd = Command::move_shapes(&doc, &[a], Vec2::new(0.3, 0.7)).unwrap();
        stack.execute(cmd, &mut doc, &mut sel);
        let cmd = Command::delete_shapes(&doc, &[a]).unwrap();
        stack.execute(cmd, &mut doc, &mut sel);
        let final_state = doc.clone();

        // Unwind everything, then replay everything
        while stack.undo(&mut doc, &mut sel) {}
        assert!(doc.is_empty());
        while stack.redo(&mut doc, &mut sel) {}
        assert_eq!(doc, final_state);
    }

    #[test]
    fn test_clear_drops_both_stacks() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        stack.execute(Command::add_shape(line(0.0)), &mut doc, &mut sel);
        stack.execute(Command::add_shape(line(20.0)), &mut doc, &mut sel);
        stack.undo(&mut doc, &mut sel);

        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        // The document keeps its current state; only the history is gone
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut doc = Document::new();
        let mut sel = Selection::new();
        let mut stack = CommandStack::new();

        for i in 0..(MAX_UNDO_HISTORY + 10) {
            stack.execute(Command::add_shape(line(i as f64)), &mut doc, &mut sel);
        }

        let mut undos = 0;
        while stack.undo(&mut doc, &mut sel) {
            undos += 1;
        }
        assert_eq!(undos, MAX_UNDO_HISTORY);
        // The oldest 10 adds fell off the history and stay applied
        assert_eq!(doc.len(), 10);
    }
}
