//! Undo/redo history for the buffer
//!
//! Records primitive insert/delete operations; undo applies the inverse.

use super::selection::Position;

/// Maximum undo history size
const MAX_UNDO_HISTORY: usize = 1000;

/// An edit operation that can be undone
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Insert text at position
    Insert { pos: Position, text: String },
    /// Delete text from range
    Delete {
        start: Position,
        end: Position,
        deleted_text: String,
    },
}

impl EditOp {
    /// The operation that reverts this one
    pub fn inverse(&self) -> EditOp {
        match self {
            EditOp::Insert { pos, text } => EditOp::Delete {
                start: *pos,
                end: pos.advanced_by(text),
                deleted_text: text.clone(),
            },
            EditOp::Delete {
                start,
                deleted_text,
                ..
            } => EditOp::Insert {
                pos: *start,
                text: deleted_text.clone(),
            },
        }
    }
}

/// Undo stack for tracking operations
#[derive(Debug, Default)]
pub struct UndoStack {
    undo: Vec<EditOp>,
    redo: Vec<EditOp>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Push an operation onto the undo stack
    pub fn push(&mut self, op: EditOp) {
        self.undo.push(op);
        self.redo.clear(); // Clear redo stack on new edit

        if self.undo.len() > MAX_UNDO_HISTORY {
            self.undo.remove(0);
        }
    }

    /// Pop the last operation for undo
    pub fn pop_undo(&mut self) -> Option<EditOp> {
        self.undo.pop()
    }

    /// Push an undone operation onto the redo stack
    pub fn push_redo(&mut self, op: EditOp) {
        self.redo.push(op);
    }

    /// Push a redone operation back onto the undo stack without touching redo
    pub fn push_undone(&mut self, op: EditOp) {
        self.undo.push(op);
    }

    /// Pop the last operation for redo
    pub fn pop_redo(&mut self) -> Option<EditOp> {
        self.redo.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut stack = UndoStack::new();

        stack.push(EditOp::Insert {
            pos: Position::new(0, 0),
            text: "hello".to_string(),
        });

        assert!(stack.can_undo());
        assert!(!stack.can_redo());

        let op = stack.pop_undo().unwrap();
        assert!(matches!(op, EditOp::Insert { .. }));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_redo_cleared_on_new_edit() {
        let mut stack = UndoStack::new();

        stack.push(EditOp::Insert {
            pos: Position::new(0, 0),
            text: "a".to_string(),
        });

        let op = stack.pop_undo().unwrap();
        stack.push_redo(op);
        assert!(stack.can_redo());

        // New edit should clear redo
        stack.push(EditOp::Insert {
            pos: Position::new(0, 0),
            text: "b".to_string(),
        });
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut stack = UndoStack::new();
        for i in 0..(MAX_UNDO_HISTORY + 5) {
            stack.push(EditOp::Insert {
                pos: Position::new(0, i),
                text: "x".to_string(),
            });
        }
        let mut count = 0;
        while stack.pop_undo().is_some() {
            count += 1;
        }
        assert_eq!(count, MAX_UNDO_HISTORY);
    }

    #[test]
    fn test_inverse_of_insert() {
        let op = EditOp::Insert {
            pos: Position::new(1, 2),
            text: "ab\nc".to_string(),
        };
        assert_eq!(
            op.inverse(),
            EditOp::Delete {
                start: Position::new(1, 2),
                end: Position::new(2, 1),
                deleted_text: "ab\nc".to_string(),
            }
        );
    }
}
