//! Text selection for the buffer
//!
//! Tracks the selection anchor; the other end is always the cursor.

use std::cmp::Ordering;

/// A position in the document (zero-based line, character column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position reached after inserting `text` at `self`
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.line, self.column + text.chars().count()),
            Some(last) => Self::new(
                self.line + text.matches('\n').count(),
                text[last + 1..].chars().count(),
            ),
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.line.cmp(&other.line) {
            Ordering::Equal => self.column.cmp(&other.column),
            ord => ord,
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection state for the buffer
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Anchor point (where selection started)
    anchor: Option<Position>,
}

impl Selection {
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// Start selection at position
    pub fn start(&mut self, pos: Position) {
        self.anchor = Some(pos);
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Check if selection is active
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Get normalized selection range (start, end) where start <= end.
    ///
    /// An anchor sitting on the cursor is an empty selection and yields `None`.
    pub fn range(&self, cursor: Position) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        match anchor.cmp(&cursor) {
            Ordering::Less => Some((anchor, cursor)),
            Ordering::Greater => Some((cursor, anchor)),
            Ordering::Equal => None,
        }
    }

    /// Check if a position is within the selection
    pub fn contains(&self, cursor: Position, pos: Position) -> bool {
        if let Some((start, end)) = self.range(cursor) {
            pos >= start && pos < end
        } else {
            false
        }
    }

    /// Get selection range on a specific line (returns column range)
    pub fn line_range(&self, cursor: Position, line_idx: usize, line_len: usize) -> Option<(usize, usize)> {
        let (start, end) = self.range(cursor)?;

        if line_idx < start.line || line_idx > end.line {
            return None;
        }

        let sel_start = if line_idx == start.line { start.column } else { 0 };
        let sel_end = if line_idx == end.line { end.column } else { line_len };

        Some((sel_start, sel_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 2);
        let c = Position::new(0, 3);

        assert!(a < b);
        assert!(c < a);
        assert!(a > c);
    }

    #[test]
    fn test_advanced_by() {
        let p = Position::new(2, 3);
        assert_eq!(p.advanced_by("abc"), Position::new(2, 6));
        assert_eq!(p.advanced_by("ab\ncd"), Position::new(3, 2));
        assert_eq!(p.advanced_by("\n"), Position::new(3, 0));
        assert_eq!(p.advanced_by("é\nüñ"), Position::new(3, 2));
    }

    #[test]
    fn test_selection_range() {
        let mut sel = Selection::new();
        sel.start(Position::new(0, 5));

        // Forward selection
        let (start, end) = sel.range(Position::new(0, 10)).unwrap();
        assert_eq!(start.column, 5);
        assert_eq!(end.column, 10);

        // Backward selection
        let (start, end) = sel.range(Position::new(0, 2)).unwrap();
        assert_eq!(start.column, 2);
        assert_eq!(end.column, 5);

        // Collapsed selection
        assert!(sel.range(Position::new(0, 5)).is_none());
    }

    #[test]
    fn test_line_range_multi_line() {
        let mut sel = Selection::new();
        sel.start(Position::new(0, 6));
        let cursor = Position::new(2, 5);

        assert_eq!(sel.line_range(cursor, 0, 10), Some((6, 10)));
        assert_eq!(sel.line_range(cursor, 1, 11), Some((0, 11)));
        assert_eq!(sel.line_range(cursor, 2, 10), Some((0, 5)));
        assert_eq!(sel.line_range(cursor, 3, 10), None);
    }

    #[test]
    fn test_contains() {
        let mut sel = Selection::new();
        sel.start(Position::new(1, 0));
        let cursor = Position::new(1, 4);
        assert!(sel.contains(cursor, Position::new(1, 3)));
        assert!(!sel.contains(cursor, Position::new(1, 4)));
    }
}
