//! Text buffer - the editing capability behind every document tab
//!
//! Features:
//! - Line-vector storage that round-trips text verbatim
//! - Cursor movement with optional selection extension
//! - Insert/delete primitives shared by typing, clipboard and undo
//! - Undo/redo history
//!
//! Every edit reports an [`EditOutcome`] so the owner can react to
//! "text changed" and "cursor moved" the way a widget's change signals would.

mod selection;
mod undo;

pub use selection::{Position, Selection};
pub use undo::{EditOp, UndoStack};

/// Editing commands a UI can send to the focused buffer
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Insert a character at the cursor (replacing any selection)
    InsertChar(char),
    /// Insert a string at the cursor (replacing any selection)
    InsertStr(String),
    /// Split the line at the cursor
    Newline,
    /// Delete the selection or the character before the cursor
    Backspace,
    /// Delete the selection or the character under the cursor
    Delete,
    /// Move the cursor, optionally extending the selection
    Move { motion: Motion, extend: bool },
    /// Select the whole document
    SelectAll,
    Undo,
    Redo,
}

impl EditCommand {
    /// Plain cursor movement without selection
    pub fn move_to(motion: Motion) -> Self {
        EditCommand::Move {
            motion,
            extend: false,
        }
    }

    /// Cursor movement that extends the selection
    pub fn select_to(motion: Motion) -> Self {
        EditCommand::Move {
            motion,
            extend: true,
        }
    }
}

/// Cursor motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
    PageUp(usize),
    PageDown(usize),
    /// Jump to a position (clamped into the document)
    To(Position),
}

/// What an edit did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    pub text_changed: bool,
    pub cursor_moved: bool,
}

/// Plain-text buffer with cursor, selection and history
#[derive(Debug)]
pub struct TextBuffer {
    /// Text content as lines (never empty)
    lines: Vec<String>,
    /// Cursor position
    cursor: Position,
    /// Selection anchor
    selection: Selection,
    /// Undo/redo history
    history: UndoStack,
    /// First visible line
    scroll: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            selection: Selection::new(),
            history: UndoStack::new(),
            scroll: 0,
        }
    }

    /// Create a buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    // ==================== Content ====================

    /// Full text, exactly as it would be written to disk
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole content; resets cursor, selection, scroll and history
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.cursor = Position::default();
        self.selection.clear();
        self.history.clear();
        self.scroll = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Normalized selection range, if any text is selected
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        self.selection.range(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ==================== Commands ====================

    /// Apply an editing command
    pub fn apply(&mut self, command: EditCommand) -> EditOutcome {
        let before = self.cursor;
        let text_changed = match command {
            EditCommand::InsertChar(c) => self.insert_str(c.encode_utf8(&mut [0; 4])),
            EditCommand::InsertStr(text) => self.insert_str(&text),
            EditCommand::Newline => self.insert_str("\n"),
            EditCommand::Backspace => self.backspace(),
            EditCommand::Delete => self.delete(),
            EditCommand::Move { motion, extend } => {
                self.move_cursor(motion, extend);
                false
            }
            EditCommand::SelectAll => {
                self.selection.start(Position::default());
                self.cursor = self.end_position();
                false
            }
            EditCommand::Undo => self.undo(),
            EditCommand::Redo => self.redo(),
        };

        EditOutcome {
            text_changed,
            cursor_moved: self.cursor != before,
        }
    }

    /// Currently selected text
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        Some(self.text_range(start, end))
    }

    /// Remove and return the selected text
    pub fn cut_selection(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.delete_selection();
        Some(text)
    }

    // ==================== Editing ====================

    fn insert_str(&mut self, text: &str) -> bool {
        let replaced = self.delete_selection();
        if text.is_empty() {
            return replaced;
        }
        self.record(EditOp::Insert {
            pos: self.cursor,
            text: text.to_string(),
        });
        true
    }

    fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let Position { line, column } = self.cursor;
        if column > 0 {
            self.delete_between(Position::new(line, column - 1), self.cursor)
        } else if line > 0 {
            let prev_len = self.line_len(line - 1);
            self.delete_between(Position::new(line - 1, prev_len), self.cursor)
        } else {
            false
        }
    }

    fn delete(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let Position { line, column } = self.cursor;
        let len = self.line_len(line);
        if column < len {
            self.delete_between(self.cursor, Position::new(line, column + 1))
        } else if line + 1 < self.lines.len() {
            self.delete_between(self.cursor, Position::new(line + 1, 0))
        } else {
            false
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection.clear();
            return false;
        };
        self.selection.clear();
        self.delete_between(start, end)
    }

    fn delete_between(&mut self, start: Position, end: Position) -> bool {
        if start >= end {
            return false;
        }
        let deleted_text = self.text_range(start, end);
        self.record(EditOp::Delete {
            start,
            end,
            deleted_text,
        });
        true
    }

    fn undo(&mut self) -> bool {
        let Some(op) = self.history.pop_undo() else {
            return false;
        };
        self.selection.clear();
        self.cursor = self.perform(&op.inverse());
        self.history.push_redo(op);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(op) = self.history.pop_redo() else {
            return false;
        };
        self.selection.clear();
        self.cursor = self.perform(&op);
        self.history.push_undone(op);
        true
    }

    /// Perform and remember an operation, leaving the cursor after it
    fn record(&mut self, op: EditOp) {
        self.cursor = self.perform(&op);
        self.history.push(op);
    }

    /// Perform an operation; returns where the cursor lands
    fn perform(&mut self, op: &EditOp) -> Position {
        match op {
            EditOp::Insert { pos, text } => self.insert_raw(*pos, text),
            EditOp::Delete { start, end, .. } => {
                self.delete_raw(*start, *end);
                *start
            }
        }
    }

    fn insert_raw(&mut self, pos: Position, text: &str) -> Position {
        let pos = self.clamp(pos);
        let split_at = byte_index(&self.lines[pos.line], pos.column);
        let tail = self.lines[pos.line].split_off(split_at);

        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.lines[pos.line].push_str(first);
        }
        let mut row = pos.line;
        for part in parts {
            row += 1;
            self.lines.insert(row, part.to_string());
        }
        self.lines[row].push_str(&tail);

        pos.advanced_by(text)
    }

    fn delete_raw(&mut self, start: Position, end: Position) {
        let start = self.clamp(start);
        let end = self.clamp(end);
        let end_line = &self.lines[end.line];
        let tail = end_line[byte_index(end_line, end.column)..].to_string();

        let start_line = &mut self.lines[start.line];
        let cut = byte_index(start_line, start.column);
        start_line.truncate(cut);
        start_line.push_str(&tail);

        if end.line > start.line {
            self.lines.drain(start.line + 1..=end.line);
        }
    }

    fn text_range(&self, start: Position, end: Position) -> String {
        let start = self.clamp(start);
        let end = self.clamp(end);

        if start.line == end.line {
            let line = &self.lines[start.line];
            return line[byte_index(line, start.column)..byte_index(line, end.column)].to_string();
        }

        let first = &self.lines[start.line];
        let mut result = first[byte_index(first, start.column)..].to_string();
        for line in &self.lines[start.line + 1..end.line] {
            result.push('\n');
            result.push_str(line);
        }
        let last = &self.lines[end.line];
        result.push('\n');
        result.push_str(&last[..byte_index(last, end.column)]);
        result
    }

    // ==================== Cursor Movement ====================

    fn move_cursor(&mut self, motion: Motion, extend: bool) {
        if extend {
            if !self.selection.is_active() {
                self.selection.start(self.cursor);
            }
        } else {
            self.selection.clear();
        }

        let Position { line, column } = self.cursor;
        let last_line = self.lines.len() - 1;
        self.cursor = match motion {
            Motion::Left if column > 0 => Position::new(line, column - 1),
            Motion::Left if line > 0 => Position::new(line - 1, self.line_len(line - 1)),
            Motion::Left => self.cursor,
            Motion::Right if column < self.line_len(line) => Position::new(line, column + 1),
            Motion::Right if line < last_line => Position::new(line + 1, 0),
            Motion::Right => self.cursor,
            Motion::Up if line > 0 => self.clamp(Position::new(line - 1, column)),
            Motion::Up => self.cursor,
            Motion::Down if line < last_line => self.clamp(Position::new(line + 1, column)),
            Motion::Down => self.cursor,
            Motion::LineStart => Position::new(line, 0),
            Motion::LineEnd => Position::new(line, self.line_len(line)),
            Motion::DocStart => Position::default(),
            Motion::DocEnd => self.end_position(),
            Motion::PageUp(rows) => self.clamp(Position::new(line.saturating_sub(rows), column)),
            Motion::PageDown(rows) => self.clamp(Position::new(line + rows, column)),
            Motion::To(pos) => self.clamp(pos),
        };
    }

    fn end_position(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.line_len(last))
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    // ==================== Scrolling ====================

    /// First visible line
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll by a number of lines (negative scrolls up)
    pub fn scroll_by(&mut self, delta: isize) {
        let max_scroll = self.lines.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max_scroll);
    }

    /// Adjust scroll so the cursor line is within a viewport of `height` rows
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        let height = height.max(1);
        if self.cursor.line < self.scroll {
            self.scroll = self.cursor.line;
        } else if self.cursor.line >= self.scroll + height {
            self.scroll = self.cursor.line + 1 - height;
        }
    }
}

/// Convert character position to byte position in a string
fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> TextBuffer {
        let mut buffer = TextBuffer::new();
        for c in text.chars() {
            let command = if c == '\n' {
                EditCommand::Newline
            } else {
                EditCommand::InsertChar(c)
            };
            buffer.apply(command);
        }
        buffer
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = TextBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.cursor(), Position::new(0, 0));
    }

    #[test]
    fn test_text_round_trips_verbatim() {
        for text in ["", "hello", "a\nb\n", "\n\n", "crlf\r\nline\r\n", "tab\there"] {
            assert_eq!(TextBuffer::from_text(text).text(), text);
        }
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut buffer = TextBuffer::new();
        let outcome = buffer.apply(EditCommand::InsertChar('h'));
        assert!(outcome.text_changed);
        assert!(outcome.cursor_moved);
        assert_eq!(buffer.text(), "h");
    }

    #[test]
    fn test_newline_splits_line() {
        let mut buffer = TextBuffer::from_text("hello world");
        buffer.apply(EditCommand::move_to(Motion::To(Position::new(0, 5))));
        buffer.apply(EditCommand::Newline);
        assert_eq!(buffer.lines(), &["hello".to_string(), " world".to_string()]);
        assert_eq!(buffer.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = typed("ab\ncd");
        buffer.apply(EditCommand::move_to(Motion::LineStart));
        assert!(buffer.apply(EditCommand::Backspace).text_changed);
        assert_eq!(buffer.text(), "abcd");
        assert_eq!(buffer.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut buffer = TextBuffer::from_text("abc");
        let outcome = buffer.apply(EditCommand::Backspace);
        assert_eq!(outcome, EditOutcome::default());
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut buffer = TextBuffer::from_text("ab\ncd");
        buffer.apply(EditCommand::move_to(Motion::LineEnd));
        buffer.apply(EditCommand::Delete);
        assert_eq!(buffer.text(), "abcd");

        buffer.apply(EditCommand::move_to(Motion::DocEnd));
        assert!(!buffer.apply(EditCommand::Delete).text_changed);
    }

    #[test]
    fn test_unicode_editing() {
        let mut buffer = typed("héllo");
        buffer.apply(EditCommand::move_to(Motion::Left));
        buffer.apply(EditCommand::Backspace);
        assert_eq!(buffer.text(), "hélo");
        buffer.apply(EditCommand::move_to(Motion::LineStart));
        buffer.apply(EditCommand::move_to(Motion::Right));
        buffer.apply(EditCommand::Delete);
        assert_eq!(buffer.text(), "hlo");
    }

    #[test]
    fn test_vertical_motion_clamps_column() {
        let mut buffer = TextBuffer::from_text("long line\nab\nanother");
        buffer.apply(EditCommand::move_to(Motion::LineEnd));
        buffer.apply(EditCommand::move_to(Motion::Down));
        assert_eq!(buffer.cursor(), Position::new(1, 2));
        buffer.apply(EditCommand::move_to(Motion::PageDown(10)));
        assert_eq!(buffer.cursor(), Position::new(2, 2));
        buffer.apply(EditCommand::move_to(Motion::PageUp(10)));
        assert_eq!(buffer.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_horizontal_motion_wraps() {
        let mut buffer = TextBuffer::from_text("ab\ncd");
        buffer.apply(EditCommand::move_to(Motion::LineEnd));
        buffer.apply(EditCommand::move_to(Motion::Right));
        assert_eq!(buffer.cursor(), Position::new(1, 0));
        buffer.apply(EditCommand::move_to(Motion::Left));
        assert_eq!(buffer.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_selection_and_cut() {
        let mut buffer = TextBuffer::from_text("First line\nSecond line\nThird line");
        buffer.apply(EditCommand::move_to(Motion::To(Position::new(0, 6))));
        buffer.apply(EditCommand::select_to(Motion::To(Position::new(2, 5))));
        assert_eq!(buffer.selected_text().as_deref(), Some("line\nSecond line\nThird"));

        let cut = buffer.cut_selection();
        assert_eq!(cut.as_deref(), Some("line\nSecond line\nThird"));
        assert_eq!(buffer.text(), "First  line");
        assert!(buffer.selection_range().is_none());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut buffer = TextBuffer::from_text("hello world");
        buffer.apply(EditCommand::select_to(Motion::To(Position::new(0, 5))));
        buffer.apply(EditCommand::InsertStr("goodbye".into()));
        assert_eq!(buffer.text(), "goodbye world");
    }

    #[test]
    fn test_plain_move_clears_selection() {
        let mut buffer = TextBuffer::from_text("abc");
        buffer.apply(EditCommand::SelectAll);
        assert_eq!(buffer.selected_text().as_deref(), Some("abc"));
        buffer.apply(EditCommand::move_to(Motion::Left));
        assert!(buffer.selected_text().is_none());
    }

    #[test]
    fn test_undo_redo() {
        let mut buffer = typed("ab\nc");
        assert_eq!(buffer.text(), "ab\nc");

        buffer.apply(EditCommand::Undo);
        assert_eq!(buffer.text(), "ab\n");
        buffer.apply(EditCommand::Undo);
        assert_eq!(buffer.text(), "ab");
        assert_eq!(buffer.cursor(), Position::new(0, 2));

        buffer.apply(EditCommand::Redo);
        assert_eq!(buffer.text(), "ab\n");
        assert_eq!(buffer.cursor(), Position::new(1, 0));
        assert!(buffer.can_redo());
    }

    #[test]
    fn test_undo_restores_deleted_selection() {
        let mut buffer = TextBuffer::from_text("one\ntwo\nthree");
        buffer.apply(EditCommand::SelectAll);
        buffer.apply(EditCommand::Backspace);
        assert!(buffer.is_empty());

        assert!(buffer.apply(EditCommand::Undo).text_changed);
        assert_eq!(buffer.text(), "one\ntwo\nthree");
        buffer.apply(EditCommand::Redo);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_undo_on_fresh_buffer_is_noop() {
        let mut buffer = TextBuffer::from_text("loaded");
        assert!(!buffer.apply(EditCommand::Undo).text_changed);
        assert_eq!(buffer.text(), "loaded");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let text = (0..50).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::from_text(&text);
        buffer.apply(EditCommand::move_to(Motion::To(Position::new(30, 0))));
        buffer.ensure_cursor_visible(10);
        assert_eq!(buffer.scroll(), 21);

        buffer.apply(EditCommand::move_to(Motion::DocStart));
        buffer.ensure_cursor_visible(10);
        assert_eq!(buffer.scroll(), 0);

        buffer.scroll_by(-5);
        assert_eq!(buffer.scroll(), 0);
        buffer.scroll_by(500);
        assert_eq!(buffer.scroll(), 49);
    }
}
