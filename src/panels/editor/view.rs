//! Mapping between character columns and screen cells
//!
//! Tabs expand to the next multiple of the tab width, wide characters take
//! two cells and carriage returns take none (they stay in the text so files
//! round-trip unchanged, but are never drawn).

use unicode_width::UnicodeWidthChar;

/// One drawn character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Character column in the line
    pub column: usize,
    /// First screen cell it occupies
    pub x: usize,
    /// What to draw
    pub text: String,
    pub width: usize,
}

fn char_width(c: char, x: usize, tab_width: usize) -> usize {
    match c {
        '\t' => tab_width - (x % tab_width),
        '\r' => 0,
        c => c.width().unwrap_or(0),
    }
}

/// Lay out a line as screen cells
pub fn cells(line: &str, tab_width: usize) -> Vec<Cell> {
    let tab_width = tab_width.max(1);
    let mut x = 0;
    let mut out = Vec::with_capacity(line.len());
    for (column, c) in line.chars().enumerate() {
        let width = char_width(c, x, tab_width);
        if width > 0 {
            let text = if c == '\t' {
                " ".repeat(width)
            } else {
                c.to_string()
            };
            out.push(Cell {
                column,
                x,
                text,
                width,
            });
        }
        x += width;
    }
    out
}

/// Screen cell of character `column`
pub fn display_column(line: &str, column: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    line.chars()
        .take(column)
        .fold(0, |x, c| x + char_width(c, x, tab_width))
}

/// Character column drawn at screen cell `target` (clamped to the line end)
pub fn column_at(line: &str, target: usize, tab_width: usize) -> usize {
    let tab_width = tab_width.max(1);
    let mut x = 0;
    for (column, c) in line.chars().enumerate() {
        let width = char_width(c, x, tab_width);
        if width > 0 && target < x + width {
            return column;
        }
        x += width;
    }
    line.chars().count()
}
