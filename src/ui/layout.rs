//! Layout of the window rows
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ File  Edit  View                         │  menu bar
//! │ Untitled × │ * notes.txt × │ +           │  tab strip
//! │  1 │ text of the focused document        │
//! │  2 │                                     │  editor
//! │ Ln 1, Col 1                   Light      │  status bar
//! └──────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Window row areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    pub menu_bar: Rect,
    pub tab_strip: Rect,
    pub editor: Rect,
    pub status: Rect,
}

/// Which row a point falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    MenuBar,
    TabStrip,
    Editor,
    StatusBar,
}

/// Calculate the row areas
pub fn get_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Menu bar
            Constraint::Length(1), // Tab strip
            Constraint::Min(1),    // Editor
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        menu_bar: chunks[0],
        tab_strip: chunks[1],
        editor: chunks[2],
        status: chunks[3],
    }
}

impl AppLayout {
    /// Determine which row contains the given coordinates
    pub fn region_at(&self, x: u16, y: u16) -> Option<Region> {
        let pos = Position::new(x, y);
        if self.menu_bar.contains(pos) {
            Some(Region::MenuBar)
        } else if self.tab_strip.contains(pos) {
            Some(Region::TabStrip)
        } else if self.editor.contains(pos) {
            Some(Region::Editor)
        } else if self.status.contains(pos) {
            Some(Region::StatusBar)
        } else {
            None
        }
    }
}

/// A box of the given size centered in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
