//! File picker modal used for both Open and Save
//!
//! A path input line above a listing of the current directory. Moving
//! through the listing copies the highlighted name into the input, and
//! Enter acts on whatever the input names: directories are entered, any
//! other path is returned to the caller.

use super::layout::centered_rect;
use super::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};

/// What the picker is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

/// Entry in the directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    /// Display name
    pub name: String,
    /// Full path
    pub path: PathBuf,
    pub is_dir: bool,
    /// The ".." entry
    pub is_parent: bool,
}

/// Action returned from picker interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// A path was chosen
    Pick(PathBuf),
    /// The picker was dismissed
    Cancel,
    /// No action (continue interaction)
    None,
}

pub struct FilePicker {
    mode: PickerMode,
    /// Directory being listed
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: Option<usize>,
    scroll: usize,
    /// Typed or mirrored file name / path
    input: String,
    /// Cached listing rows for click detection
    row_areas: Vec<(usize, Rect)>,
    modal_area: Option<Rect>,
}

impl FilePicker {
    /// A picker listing `dir`, with `name` pre-filled in the input
    pub fn new(mode: PickerMode, dir: &Path, name: Option<&str>) -> Self {
        let mut picker = Self {
            mode,
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            selected: None,
            scroll: 0,
            input: name.unwrap_or_default().to_string(),
            row_areas: Vec::new(),
            modal_area: None,
        };
        picker.refresh();
        picker
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Re-read the directory: "..", sub-directories, then files; no hidden entries
    fn refresh(&mut self) {
        self.entries.clear();
        self.selected = None;
        self.scroll = 0;

        if let Some(parent) = self.dir.parent() {
            self.entries.push(PickerEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_parent: true,
            });
        }

        match std::fs::read_dir(&self.dir) {
            Ok(read) => {
                let mut listed: Vec<PickerEntry> = read
                    .filter_map(|e| e.ok())
                    .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
                    .map(|e| {
                        let path = e.path();
                        PickerEntry {
                            name: e.file_name().to_string_lossy().to_string(),
                            is_dir: path.is_dir(),
                            path,
                            is_parent: false,
                        }
                    })
                    .collect();
                listed.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
                self.entries.extend(listed);
            }
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "cannot list directory");
            }
        }
    }

    fn navigate(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.input.clear();
        self.refresh();
    }

    fn select(&mut self, index: usize) {
        if let Some(entry) = self.entries.get(index) {
            self.input = entry.name.clone();
            self.selected = Some(index);
        }
    }

    pub fn up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let index = match self.selected {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.select(index);
    }

    pub fn down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let index = match self.selected {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.select(index);
    }

    /// Resolve the input: the highlighted entry when it still matches,
    /// otherwise a path relative to the listed directory
    fn target(&self) -> Option<(PathBuf, bool)> {
        if let Some(entry) = self.selected().filter(|e| e.name == self.input) {
            return Some((entry.path.clone(), entry.is_dir));
        }
        let typed = self.input.trim();
        if typed.is_empty() {
            return None;
        }
        let path = expand_home(typed);
        let path = if path.is_absolute() {
            path
        } else {
            self.dir.join(path)
        };
        let is_dir = path.is_dir();
        Some((path, is_dir))
    }

    pub fn enter(&mut self) -> PickerAction {
        match self.target() {
            Some((path, true)) => {
                self.navigate(path);
                PickerAction::None
            }
            Some((path, false)) => PickerAction::Pick(path),
            None => PickerAction::None,
        }
    }

    /// Go to the parent directory
    pub fn parent(&mut self) {
        if let Some(parent) = self.dir.parent() {
            self.navigate(parent.to_path_buf());
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Delete the last input character; on an empty input go up a directory
    pub fn backspace(&mut self) {
        if self.input.pop().is_none() {
            self.parent();
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc => PickerAction::Cancel,
            KeyCode::Enter => self.enter(),
            KeyCode::Up => {
                self.up();
                PickerAction::None
            }
            KeyCode::Down => {
                self.down();
                PickerAction::None
            }
            KeyCode::Backspace => {
                self.backspace();
                PickerAction::None
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                PickerAction::None
            }
            _ => PickerAction::None,
        }
    }

    /// Click on a listing row selects it; a click on the selected row opens it
    pub fn handle_click(&mut self, x: u16, y: u16) -> PickerAction {
        let pos = Position::new(x, y);
        let hit = self
            .row_areas
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(index, _)| *index);
        match hit {
            Some(index) if self.selected == Some(index) => self.enter(),
            Some(index) => {
                self.select(index);
                PickerAction::None
            }
            None => PickerAction::None,
        }
    }

    /// Check if point is inside modal
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.modal_area
            .is_some_and(|r| r.contains(Position::new(x, y)))
    }

    fn ensure_selected_visible(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        if let Some(selected) = self.selected {
            if selected < self.scroll {
                self.scroll = selected;
            } else if selected >= self.scroll + rows {
                self.scroll = selected + 1 - rows;
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal_width = (area.width as f32 * 0.7).clamp(40.0, 90.0) as u16;
        let modal_height = (area.height as f32 * 0.7).clamp(10.0, 30.0) as u16;
        let modal_area = centered_rect(modal_width, modal_height, area);
        self.modal_area = Some(modal_area);

        frame.render_widget(Clear, modal_area);

        let title = match self.mode {
            PickerMode::Open => " Open file ",
            PickerMode::Save => " Save file ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border_style().fg(theme.border_selected))
            .style(theme.base());
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);
        if inner.height < 4 {
            return;
        }

        // Directory and input lines
        let width = inner.width as usize;
        let dir_line = Line::from(Span::styled(
            truncate_start(&self.dir.to_string_lossy(), width),
            theme.base().fg(theme.accent),
        ));
        frame.render_widget(Paragraph::new(dir_line), Rect::new(inner.x, inner.y, inner.width, 1));

        let input_line = Line::from(vec![
            Span::styled("Name: ", theme.muted()),
            Span::styled(self.input.clone(), theme.base().add_modifier(Modifier::BOLD)),
        ]);
        let input_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        frame.render_widget(Paragraph::new(input_line), input_area);
        let cursor_x = input_area.x + 6 + unicode_width::UnicodeWidthStr::width(self.input.as_str()) as u16;
        if cursor_x < input_area.x + input_area.width {
            frame.set_cursor_position((cursor_x, input_area.y));
        }

        // Listing
        let list_top = inner.y + 3;
        let list_rows = inner.height.saturating_sub(4) as usize;
        self.ensure_selected_visible(list_rows);
        self.row_areas.clear();

        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(list_rows)
            .enumerate()
        {
            let style = if self.selected == Some(index) {
                theme.highlight().add_modifier(Modifier::BOLD)
            } else if entry.is_dir {
                theme.base().fg(theme.accent)
            } else {
                theme.base()
            };
            let label = if entry.is_parent {
                " ../".to_string()
            } else if entry.is_dir {
                format!(" {}/", entry.name)
            } else {
                format!(" {}", entry.name)
            };
            let row_area = Rect::new(inner.x, list_top + row as u16, inner.width, 1);
            frame.render_widget(Paragraph::new(label).style(style), row_area);
            self.row_areas.push((index, row_area));
        }

        let help = Line::from(vec![
            Span::styled("Enter", theme.base().fg(theme.accent)),
            Span::styled(": open/choose  ", theme.muted()),
            Span::styled("Backspace", theme.base().fg(theme.accent)),
            Span::styled(": parent  ", theme.muted()),
            Span::styled("Esc", theme.base().fg(theme.accent)),
            Span::styled(": cancel", theme.muted()),
        ]);
        let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), help_area);
    }
}

/// `~/x` to an absolute path under the home directory
fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(input)),
        None => PathBuf::from(input),
    }
}

/// Keep the tail of a long path
fn truncate_start(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count <= width || width < 4 {
        return s.to_string();
    }
    let tail: String = s.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}
