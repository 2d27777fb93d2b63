//! Menu bar with File, Edit and View menus
//!
//! Each item carries a Ctrl shortcut; the same table drives the labels in
//! the drop-downs and the global key bindings, so the two cannot disagree.

use super::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Something a menu item (or its shortcut) asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    New,
    Open,
    Save,
    CloseTab,
    Exit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    ToggleTheme,
}

const ALL_ACTIONS: [MenuAction; 12] = [
    MenuAction::New,
    MenuAction::Open,
    MenuAction::Save,
    MenuAction::CloseTab,
    MenuAction::Exit,
    MenuAction::Undo,
    MenuAction::Redo,
    MenuAction::Cut,
    MenuAction::Copy,
    MenuAction::Paste,
    MenuAction::SelectAll,
    MenuAction::ToggleTheme,
];

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::New => "New",
            MenuAction::Open => "Open...",
            MenuAction::Save => "Save...",
            MenuAction::CloseTab => "Close Tab",
            MenuAction::Exit => "Exit",
            MenuAction::Undo => "Undo",
            MenuAction::Redo => "Redo",
            MenuAction::Cut => "Cut",
            MenuAction::Copy => "Copy",
            MenuAction::Paste => "Paste",
            MenuAction::SelectAll => "Select All",
            MenuAction::ToggleTheme => "Toggle Theme",
        }
    }

    /// Letter pressed together with Ctrl
    pub fn shortcut_key(self) -> char {
        match self {
            MenuAction::New => 'n',
            MenuAction::Open => 'o',
            MenuAction::Save => 's',
            MenuAction::CloseTab => 'w',
            MenuAction::Exit => 'q',
            MenuAction::Undo => 'z',
            MenuAction::Redo => 'y',
            MenuAction::Cut => 'x',
            MenuAction::Copy => 'c',
            MenuAction::Paste => 'v',
            MenuAction::SelectAll => 'a',
            MenuAction::ToggleTheme => 't',
        }
    }

    pub fn shortcut_label(self) -> String {
        format!("Ctrl+{}", self.shortcut_key().to_ascii_uppercase())
    }

    /// The action bound to a Ctrl+letter key press
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
            return None;
        }
        let KeyCode::Char(c) = key.code else {
            return None;
        };
        let c = c.to_ascii_lowercase();
        ALL_ACTIONS.into_iter().find(|a| a.shortcut_key() == c)
    }
}

pub struct Menu {
    pub title: &'static str,
    /// Opens the menu together with Alt
    pub hotkey: char,
    pub items: Vec<MenuAction>,
}

/// Result of a mouse click while the menu bar may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    /// An item was chosen; the menu is closed
    Action(MenuAction),
    /// The click opened, switched or closed a menu
    Handled,
    /// The click was nowhere near the menus
    Outside,
}

pub struct MenuBar {
    menus: Vec<Menu>,
    /// Index of the open menu
    open: Option<usize>,
    /// Highlighted item in the open menu
    selected: usize,
    /// Cached title areas for click detection
    title_areas: Vec<Rect>,
    /// Cached item rows of the open drop-down
    item_areas: Vec<Rect>,
    dropdown_area: Option<Rect>,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            menus: vec![
                Menu {
                    title: "File",
                    hotkey: 'f',
                    items: vec![
                        MenuAction::New,
                        MenuAction::Open,
                        MenuAction::Save,
                        MenuAction::CloseTab,
                        MenuAction::Exit,
                    ],
                },
                Menu {
                    title: "Edit",
                    hotkey: 'e',
                    items: vec![
                        MenuAction::Undo,
                        MenuAction::Redo,
                        MenuAction::Cut,
                        MenuAction::Copy,
                        MenuAction::Paste,
                        MenuAction::SelectAll,
                    ],
                },
                Menu {
                    title: "View",
                    hotkey: 'v',
                    items: vec![MenuAction::ToggleTheme],
                },
            ],
            open: None,
            selected: 0,
            title_areas: Vec::new(),
            item_areas: Vec::new(),
            dropdown_area: None,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// The highlighted item of the open menu
    pub fn selected_action(&self) -> Option<MenuAction> {
        let menu = self.menus.get(self.open?)?;
        menu.items.get(self.selected).copied()
    }

    pub fn open(&mut self, index: usize) {
        if index < self.menus.len() {
            self.open = Some(index);
            self.selected = 0;
        }
    }

    /// Open the menu whose Alt hotkey is `c`
    pub fn open_by_hotkey(&mut self, c: char) -> bool {
        let c = c.to_ascii_lowercase();
        match self.menus.iter().position(|m| m.hotkey == c) {
            Some(index) => {
                self.open(index);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
        self.item_areas.clear();
        self.dropdown_area = None;
    }

    fn shift_menu(&mut self, forward: bool) {
        let count = self.menus.len();
        if let Some(open) = self.open {
            let next = if forward {
                (open + 1) % count
            } else {
                (open + count - 1) % count
            };
            self.open(next);
        }
    }

    fn shift_item(&mut self, forward: bool) {
        let Some(menu) = self.open.and_then(|i| self.menus.get(i)) else {
            return;
        };
        let count = menu.items.len();
        self.selected = if forward {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }

    /// Keyboard navigation while a menu is open
    ///
    /// Returns the chosen action, if any. The menu closes on Enter, Esc,
    /// F10 and when an item shortcut is pressed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<MenuAction> {
        if let Some(action) = MenuAction::from_key(key) {
            self.close();
            return Some(action);
        }
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.close(),
            KeyCode::Left => self.shift_menu(false),
            KeyCode::Right => self.shift_menu(true),
            KeyCode::Up => self.shift_item(false),
            KeyCode::Down => self.shift_item(true),
            KeyCode::Enter => {
                let action = self.selected_action();
                self.close();
                return action;
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                self.open_by_hotkey(c);
            }
            _ => {}
        }
        None
    }

    /// Mouse click anywhere on screen
    pub fn handle_click(&mut self, x: u16, y: u16) -> MenuClick {
        let pos = Position::new(x, y);

        if let Some(index) = self.title_areas.iter().position(|r| r.contains(pos)) {
            if self.open == Some(index) {
                self.close();
            } else {
                self.open(index);
            }
            return MenuClick::Handled;
        }

        if let Some(row) = self.item_areas.iter().position(|r| r.contains(pos)) {
            self.selected = row;
            let action = self.selected_action();
            self.close();
            return action.map_or(MenuClick::Handled, MenuClick::Action);
        }

        if self.is_open() {
            self.close();
            return MenuClick::Handled;
        }
        MenuClick::Outside
    }

    /// Mouse movement over an open drop-down highlights the item under it
    pub fn handle_hover(&mut self, x: u16, y: u16) {
        let pos = Position::new(x, y);
        if let Some(row) = self.item_areas.iter().position(|r| r.contains(pos)) {
            self.selected = row;
        }
    }

    /// Compute title areas for a bar drawn in `area`
    pub fn layout(&mut self, area: Rect) {
        self.title_areas.clear();
        let mut x = area.x + 1;
        for menu in &self.menus {
            let width = menu.title.len() as u16 + 2;
            let visible = width.min((area.x + area.width).saturating_sub(x));
            self.title_areas.push(Rect::new(x, area.y, visible, 1));
            x = x.saturating_add(width);
        }
    }

    pub fn render_bar(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.layout(area);

        let mut spans = vec![Span::styled(" ", theme.base())];
        for (index, menu) in self.menus.iter().enumerate() {
            let style = if self.open == Some(index) {
                theme.highlight()
            } else {
                theme.base()
            };
            let (hot, rest) = menu.title.split_at(1);
            spans.push(Span::styled(" ", style));
            spans.push(Span::styled(hot.to_string(), style.add_modifier(Modifier::UNDERLINED)));
            spans.push(Span::styled(format!("{} ", rest), style));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
    }

    /// Draw the open drop-down below its title
    pub fn render_dropdown(&mut self, frame: &mut Frame, screen: Rect, theme: &Theme) {
        self.item_areas.clear();
        self.dropdown_area = None;

        let Some(open) = self.open else {
            return;
        };
        let (Some(menu), Some(title)) = (self.menus.get(open), self.title_areas.get(open)) else {
            return;
        };

        let label_width = menu.items.iter().map(|a| a.label().len()).max().unwrap_or(0);
        let key_width = menu
            .items
            .iter()
            .map(|a| a.shortcut_label().len())
            .max()
            .unwrap_or(0);
        let width = (label_width + key_width + 6) as u16;
        let height = menu.items.len() as u16 + 2;

        let x = title.x.min(screen.width.saturating_sub(width));
        let area = Rect::new(x, title.y + 1, width, height).intersection(screen);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .style(theme.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (row, action) in menu.items.iter().enumerate() {
            let y = inner.y + row as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let style = if row == self.selected {
                theme.highlight()
            } else {
                theme.base()
            };
            let line = Line::from(vec![
                Span::styled(format!(" {:<w$}  ", action.label(), w = label_width), style),
                Span::styled(
                    format!("{:>w$} ", action.shortcut_label(), w = key_width),
                    Style::default().fg(theme.text_muted).bg(style.bg.unwrap_or(theme.bg)),
                ),
            ]);
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            frame.render_widget(Paragraph::new(line).style(style), row_area);
            self.item_areas.push(row_area);
        }
        self.dropdown_area = Some(area);
    }

    /// Check if a point is over the open drop-down
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.dropdown_area
            .is_some_and(|r| r.contains(Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(MenuAction::from_key(&ctrl('n')), Some(MenuAction::New));
        assert_eq!(MenuAction::from_key(&ctrl('S')), Some(MenuAction::Save));
        assert_eq!(MenuAction::from_key(&ctrl('t')), Some(MenuAction::ToggleTheme));
        assert_eq!(MenuAction::from_key(&ctrl('k')), None);
        assert_eq!(MenuAction::from_key(&key(KeyCode::Char('n'))), None);
        assert_eq!(MenuAction::Open.shortcut_label(), "Ctrl+O");
    }

    #[test]
    fn test_shortcut_keys_unique() {
        let mut keys: Vec<char> = ALL_ACTIONS.iter().map(|a| a.shortcut_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), ALL_ACTIONS.len());
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut bar = MenuBar::new();
        assert!(bar.open_by_hotkey('F'));
        assert_eq!(bar.selected_action(), Some(MenuAction::New));

        bar.handle_key(&key(KeyCode::Down));
        bar.handle_key(&key(KeyCode::Down));
        assert_eq!(bar.selected_action(), Some(MenuAction::Save));

        bar.handle_key(&key(KeyCode::Right));
        assert_eq!(bar.open_index(), Some(1));
        assert_eq!(bar.selected_action(), Some(MenuAction::Undo));

        bar.handle_key(&key(KeyCode::Up));
        assert_eq!(bar.selected_action(), Some(MenuAction::SelectAll));

        assert_eq!(bar.handle_key(&key(KeyCode::Enter)), Some(MenuAction::SelectAll));
        assert!(!bar.is_open());
    }

    #[test]
    fn test_escape_closes() {
        let mut bar = MenuBar::new();
        bar.open(2);
        assert_eq!(bar.handle_key(&key(KeyCode::Esc)), None);
        assert!(!bar.is_open());
    }

    #[test]
    fn test_click_title_then_item() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let mut bar = MenuBar::new();

        terminal
            .draw(|f| bar.render_bar(f, Rect::new(0, 0, 60, 1), &theme))
            .unwrap();
        // " File " starts at x = 1
        assert_eq!(bar.handle_click(2, 0), MenuClick::Handled);
        assert_eq!(bar.open_index(), Some(0));

        terminal
            .draw(|f| {
                bar.render_bar(f, Rect::new(0, 0, 60, 1), &theme);
                bar.render_dropdown(f, f.area(), &theme);
            })
            .unwrap();
        // Border row at y = 1, items from y = 2: New, Open..., Save...
        assert_eq!(bar.handle_click(3, 4), MenuClick::Action(MenuAction::Save));
        assert!(!bar.is_open());
        assert_eq!(bar.handle_click(30, 8), MenuClick::Outside);
    }

    #[test]
    fn test_dropdown_lists_shortcuts() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let mut bar = MenuBar::new();
        bar.open(0);
        terminal
            .draw(|f| {
                bar.render_bar(f, Rect::new(0, 0, 60, 1), &theme);
                bar.render_dropdown(f, f.area(), &theme);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..60).map(|x| buffer[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("New"));
        assert!(row.contains("Ctrl+N"));
    }
}
