//! Editor panel: draws and edits the focused document
//!
//! Features:
//! - Optional line-number gutter
//! - Selection highlight, including selected line breaks
//! - Tab expansion and horizontal scrolling to keep the cursor in view
//! - Mouse placement, drag selection and wheel scrolling

mod view;

use view::{cells, column_at, display_column};

use super::Panel;
use crate::core::Result;
use crate::events::Event;
use crate::state::{AppState, ViewSettings};
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position as ScreenPosition, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tabpad_core::{EditCommand, Motion, Position, Session, TabId};

/// Lines moved per mouse wheel notch
const WHEEL_LINES: isize = 3;

pub struct EditorPanel {
    view: ViewSettings,
    /// Visible height (updated on resize and render)
    visible_height: usize,
    /// Text area from the last render, for mouse hit testing
    text_area: Rect,
    /// First visible screen column
    h_scroll: usize,
    /// Tab drawn last time; horizontal scroll resets when it changes
    last_tab: Option<TabId>,
    /// Left button held after a click in the text
    dragging: bool,
}

impl EditorPanel {
    pub fn new(view: ViewSettings) -> Self {
        Self {
            view,
            visible_height: 20,
            text_area: Rect::default(),
            h_scroll: 0,
            last_tab: None,
            dragging: false,
        }
    }

    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    fn gutter_width(&self, line_count: usize) -> u16 {
        if self.view.line_numbers {
            line_count.to_string().len().max(2) as u16 + 2
        } else {
            0
        }
    }

    /// Translate a key press into an edit of the focused document
    fn key_command(&self, key: &KeyEvent) -> Option<EditCommand> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        let motion = match key.code {
            KeyCode::Char(c) if !ctrl && !alt => return Some(EditCommand::InsertChar(c)),
            KeyCode::Enter => return Some(EditCommand::Newline),
            KeyCode::Tab => return Some(EditCommand::InsertStr(" ".repeat(self.view.tab_width))),
            KeyCode::Backspace => return Some(EditCommand::Backspace),
            KeyCode::Delete => return Some(EditCommand::Delete),
            KeyCode::Left => Motion::Left,
            KeyCode::Right => Motion::Right,
            KeyCode::Up => Motion::Up,
            KeyCode::Down => Motion::Down,
            KeyCode::Home if ctrl => Motion::DocStart,
            KeyCode::End if ctrl => Motion::DocEnd,
            KeyCode::Home => Motion::LineStart,
            KeyCode::End => Motion::LineEnd,
            KeyCode::PageUp if !ctrl => Motion::PageUp(self.visible_height.max(1)),
            KeyCode::PageDown if !ctrl => Motion::PageDown(self.visible_height.max(1)),
            _ => return None,
        };

        Some(if shift {
            EditCommand::select_to(motion)
        } else {
            EditCommand::move_to(motion)
        })
    }

    /// Document position under a screen cell of the text area
    fn position_at(&self, x: u16, y: u16, session: &Session) -> Option<Position> {
        let doc = session.current_document()?;
        let buffer = doc.buffer();
        let row = (y.checked_sub(self.text_area.y)?) as usize + buffer.scroll();
        let line_index = row.min(buffer.line_count().saturating_sub(1));
        let line = buffer.lines().get(line_index)?;
        let cell = x.saturating_sub(self.text_area.x) as usize + self.h_scroll;
        let column = if row > line_index {
            line.chars().count()
        } else {
            column_at(line, cell, self.view.tab_width)
        };
        Some(Position::new(line_index, column))
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, session: &mut Session) -> bool {
        let inside = self
            .text_area
            .contains(ScreenPosition::new(mouse.column, mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                if let Some(pos) = self.position_at(mouse.column, mouse.row, session) {
                    session.edit(EditCommand::move_to(Motion::To(pos)));
                    self.dragging = true;
                }
                true
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                let x = mouse.column.max(self.text_area.x);
                let y = mouse.row.clamp(
                    self.text_area.y,
                    self.text_area.y + self.text_area.height.saturating_sub(1),
                );
                if let Some(pos) = self.position_at(x, y, session) {
                    session.edit(EditCommand::select_to(Motion::To(pos)));
                }
                true
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                true
            }
            MouseEventKind::ScrollUp if inside => {
                session.scroll_by(-WHEEL_LINES);
                true
            }
            MouseEventKind::ScrollDown if inside => {
                session.scroll_by(WHEEL_LINES);
                true
            }
            _ => false,
        }
    }

    fn update_h_scroll(&mut self, cursor_x: usize, width: usize) {
        if width == 0 {
            return;
        }
        if cursor_x < self.h_scroll {
            self.h_scroll = cursor_x;
        } else if cursor_x >= self.h_scroll + width {
            self.h_scroll = cursor_x + 1 - width;
        }
    }
}

impl Panel for EditorPanel {
    fn name(&self) -> &str {
        "Editor"
    }

    fn handle_input(
        &mut self,
        event: &Event,
        session: &mut Session,
        _state: &mut AppState,
    ) -> Result<bool> {
        if session.current_document().is_none() {
            return Ok(false);
        }
        match event {
            Event::Key(key) => {
                let Some(command) = self.key_command(key) else {
                    return Ok(false);
                };
                session.edit(command);
                session.reveal_cursor(self.visible_height);
                Ok(true)
            }
            Event::Mouse(mouse) => Ok(self.handle_mouse(mouse, session)),
            Event::Resize(..) => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, theme: &Theme, focused: bool) {
        frame.render_widget(Block::default().style(theme.base()), area);
        self.visible_height = area.height as usize;

        let Some(doc) = session.current_document() else {
            self.text_area = Rect::default();
            return;
        };
        let current_tab = session.current_document_id();
        if current_tab != self.last_tab {
            self.last_tab = current_tab;
            self.h_scroll = 0;
        }

        let buffer = doc.buffer();
        let tab_width = self.view.tab_width;
        // Drop the gutter rather than squeeze it when the text would get no room
        let gutter = match self.gutter_width(buffer.line_count()) {
            width if width < area.width => width,
            _ => 0,
        };
        let text_area = Rect::new(area.x + gutter, area.y, area.width - gutter, area.height);
        self.text_area = text_area;

        let cursor = buffer.cursor();
        let cursor_line = buffer.lines().get(cursor.line).map(String::as_str).unwrap_or("");
        let cursor_x = display_column(cursor_line, cursor.column, tab_width);
        self.update_h_scroll(cursor_x, text_area.width as usize);

        let selection = buffer.selection_range();
        let is_selected = |pos: Position| selection.is_some_and(|(start, end)| start <= pos && pos < end);
        let selected_style = Style::default().fg(theme.text).bg(theme.bg_selection);
        let width = text_area.width as usize;

        let lines: Vec<Line> = buffer
            .lines()
            .iter()
            .enumerate()
            .skip(buffer.scroll())
            .take(area.height as usize)
            .map(|(index, line)| {
                let mut spans = Vec::new();
                if gutter > 0 {
                    let number = format!("{:>w$} ", index + 1, w = gutter as usize - 2);
                    let style = if index == cursor.line {
                        theme.base()
                    } else {
                        theme.muted()
                    };
                    spans.push(Span::styled(number, style));
                    spans.push(Span::styled("│", theme.border_style()));
                }

                // Group visible cells into runs of equal style
                let mut run = String::new();
                let mut run_style = theme.base();
                let mut end_x = 0;
                for cell in cells(line, tab_width) {
                    if cell.x < self.h_scroll {
                        continue;
                    }
                    if cell.x + cell.width > self.h_scroll + width {
                        break;
                    }
                    let style = if is_selected(Position::new(index, cell.column)) {
                        selected_style
                    } else {
                        theme.base()
                    };
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push_str(&cell.text);
                    end_x = cell.x + cell.width;
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }

                // A selected line break shows as one highlighted cell
                let line_end = Position::new(index, line.chars().count());
                let break_x = end_x.max(display_column(line, line_end.column, tab_width));
                if is_selected(line_end) && break_x >= self.h_scroll && break_x < self.h_scroll + width {
                    spans.push(Span::styled(" ", selected_style));
                }

                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(theme.base()), area);

        if focused {
            let scroll = buffer.scroll();
            if cursor.line >= scroll && cursor.line < scroll + area.height as usize && cursor_x >= self.h_scroll {
                let x = text_area.x as usize + cursor_x - self.h_scroll;
                let y = text_area.y as usize + cursor.line - scroll;
                if x < (text_area.x + text_area.width) as usize {
                    frame.set_cursor_position((x as u16, y as u16));
                }
            }
        }
    }

    fn on_resize(&mut self, _cols: u16, rows: u16) {
        self.visible_height = rows as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn draw(panel: &mut EditorPanel, session: &Session, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| panel.render(f, f.area(), session, &Theme::light(), true))
            .unwrap();
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn type_keys(panel: &mut EditorPanel, session: &mut Session, text: &str) {
        let mut state = AppState::default();
        for c in text.chars() {
            let event = if c == '\n' {
                key(KeyCode::Enter, KeyModifiers::NONE)
            } else {
                key(KeyCode::Char(c), KeyModifiers::NONE)
            };
            panel.handle_input(&event, session, &mut state).unwrap();
        }
    }

    #[test]
    fn test_typing_marks_document_modified() {
        let mut panel = EditorPanel::new(ViewSettings::default());
        let mut session = Session::new();
        type_keys(&mut panel, &mut session, "hi\nthere");
        let doc = session.current_document().unwrap();
        assert_eq!(doc.text(), "hi\nthere");
        assert_eq!(doc.title(), "* Untitled");
        assert_eq!(session.status(), "Ln 2, Col 6");
    }

    #[test]
    fn test_ctrl_keys_are_not_text() {
        let mut panel = EditorPanel::new(ViewSettings::default());
        let mut session = Session::new();
        let mut state = AppState::default();
        let consumed = panel
            .handle_input(&key(KeyCode::Char('s'), KeyModifiers::CONTROL), &mut session, &mut state)
            .unwrap();
        assert!(!consumed);
        assert!(!session.current_document().unwrap().is_modified());
    }

    #[test]
    fn test_shift_arrow_selects() {
        let mut panel = EditorPanel::new(ViewSettings::default());
        let mut session = Session::new();
        let mut state = AppState::default();
        type_keys(&mut panel, &mut session, "abc");
        panel
            .handle_input(&key(KeyCode::Left, KeyModifiers::SHIFT), &mut session, &mut state)
            .unwrap();
        assert_eq!(session.copy_selection().as_deref(), Some("c"));
    }

    #[test]
    fn test_tab_inserts_spaces() {
        let view = ViewSettings {
            line_numbers: true,
            tab_width: 2,
        };
        let mut panel = EditorPanel::new(view);
        let mut session = Session::new();
        let mut state = AppState::default();
        panel
            .handle_input(&key(KeyCode::Tab, KeyModifiers::NONE), &mut session, &mut state)
            .unwrap();
        assert_eq!(session.current_document().unwrap().text(), "  ");
    }

    #[test]
    fn test_render_with_gutter() {
        let mut panel = EditorPanel::new(ViewSettings::default());
        let mut session = Session::new();
        type_keys(&mut panel, &mut session, "first\nsecond");
        let terminal = draw(&mut panel, &session, 30, 5);
        assert_eq!(row_text(&terminal, 0).trim_end(), " 1 │first");
        assert_eq!(row_text(&terminal, 1).trim_end(), " 2 │second");
    }

    #[test]
    fn test_render_without_gutter_hides_carriage_return() {
        let view = ViewSettings {
            line_numbers: false,
            tab_width: 4,
        };
        let mut panel = EditorPanel::new(view);
        let mut session = Session::new();
        session.paste("a\tb\r\nc");
        let terminal = draw(&mut panel, &session, 20, 3);
        assert_eq!(row_text(&terminal, 0).trim_end(), "a   b");
        assert_eq!(row_text(&terminal, 1).trim_end(), "c");
    }

    #[test]
    fn test_click_moves_cursor() {
        let view = ViewSettings {
            line_numbers: false,
            tab_width: 4,
        };
        let mut panel = EditorPanel::new(view);
        let mut session = Session::new();
        let mut state = AppState::default();
        session.paste("hello\nworld");
        draw(&mut panel, &session, 20, 5);

        panel
            .handle_input(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 0), &mut session, &mut state)
            .unwrap();
        assert_eq!(session.current_document().unwrap().buffer().cursor(), Position::new(0, 2));

        panel
            .handle_input(&mouse(MouseEventKind::Drag(MouseButton::Left), 3, 1), &mut session, &mut state)
            .unwrap();
        assert_eq!(session.copy_selection().as_deref(), Some("llo\nwor"));

        // Below the last line lands at the end of the text
        panel
            .handle_input(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 4), &mut session, &mut state)
            .unwrap();
        assert_eq!(session.current_document().unwrap().buffer().cursor(), Position::new(1, 5));
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let view = ViewSettings {
            line_numbers: false,
            tab_width: 4,
        };
        let mut panel = EditorPanel::new(view);
        let mut session = Session::new();
        session.paste("0123456789abcdef");
        let terminal = draw(&mut panel, &session, 10, 2);
        assert_eq!(row_text(&terminal, 0), "789abcdef ");
    }

    #[test]
    fn test_narrow_area_drops_gutter() {
        let mut panel = EditorPanel::new(ViewSettings::default());
        let mut session = Session::new();
        session.paste("abc");
        session.edit(EditCommand::move_to(Motion::DocStart));
        let terminal = draw(&mut panel, &session, 1, 24);
        assert_eq!(row_text(&terminal, 0), "a");
        assert_eq!(panel.text_area.width, 1);

        let terminal = draw(&mut panel, &session, 4, 3);
        assert_eq!(row_text(&terminal, 0), "abc ");
    }

    #[test]
    fn test_keypad_enter_is_newline() {
        let panel = EditorPanel::new(ViewSettings::default());
        let mut event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        event.state = KeyEventState::KEYPAD;
        assert_eq!(panel.key_command(&event), Some(EditCommand::Newline));
    }
}
