//! Yes/No confirmation and error message boxes

use super::layout::centered_rect;
use super::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Yes/No question; Yes is the default answer
#[derive(Debug)]
pub struct ConfirmDialog {
    heading: String,
    message: String,
    yes_selected: bool,
    yes_area: Option<Rect>,
    no_area: Option<Rect>,
}

impl ConfirmDialog {
    pub fn new(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            message: message.into(),
            yes_selected: true,
            yes_area: None,
            no_area: None,
        }
    }

    pub fn is_yes_selected(&self) -> bool {
        self.yes_selected
    }

    /// `Some(true)` for Yes, `Some(false)` for No, `None` while undecided
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.yes_selected),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.yes_selected = !self.yes_selected;
                None
            }
            _ => None,
        }
    }

    pub fn handle_click(&mut self, x: u16, y: u16) -> Option<bool> {
        let pos = Position::new(x, y);
        if self.yes_area.is_some_and(|r| r.contains(pos)) {
            Some(true)
        } else if self.no_area.is_some_and(|r| r.contains(pos)) {
            Some(false)
        } else {
            None
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = (self.message.len() as u16 + 6).clamp(30, 70);
        let body_rows = (self.message.len() as u16 / width.saturating_sub(4).max(1)) + 1;
        let modal_area = centered_rect(width, body_rows + 5, area);

        frame.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(format!(" {} ", self.heading))
            .borders(Borders::ALL)
            .border_style(theme.border_style().fg(theme.border_selected))
            .style(theme.base());
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);
        if inner.height < 3 {
            return;
        }

        let body = Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), body_rows);
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(theme.base())
                .wrap(Wrap { trim: true }),
            body,
        );

        let button_y = inner.y + inner.height - 1;
        let yes_label = " Yes ";
        let no_label = " No ";
        let buttons_width = (yes_label.len() + 3 + no_label.len()) as u16;
        let start_x = inner.x + inner.width.saturating_sub(buttons_width) / 2;

        let style_for = |selected: bool| {
            if selected {
                theme.highlight().add_modifier(Modifier::BOLD)
            } else {
                theme.base()
            }
        };
        let line = Line::from(vec![
            Span::styled(yes_label, style_for(self.yes_selected)),
            Span::styled("   ", theme.base()),
            Span::styled(no_label, style_for(!self.yes_selected)),
        ]);
        frame.render_widget(
            Paragraph::new(line),
            Rect::new(start_x, button_y, buttons_width.min(inner.width), 1),
        );

        self.yes_area = Some(Rect::new(start_x, button_y, yes_label.len() as u16, 1));
        self.no_area = Some(Rect::new(
            start_x + yes_label.len() as u16 + 3,
            button_y,
            no_label.len() as u16,
            1,
        ));
    }
}

/// Error report with a single OK button
#[derive(Debug)]
pub struct MessageBox {
    heading: String,
    message: String,
    modal_area: Option<Rect>,
}

impl MessageBox {
    pub fn new(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            message: message.into(),
            modal_area: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` once the box is dismissed
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }

    /// Any click inside the box dismisses it
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        self.modal_area
            .is_some_and(|r| r.contains(Position::new(x, y)))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = (self.message.len() as u16 + 6).clamp(30, 72);
        let body_rows = (self.message.len() as u16 / width.saturating_sub(4).max(1)) + 1;
        let modal_area = centered_rect(width, body_rows + 5, area);
        self.modal_area = Some(modal_area);

        frame.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.heading),
                theme.base().fg(theme.error).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(theme.border_style().fg(theme.error))
            .style(theme.base());
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);
        if inner.height < 3 {
            return;
        }

        let body = Rect::new(inner.x + 1, inner.y + 1, inner.width.saturating_sub(2), body_rows);
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(theme.base())
                .wrap(Wrap { trim: true }),
            body,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(" OK ", theme.highlight().add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_confirm_keys() {
        let mut dialog = ConfirmDialog::new("Unsaved Changes", "Save?");
        assert_eq!(dialog.handle_key(&key(KeyCode::Enter)), Some(true));
        assert_eq!(dialog.handle_key(&key(KeyCode::Char('n'))), Some(false));
        assert_eq!(dialog.handle_key(&key(KeyCode::Esc)), Some(false));

        assert_eq!(dialog.handle_key(&key(KeyCode::Right)), None);
        assert!(!dialog.is_yes_selected());
        assert_eq!(dialog.handle_key(&key(KeyCode::Enter)), Some(false));
        assert_eq!(dialog.handle_key(&key(KeyCode::Char('y'))), Some(true));
        assert_eq!(dialog.handle_key(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_confirm_buttons_clickable() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut dialog = ConfirmDialog::new(
            "Unsaved Changes",
            "Do you want to save changes to \"a.txt\" before closing?",
        );
        terminal
            .draw(|f| dialog.render(f, f.area(), &Theme::light()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Unsaved Changes"));
        assert!(text.contains("a.txt"));

        let yes = dialog.yes_area.unwrap();
        let no = dialog.no_area.unwrap();
        assert_eq!(dialog.handle_click(yes.x + 1, yes.y), Some(true));
        assert_eq!(dialog.handle_click(no.x + 1, no.y), Some(false));
        assert_eq!(dialog.handle_click(0, 0), None);
    }

    #[test]
    fn test_message_box() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut message = MessageBox::new("Error", "Could not open /nope.txt: not found");
        terminal
            .draw(|f| message.render(f, f.area(), &Theme::dark()))
            .unwrap();
        assert!(screen_text(&terminal).contains("Could not open /nope.txt"));
        assert!(message.handle_key(&key(KeyCode::Enter)));
        assert!(!message.handle_key(&key(KeyCode::Char('q'))));
        assert!(!message.handle_click(0, 0));
    }
}
