//! Main render function

use super::layout::get_layout;
use super::theme::Theme;
use crate::app::{App, Overlay};
use crate::panels::Panel;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tabpad_core::{Session, ThemeMode};
use unicode_width::UnicodeWidthStr;

const KEY_HINTS: &str = "F10 Menu  Ctrl+Q Exit ";

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = Theme::for_mode(app.session.theme());
    let layout = get_layout(area);
    app.layout = layout;

    frame.render_widget(Block::default().style(theme.base()), area);

    app.menu.render_bar(frame, layout.menu_bar, &theme);
    app.panels
        .tab_strip
        .render(frame, layout.tab_strip, &app.session, &theme, false);
    let editor_focused = app.state.input_mode.is_normal();
    app.panels
        .editor
        .render(frame, layout.editor, &app.session, &theme, editor_focused);
    render_status_bar(frame, layout.status, &app.session, &app.state, &theme);

    // Popups last so they sit on top
    app.menu.render_dropdown(frame, area, &theme);
    match &mut app.overlay {
        Overlay::None => {}
        Overlay::Picker(picker) => picker.render(frame, area, &theme),
        Overlay::Confirm(dialog) => dialog.render(frame, area, &theme),
        Overlay::Message(message) => message.render(frame, area, &theme),
    }
}

fn theme_name(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "Light",
        ThemeMode::Dark => "Dark",
    }
}

/// Status text on the left, mode, theme and key hints on the right
fn render_status_bar(frame: &mut Frame, area: Rect, session: &Session, state: &AppState, theme: &Theme) {
    let style = theme.base().bg(theme.bg_status);
    let right = Line::from(vec![
        Span::styled(format!(" {} ", state.input_mode.label()), theme.highlight()),
        Span::styled(format!("  {}  ", theme_name(session.theme())), style),
        Span::styled(KEY_HINTS, theme.muted().bg(theme.bg_status)),
    ]);
    let right_width = right.width() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_width)])
        .split(area);

    let status = session.status();
    let left = if status.width() + 1 > chunks[0].width as usize {
        let keep = (chunks[0].width as usize).saturating_sub(1);
        status.chars().take(keep).collect::<String>()
    } else {
        status.to_string()
    };

    frame.render_widget(Paragraph::new(format!(" {}", left)).style(style), chunks[0]);
    frame.render_widget(Paragraph::new(right).style(style), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewSettings;
    use ratatui::{backend::TestBackend, Terminal};

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_full_window() {
        let mut app = App::new(Session::new(), ViewSettings::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();

        assert!(row(&terminal, 0).contains("File"));
        assert!(row(&terminal, 0).contains("View"));
        assert!(row(&terminal, 1).starts_with(" Untitled × │ + "));
        assert!(row(&terminal, 2).contains("1 │"));

        let status = row(&terminal, 7);
        assert!(status.starts_with(" Ln 1, Col 1"));
        assert!(status.contains("Light"));
        assert!(status.contains("Ctrl+Q Exit"));
        assert_eq!(app.layout.status.y, 7);
    }

    #[test]
    fn test_one_column_terminal() {
        let mut app = App::new(Session::new(), ViewSettings::default());
        app.resize(1, 24);
        let mut terminal = Terminal::new(TestBackend::new(1, 24)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert_eq!(app.layout.editor.width, 1);
    }

    #[test]
    fn test_status_shows_dark_theme() {
        let mut app = App::new(Session::with_theme(ThemeMode::Dark), ViewSettings::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(row(&terminal, 5).contains("Dark"));
    }
}
