//! Tab strip: one entry per document plus the trailing "+" control

use super::Panel;
use crate::core::Result;
use crate::events::Event;
use crate::state::AppState;
use crate::ui::Theme;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use tabpad_core::{Command, Session, Tab};
use unicode_width::UnicodeWidthStr;

const CLOSE_GLYPH: &str = "×";
const SEPARATOR: &str = "│";

/// Screen area of one drawn tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TabHit {
    index: usize,
    area: Rect,
    /// The close button, absent on the "+" control
    close: Option<Rect>,
}

pub struct TabStrip {
    area: Rect,
    hits: Vec<TabHit>,
    hover: Option<usize>,
    /// First tab drawn when the strip overflows
    first_visible: usize,
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}

fn label(tab: &Tab) -> String {
    if tab.is_closable() {
        format!(" {} {} ", tab.title(), CLOSE_GLYPH)
    } else {
        format!(" {} ", tab.title())
    }
}

impl TabStrip {
    pub fn new() -> Self {
        Self {
            area: Rect::default(),
            hits: Vec::new(),
            hover: None,
            first_visible: 0,
        }
    }

    fn hit(&self, x: u16, y: u16) -> Option<TabHit> {
        let pos = Position::new(x, y);
        self.hits.iter().copied().find(|hit| hit.area.contains(pos))
    }

    /// Scroll so the focused tab is drawn
    fn keep_current_visible(&mut self, widths: &[u16], current: usize) {
        if current < self.first_visible {
            self.first_visible = current;
            return;
        }
        let width = self.area.width;
        loop {
            let used: u16 = widths[self.first_visible..=current]
                .iter()
                .map(|w| w + 1)
                .sum();
            if used <= width || self.first_visible == current {
                break;
            }
            self.first_visible += 1;
        }
    }
}

impl Panel for TabStrip {
    fn name(&self) -> &str {
        "Tabs"
    }

    fn handle_input(
        &mut self,
        event: &Event,
        session: &mut Session,
        _state: &mut AppState,
    ) -> Result<bool> {
        match event {
            Event::Key(key) => {
                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                let alt = key.modifiers.contains(KeyModifiers::ALT);
                let command = match key.code {
                    KeyCode::Char(c @ '1'..='9') if alt => {
                        let index = c as usize - '1' as usize;
                        if index >= session.tabs().document_count() {
                            return Ok(true);
                        }
                        Command::SelectTab(index)
                    }
                    KeyCode::PageDown if ctrl => Command::NextTab,
                    KeyCode::PageUp if ctrl => Command::PrevTab,
                    _ => return Ok(false),
                };
                session.execute(command);
                Ok(true)
            }
            Event::Mouse(mouse) => {
                let inside = self.area.contains(Position::new(mouse.column, mouse.row));
                if !inside {
                    self.hover = None;
                    return Ok(false);
                }
                let hit = self.hit(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(hit) = hit {
                            let on_close = hit
                                .close
                                .is_some_and(|r| r.contains(Position::new(mouse.column, mouse.row)));
                            session.execute(if on_close {
                                Command::CloseTab(hit.index)
                            } else {
                                Command::SelectTab(hit.index)
                            });
                        }
                    }
                    MouseEventKind::Down(MouseButton::Middle) => {
                        if let Some(hit) = hit {
                            session.execute(Command::CloseTab(hit.index));
                        }
                    }
                    MouseEventKind::Moved => self.hover = hit.map(|h| h.index),
                    MouseEventKind::ScrollDown => session.execute(Command::NextTab),
                    MouseEventKind::ScrollUp => session.execute(Command::PrevTab),
                    _ => {}
                }
                Ok(true)
            }
            Event::Resize(..) => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session, theme: &Theme, _focused: bool) {
        self.area = area;
        self.hits.clear();
        frame.render_widget(Block::default().style(theme.base()), area);

        let tabs = session.tabs();
        let labels: Vec<String> = tabs.tabs().iter().map(label).collect();
        let widths: Vec<u16> = labels.iter().map(|l| l.width() as u16).collect();
        self.first_visible = self.first_visible.min(labels.len().saturating_sub(1));
        if let Some(current) = tabs.current_index() {
            self.keep_current_visible(&widths, current);
        }

        let mut spans = Vec::new();
        let mut x = area.x;
        let right = area.x + area.width;
        for (index, tab) in tabs.tabs().iter().enumerate().skip(self.first_visible) {
            let width = widths[index];
            if x + width > right {
                break;
            }
            let style = if tabs.current_index() == Some(index) {
                theme.tab_selected()
            } else if self.hover == Some(index) {
                theme.base().bg(theme.bg_hover)
            } else {
                theme.base()
            };
            let style = if tab.document().is_some_and(|d| d.is_modified()) {
                style.add_modifier(Modifier::ITALIC)
            } else {
                style
            };
            spans.push(Span::styled(labels[index].clone(), style));

            let close = tab.is_closable().then(|| {
                let glyph_x = x + width - 1 - CLOSE_GLYPH.width() as u16;
                Rect::new(glyph_x, area.y, CLOSE_GLYPH.width() as u16, 1)
            });
            self.hits.push(TabHit {
                index,
                area: Rect::new(x, area.y, width, 1),
                close,
            });

            x += width;
            if x < right {
                spans.push(Span::styled(SEPARATOR, theme.border_style()));
                x += 1;
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
