//! Light and dark palettes
//!
//! The session decides which mode is active; this module only maps a mode
//! to colours. Palettes follow the classic notepad look: flat background,
//! grey tab borders, a slightly darker highlight for the selected tab.

use ratatui::style::{Color, Modifier, Style};
use tabpad_core::ThemeMode;

/// All semantic colors used throughout the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Backgrounds
    pub bg: Color,
    pub bg_hover: Color,
    pub bg_selection: Color,
    pub bg_status: Color,

    // Text
    pub text: Color,
    pub text_muted: Color,

    // Borders
    pub border: Color,
    pub border_selected: Color,

    // Accents
    pub accent: Color,
    pub error: Color,
    pub modified: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            bg_hover: Color::Rgb(0xCC, 0xCC, 0xCC),
            bg_selection: Color::Rgb(0xAD, 0xD6, 0xFF),
            bg_status: Color::Rgb(0xF0, 0xF0, 0xF0),

            text: Color::Rgb(0x00, 0x00, 0x00),
            text_muted: Color::Rgb(0x80, 0x80, 0x80),

            border: Color::Rgb(0xC4, 0xC4, 0xC4),
            border_selected: Color::Rgb(0x9B, 0x9B, 0x9B),

            accent: Color::Rgb(0x1E, 0x5A, 0xA0),
            error: Color::Rgb(0xB4, 0x1E, 0x1E),
            modified: Color::Rgb(0xA0, 0x64, 0x00),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(0x2B, 0x2B, 0x2B),
            bg_hover: Color::Rgb(0x40, 0x40, 0x40),
            bg_selection: Color::Rgb(0x26, 0x4F, 0x78),
            bg_status: Color::Rgb(0x33, 0x33, 0x33),

            text: Color::Rgb(0xEC, 0xEC, 0xEC),
            text_muted: Color::Rgb(0x8C, 0x8C, 0x8C),

            border: Color::Rgb(0x4D, 0x4D, 0x4D),
            border_selected: Color::Rgb(0x4D, 0x4D, 0x4D),

            accent: Color::Rgb(0x6C, 0xB6, 0xFF),
            error: Color::Rgb(0xFF, 0x6B, 0x6B),
            modified: Color::Rgb(0xE5, 0xC0, 0x7B),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Plain text on the window background
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    /// Hovered or keyboard-highlighted item
    pub fn highlight(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg_hover)
    }

    /// The focused tab
    pub fn tab_selected(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted).bg(self.bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }
}
