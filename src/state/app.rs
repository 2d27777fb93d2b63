//! Front-end application state
//!
//! Kept minimal: view settings, input mode and the quit flag. Panel-specific
//! state lives in panels.

use super::InputMode;
use std::path::PathBuf;
use tabpad_core::TabpadConfig;

/// Display options taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub line_numbers: bool,
    pub tab_width: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&TabpadConfig::default())
    }
}

impl From<&TabpadConfig> for ViewSettings {
    fn from(config: &TabpadConfig) -> Self {
        Self {
            line_numbers: config.ui.line_numbers,
            tab_width: config.editor.tab_width.max(1),
        }
    }
}

pub struct AppState {
    /// Current input mode
    pub input_mode: InputMode,

    /// Application should quit
    pub should_quit: bool,

    /// Directory file pickers start in
    pub cwd: PathBuf,

    pub view: ViewSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewSettings::default())
    }
}

impl AppState {
    pub fn new(view: ViewSettings) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| {
            dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
        });

        Self {
            input_mode: InputMode::default(),
            should_quit: false,
            cwd,
            view,
        }
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
