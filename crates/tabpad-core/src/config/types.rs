//! Configuration types for Tabpad
//!
//! Defines the structure of `.tabpad.toml` configuration.

use crate::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabpadConfig {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Window appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme active at startup
    #[serde(default)]
    pub theme: ThemeMode,

    /// Draw a line-number gutter beside the text
    #[serde(default = "default_line_numbers")]
    pub line_numbers: bool,
}

fn default_line_numbers() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            line_numbers: default_line_numbers(),
        }
    }
}

/// Text editing behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Spaces inserted by Tab, and the width of a tab character on screen
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

fn default_tab_width() -> usize {
    4
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
        }
    }
}

/// Diagnostic log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `tabpad_core=debug`
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; defaults to the user cache directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Configured file, or `<cache dir>/tabpad/tabpad.log`
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join("tabpad").join("tabpad.log")))
    }
}
