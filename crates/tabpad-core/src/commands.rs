//! User-level commands
//!
//! Menu items, shortcuts and tab-strip clicks all reduce to a [`Command`],
//! which the session executes. Commands are ignored while a dialog is
//! waiting for an answer.

use crate::buffer::EditCommand;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert an empty "Untitled" tab before "+" and focus it
    NewTab,
    /// Ask for a file and open it
    Open,
    /// Open a known path without asking (command-line arguments)
    OpenPath(PathBuf),
    /// Ask for a destination and save the focused document
    Save,
    /// Close the tab at an index (the close button on a tab)
    CloseTab(usize),
    /// Close the focused tab
    CloseCurrentTab,
    /// Close every tab, asking about unsaved changes, then exit
    CloseWindow,
    /// Focus the tab at an index; selecting "+" spawns a new tab
    SelectTab(usize),
    /// Focus the next document tab, wrapping around
    NextTab,
    /// Focus the previous document tab, wrapping around
    PrevTab,
    /// Switch between light and dark styling
    ToggleTheme,
    /// Edit the focused document
    Edit(EditCommand),
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::NewTab => "new_tab",
            Command::Open => "open",
            Command::OpenPath(_) => "open_path",
            Command::Save => "save",
            Command::CloseTab(_) => "close_tab",
            Command::CloseCurrentTab => "close_current_tab",
            Command::CloseWindow => "close_window",
            Command::SelectTab(_) => "select_tab",
            Command::NextTab => "next_tab",
            Command::PrevTab => "prev_tab",
            Command::ToggleTheme => "toggle_theme",
            Command::Edit(_) => "edit",
        }
    }
}
