//! Input mode state machine
//!
//! Decides where keyboard input goes: the editor, the menu bar, or the
//! dialog currently shown over everything else.

use tabpad_core::DialogId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Typing goes to the focused document
    #[default]
    Normal,

    /// A menu is open and owns the keyboard
    Menu,

    /// A dialog is open; nothing else reacts until it is answered
    Modal { dialog: DialogId },
}

impl InputMode {
    pub fn is_normal(&self) -> bool {
        matches!(self, InputMode::Normal)
    }

    pub fn is_menu(&self) -> bool {
        matches!(self, InputMode::Menu)
    }

    pub fn is_modal(&self) -> bool {
        matches!(self, InputMode::Modal { .. })
    }

    /// Check if a specific dialog is the one on screen
    pub fn is_modal_open(&self, id: DialogId) -> bool {
        matches!(self, InputMode::Modal { dialog } if *dialog == id)
    }

    pub fn to_normal(&mut self) {
        *self = InputMode::Normal;
    }

    pub fn open_menu(&mut self) {
        *self = InputMode::Menu;
    }

    pub fn open_modal(&mut self, dialog: DialogId) {
        *self = InputMode::Modal { dialog };
    }

    /// Name shown in the status bar
    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Normal => "EDIT",
            InputMode::Menu => "MENU",
            InputMode::Modal { .. } => "DIALOG",
        }
    }
}
