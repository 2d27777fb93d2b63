//! Pending dialogs
//!
//! Operations that need an answer from the user (a path, a yes/no, or an
//! acknowledgement of an error) queue a dialog on the session. The UI shows
//! the front of the queue modally and hands the answer back.

use crate::tabs::TabId;

/// Identifier that changes whenever a new dialog is queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(pub u64);

/// What happens once a save prompt has been answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSave {
    /// Plain save: nothing further
    Nothing,
    /// Save was requested while closing the tab: remove it afterwards
    CloseTab,
}

/// A question for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Pick a file to open
    OpenFile,
    /// Pick a destination for the tab's text
    SaveFile { tab: TabId, then: AfterSave },
    /// Ask whether to save a modified tab before it is closed
    ConfirmSave { tab: TabId, title: String },
    /// Report a failure
    Error { message: String },
}

impl Dialog {
    /// Title for the dialog frame
    pub fn heading(&self) -> &'static str {
        match self {
            Dialog::OpenFile => "Open file",
            Dialog::SaveFile { .. } => "Save file",
            Dialog::ConfirmSave { .. } => "Unsaved Changes",
            Dialog::Error { .. } => "Error",
        }
    }

    /// Body text, where the dialog has one
    pub fn message(&self) -> Option<String> {
        match self {
            Dialog::ConfirmSave { title, .. } => Some(format!(
                "Do you want to save changes to \"{}\" before closing?",
                title.trim_start_matches(crate::MODIFIED_MARKER).trim_start()
            )),
            Dialog::Error { message } => Some(message.clone()),
            Dialog::OpenFile | Dialog::SaveFile { .. } => None,
        }
    }

    pub fn is_file_prompt(&self) -> bool {
        matches!(self, Dialog::OpenFile | Dialog::SaveFile { .. })
    }
}

/// A queued dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDialog {
    pub id: DialogId,
    pub dialog: Dialog,
}
