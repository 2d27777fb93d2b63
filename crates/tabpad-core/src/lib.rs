//! Tabpad Core - tab and document management for Tabpad
//!
//! This crate provides the UI-agnostic half of the editor:
//! - Text buffers with cursor, selection and undo history
//! - Documents (a buffer plus its file path and modified flag)
//! - The tab sequence with its trailing "add tab" control
//! - The editing session: open/save/close flows, dialogs, theme state
//! - Configuration loading
//!
//! Any UI can drive a [`Session`]: it forwards user actions as method calls
//! (or [`Command`]s), renders the tab set and status line, and answers the
//! dialogs the session queues.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   Command / answers   ┌──────────────────┐
//! │   UI (tabpad)     │ ─────────────────────→│  tabpad-core     │
//! │ menus, tab strip, │                       │  Session         │
//! │ dialogs, editor   │ ←─────────────────────│  TabSet, Dialogs │
//! └───────────────────┘   tabs, status, queue └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use tabpad_core::{buffer::EditCommand, Session};
//!
//! let mut session = Session::new();
//! session.edit(EditCommand::InsertStr("hello".into()));
//! assert_eq!(session.tabs().current_tab().map(|t| t.title()), Some("* Untitled".into()));
//! ```

pub mod buffer;
pub mod commands;
pub mod config;
pub mod dialog;
pub mod document;
pub mod error;
pub mod files;
pub mod session;
pub mod tabs;
pub mod theme;

// Re-export commonly used types
pub use buffer::{EditCommand, EditOutcome, Motion, Position, TextBuffer};
pub use commands::Command;
pub use config::{env_config, load_config, sample_config, ConfigError, LoadedConfig, TabpadConfig};
pub use dialog::{AfterSave, Dialog, DialogId, PendingDialog};
pub use document::{Document, MODIFIED_MARKER, UNTITLED};
pub use error::{Result, TabpadError};
pub use session::Session;
pub use tabs::{Tab, TabId, TabKind, TabSet, ADD_TAB_LABEL};
pub use theme::ThemeMode;

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
