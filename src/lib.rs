//! Tabpad - a small multi-tab text editor for the terminal
//!
//! Built with ratatui for TUI, featuring:
//! - Any number of documents in tabs, with a "+" tab that opens a new one
//! - Open and save through a file picker, with unsaved-change prompts
//! - Cut, copy and paste through the system clipboard
//! - Light and dark themes
//!
//! Tab, document and dialog state lives in `tabpad-core`; this crate draws it
//! and turns terminal input into session calls.

pub mod app;
pub mod clipboard;
pub mod core;
pub mod events;
pub mod logging;
pub mod panels;
pub mod state;
pub mod ui;

// Re-export commonly used types
pub use app::{App, Overlay};
pub use core::{AppError, Result};
pub use events::{Event, EventBus};
pub use panels::PanelRegistry;
pub use state::AppState;
