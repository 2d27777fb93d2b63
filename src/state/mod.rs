//! Application state management
//!
//! Contains the front-end state container and input mode state machine.
//! Documents, tabs and theme live in the [`tabpad_core::Session`].

mod app;
mod input_mode;

pub use app::{AppState, ViewSettings};
pub use input_mode::InputMode;
