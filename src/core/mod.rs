//! Core infrastructure module
//!
//! Error types shared by the terminal front end.

mod error;

pub use error::{AppError, Result};
