//! Error types for the tabpad binary using thiserror
//!
//! All errors are typed - no .unwrap() or .expect() in production code.

use thiserror::Error;
use tabpad_core::TabpadError;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] TabpadError),

    #[error("{0}")]
    Usage(String),
}

/// Convenience Result type for the binary
pub type Result<T> = std::result::Result<T, AppError>;
