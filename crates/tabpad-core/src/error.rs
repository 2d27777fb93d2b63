//! Error types for Tabpad Core
//!
//! All errors are typed - no .unwrap() or .expect() in production code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Tabpad Core operations
pub type Result<T> = std::result::Result<T, TabpadError>;

/// Unified error type for Tabpad Core
#[derive(Error, Debug)]
pub enum TabpadError {
    /// Reading a file failed (missing, unreadable, or not valid UTF-8)
    #[error("Could not open {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a file failed
    #[error("Could not save {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl TabpadError {
    /// Create an invalid operation error
    pub fn invalid(msg: impl Into<String>) -> Self {
        TabpadError::InvalidOperation(msg.into())
    }

    /// Whether this error came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, TabpadError::Read { .. } | TabpadError::Write { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_read_error_display() {
        let err = TabpadError::Read {
            path: PathBuf::from("/tmp/missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert_eq!(err.to_string(), "Could not open /tmp/missing.txt: No such file");
        assert!(err.is_io());
    }

    #[test]
    fn test_write_error_display() {
        let err = TabpadError::Write {
            path: PathBuf::from("/root/locked.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Could not save /root/locked.txt: denied");
    }

    #[test]
    fn test_error_source_chain() {
        let err = TabpadError::Read {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_operation() {
        let err = TabpadError::invalid("no document");
        assert_eq!(err.to_string(), "Invalid operation: no document");
        assert!(!err.is_io());
    }
}
