//! Whole-file text I/O
//!
//! Every read and write is a single call; the handle never outlives it.

use crate::error::{Result, TabpadError};
use std::path::Path;

/// Read a file as UTF-8 text
///
/// Missing files, permission problems and invalid UTF-8 all surface as
/// [`TabpadError::Read`].
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "read failed");
        TabpadError::Read {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Write text to a file, replacing whatever was there
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| {
        tracing::warn!(path = %path.display(), error = %source, "write failed");
        TabpadError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// The final path component, used as a tab title
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
