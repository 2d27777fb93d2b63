//! Diagnostic logging
//!
//! The terminal belongs to the UI, so log lines go to a file instead of
//! stderr. Any failure while setting up leaves logging disabled.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tabpad_core::config::LogConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber; returns the log file in use
pub fn init(config: &LogConfig) -> Option<PathBuf> {
    let path = config.file_path()?;
    let file = open_log_file(&path).ok()?;

    tracing_subscriber::registry()
        .with(filter(&config.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .ok()?;

    tracing::info!(version = tabpad_core::version(), log = %path.display(), "tabpad starting");
    Some(path)
}

/// Filter from a directive, falling back to `info` when it does not parse
fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tabpad.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_bad_directive_falls_back() {
        assert_eq!(filter("[[[").to_string(), "info");
        assert_eq!(filter("tabpad_core=debug").to_string(), "tabpad_core=debug");
    }
}
