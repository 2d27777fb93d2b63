//! Configuration module for Tabpad
//!
//! Handles loading and parsing of `.tabpad.toml` configuration files
//! with support for environment variable expansion.

mod loader;
mod types;

pub use loader::{env_config, load_config, sample_config, user_config_path, ConfigError, LoadedConfig};
pub use types::{EditorConfig, LogConfig, TabpadConfig, UiConfig};
