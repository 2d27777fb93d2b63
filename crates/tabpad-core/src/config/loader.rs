//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.tabpad.toml` in the working directory or the
//! user config directory.

use super::types::TabpadConfig;
use crate::theme::ThemeMode;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// A loaded configuration plus the environment overrides that were ignored
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: TabpadConfig,
    /// Overrides that could not be applied; report them, don't fail on them
    pub ignored: Vec<ConfigError>,
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. `.tabpad.toml` in `project_dir`
/// 2. User-level `~/.config/tabpad/config.toml`
/// 3. Default configuration
///
/// `TABPAD_THEME` and `TABPAD_LOG` override whatever was loaded.
pub fn load_config(project_dir: &Path) -> Result<LoadedConfig, ConfigError> {
    let project_config = project_dir.join(".tabpad.toml");
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    Ok(env_config())
}

/// Defaults with the environment overrides applied
///
/// Also the fallback when a config file cannot be used.
pub fn env_config() -> LoadedConfig {
    apply_env_overrides(TabpadConfig::default(), env_lookup)
}

/// Path of the user-level config file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tabpad").join("config.toml"))
}

fn load_from_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)?;
    parse_config(&content, env_lookup)
}

/// Parse TOML text, expand `${VAR}` patterns, apply overrides and validate
fn parse_config(
    content: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LoadedConfig, ConfigError> {
    let mut config: TabpadConfig = toml::from_str(content)?;
    expand_env_vars(&mut config, &lookup);
    let loaded = apply_env_overrides(config, &lookup);
    validate(&loaded.config)?;
    Ok(loaded)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_regex() -> Option<&'static Regex> {
    static ENV_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    ENV_REGEX
        .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").ok())
        .as_ref()
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars(config: &mut TabpadConfig, lookup: &impl Fn(&str) -> Option<String>) {
    config.log.level = expand_string(&config.log.level, lookup);
    if let Some(file) = config.log.file.take() {
        let expanded = expand_string(&file.to_string_lossy(), lookup);
        config.log.file = Some(PathBuf::from(expanded));
    }
}

/// Expand environment variables in a single string; unknown ones are kept
fn expand_string(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let Some(regex) = env_regex() else {
        return s.to_string();
    };
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides
///
/// - TABPAD_THEME -> ui.theme (`light` or `dark`; anything else is ignored)
/// - TABPAD_LOG -> log.level
fn apply_env_overrides(
    mut config: TabpadConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> LoadedConfig {
    let mut ignored = Vec::new();

    if let Some(theme) = lookup("TABPAD_THEME").filter(|v| !v.is_empty()) {
        match ThemeMode::parse(&theme) {
            Some(mode) => config.ui.theme = mode,
            None => ignored.push(ConfigError::InvalidValue {
                key: "TABPAD_THEME",
                value: theme,
            }),
        }
    }

    if let Some(level) = lookup("TABPAD_LOG").filter(|v| !v.is_empty()) {
        config.log.level = level;
    }

    LoadedConfig { config, ignored }
}

fn validate(config: &TabpadConfig) -> Result<(), ConfigError> {
    if !(1..=16).contains(&config.editor.tab_width) {
        return Err(ConfigError::InvalidValue {
            key: "editor.tab_width",
            value: config.editor.tab_width.to_string(),
        });
    }
    Ok(())
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Tabpad Configuration
# Place this file in your working directory as .tabpad.toml
# or in ~/.config/tabpad/config.toml for global settings

[ui]
# Theme at startup: light, dark (Ctrl+T switches while running)
theme = "light"

# Show line numbers beside the text
line_numbers = true

[editor]
# Spaces inserted by Tab, and the display width of tab characters
tab_width = 4

[log]
# tracing filter directive (TABPAD_LOG overrides)
level = "info"

# Log file; ${VAR} patterns are expanded
# file = "${HOME}/.cache/tabpad/tabpad.log"
"#
}
