//! Configuration file loading with precedence handling.

use crate::model::DEFAULT_CAPACITY;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Questions offered in the sidebar when the config file names none.
pub const DEFAULT_SUGGESTED_QUESTIONS: [&str; 4] = [
    "Outline of a course",
    "Courses about Chroma",
    "Explain retrieval-augmented generation",
    "Details of a course's lesson",
];

/// Environment variable overriding the backend base URL.
pub const ENV_API_URL: &str = "COURSECHAT_API_URL";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "COURSECHAT_DATA_DIR";

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "COURSECHAT_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configured value is unusable.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/coursechat/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Backend base URL (e.g. `http://localhost:8000/api`).
    #[serde(default)]
    pub api_url: Option<String>,

    /// Number of chats kept in history.
    #[serde(default)]
    pub max_chats: Option<usize>,

    /// Directory holding the stored chat history.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Questions listed in the sidebar.
    #[serde(default)]
    pub suggested_questions: Option<Vec<String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Backend base URL.
    pub api_url: String,
    /// Ledger capacity, at least 1.
    pub max_chats: usize,
    /// Chat history directory.
    pub data_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Sidebar questions.
    pub suggested_questions: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_chats: DEFAULT_CAPACITY,
            data_dir: default_data_dir(),
            log_file_path: default_log_path(),
            suggested_questions: DEFAULT_SUGGESTED_QUESTIONS
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/coursechat/coursechat.log` on Linux, the
/// platform state or data directory elsewhere. Falls back to the current
/// directory when neither can be determined.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir().or_else(dirs::data_local_dir) {
        Some(dir) => dir.join("coursechat").join("coursechat.log"),
        None => PathBuf::from("coursechat.log"),
    }
}

/// Resolve the default chat history directory.
///
/// Returns `~/.local/share/coursechat` on Linux, the platform data
/// directory elsewhere, or `./coursechat-data` as a last resort.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("coursechat"),
        None => PathBuf::from("coursechat-data"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/coursechat/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("coursechat").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `COURSECHAT_CONFIG` environment variable
/// 3. Default path `~/.config/coursechat/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default. An empty `suggested_questions` list is honoured (no sidebar
/// suggestions).
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_url: config.api_url.unwrap_or(defaults.api_url),
        max_chats: config.max_chats.unwrap_or(defaults.max_chats).max(1),
        data_dir: config.data_dir.unwrap_or(defaults.data_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        suggested_questions: config
            .suggested_questions
            .unwrap_or(defaults.suggested_questions),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `COURSECHAT_API_URL`: Override backend base URL
/// - `COURSECHAT_DATA_DIR`: Override chat history directory
///
/// Empty values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(url) = non_empty_var(ENV_API_URL) {
        config.api_url = url;
    }

    if let Some(dir) = non_empty_var(ENV_DATA_DIR) {
        config.data_dir = PathBuf::from(dir);
    }

    config
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Overrides collected from command-line flags.
///
/// `None` means the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
    /// `--data-dir`
    pub data_dir: Option<PathBuf>,
    /// `--max-chats`
    pub max_chats: Option<usize>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, overrides: CliOverrides) -> ResolvedConfig {
    if let Some(url) = overrides.api_url {
        config.api_url = url;
    }

    if let Some(dir) = overrides.data_dir {
        config.data_dir = dir;
    }

    if let Some(max) = overrides.max_chats {
        config.max_chats = max.max(1);
    }

    config
}

/// Check values that would only fail later, at first use.
///
/// # Errors
///
/// [`ConfigError::InvalidPath`] when the API URL is not an `http(s)` URL or
/// the data directory path is empty.
pub fn validate(config: &ResolvedConfig) -> Result<(), ConfigError> {
    let url = config.api_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidPath(format!(
            "api_url must start with http:// or https://, got {url:?}"
        )));
    }
    if config.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath("data_dir is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
