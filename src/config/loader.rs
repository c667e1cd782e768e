//! Configuration file loading with precedence handling.

use crate::model::PageSize;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default catalog base URL.
pub const DEFAULT_CATALOG_URL: &str = "https://openlibrary.org";

/// Default reading-log owner.
pub const DEFAULT_READING_LOG_USER: &str = "mekBot";

/// Default authentication endpoint.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Config file is valid TOML but a value is out of range.
    #[error("Invalid value in {path}: {reason}")]
    InvalidValue {
        /// Path with the bad value.
        path: PathBuf,
        /// What was wrong.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/bookdash/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Catalog base URL.
    #[serde(default)]
    pub catalog_url: Option<String>,

    /// Owner of the reading log to display.
    #[serde(default)]
    pub reading_log_user: Option<String>,

    /// Authentication service endpoint.
    #[serde(default)]
    pub auth_endpoint: Option<String>,

    /// Authentication project id.
    #[serde(default)]
    pub auth_project: Option<String>,

    /// Records per page on startup (10, 50 or 100).
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Directory `books.csv` is written to.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Global timeout for each HTTP request, in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog base URL without a trailing slash.
    pub catalog_url: String,
    /// Owner of the listed reading log.
    pub reading_log_user: String,
    /// Session provider API root.
    pub auth_endpoint: String,
    /// Session provider project id.
    pub auth_project: String,
    /// Initial records per page.
    pub page_size: PageSize,
    /// Directory receiving `books.csv`.
    pub export_dir: PathBuf,
    /// Log file written by the tracing appender.
    pub log_file_path: PathBuf,
    /// `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            reading_log_user: DEFAULT_READING_LOG_USER.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            auth_project: String::new(),
            page_size: PageSize::default(),
            export_dir: PathBuf::from("."),
            log_file_path: default_log_path(),
            request_timeout: None,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/bookdash/bookdash.log` on Linux, or the platform
/// equivalent. Falls back to the current directory when no state directory
/// exists.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("bookdash").join("bookdash.log")
    } else {
        PathBuf::from("bookdash.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but cannot be read, parsed, or holds an
/// unsupported page size.
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

    if let Some(size) = config.page_size {
        PageSize::try_from(size).map_err(|e| ConfigError::InvalidValue {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/bookdash/config.toml` on Linux, appropriate path on other
/// platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bookdash").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `BOOKDASH_CONFIG` environment variable
/// 3. Default path `~/.config/bookdash/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("BOOKDASH_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Page sizes are validated at load time; an unsupported one falls back to the
/// default here.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        catalog_url: config.catalog_url.unwrap_or(defaults.catalog_url),
        reading_log_user: config.reading_log_user.unwrap_or(defaults.reading_log_user),
        auth_endpoint: config.auth_endpoint.unwrap_or(defaults.auth_endpoint),
        auth_project: config.auth_project.unwrap_or(defaults.auth_project),
        page_size: config
            .page_size
            .and_then(|size| PageSize::try_from(size).ok())
            .unwrap_or(defaults.page_size),
        export_dir: config.export_dir.unwrap_or(defaults.export_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        request_timeout: config
            .request_timeout_secs
            .map(Duration::from_secs)
            .or(defaults.request_timeout),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `BOOKDASH_CATALOG_URL`
/// - `BOOKDASH_USER`
/// - `BOOKDASH_AUTH_ENDPOINT`
/// - `BOOKDASH_AUTH_PROJECT`
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("BOOKDASH_CATALOG_URL") {
        config.catalog_url = url;
    }
    if let Ok(user) = std::env::var("BOOKDASH_USER") {
        config.reading_log_user = user;
    }
    if let Ok(endpoint) = std::env::var("BOOKDASH_AUTH_ENDPOINT") {
        config.auth_endpoint = endpoint;
    }
    if let Ok(project) = std::env::var("BOOKDASH_AUTH_PROJECT") {
        config.auth_project = project;
    }

    config
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--user`.
    pub reading_log_user: Option<String>,
    /// `--page-size`.
    pub page_size: Option<PageSize>,
    /// `--export-dir`.
    pub export_dir: Option<PathBuf>,
    /// `--catalog-url`.
    pub catalog_url: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(user) = cli.reading_log_user {
        config.reading_log_user = user;
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    if let Some(dir) = cli.export_dir {
        config.export_dir = dir;
    }
    if let Some(url) = cli.catalog_url {
        config.catalog_url = url;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
