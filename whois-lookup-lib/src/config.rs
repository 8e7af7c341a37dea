//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and `WL_*`
//! environment variables and merging them with proper precedence rules.
//! The API key is only ever read from these runtime sources.

use crate::error::LookupError;
use crate::types::{DisplayMode, LookupConfig};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Upstream API settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    /// Output preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// API key for the lookup service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Endpoint override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Request timeout (as string, e.g., "5s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

/// `[display]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Initial display mode ("domain", "contact", "both")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Emit JSON instead of tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl FileConfig {
    /// Apply this file's settings on top of `config`.
    pub fn apply_to(&self, mut config: LookupConfig) -> LookupConfig {
        if let Some(api) = &self.api {
            if let Some(key) = &api.key {
                config = config.with_api_key(key.clone());
            }
            if let Some(endpoint) = &api.endpoint {
                config = config.with_endpoint(endpoint.clone());
            }
            if let Some(secs) = api.timeout.as_deref().and_then(parse_timeout_string) {
                config = config.with_timeout(Duration::from_secs(secs));
            }
        }
        config
    }

    /// Display mode from the file, if set and valid.
    pub fn display_mode(&self) -> Option<DisplayMode> {
        self.display
            .as_ref()
            .and_then(|d| d.mode.as_deref())
            .and_then(|m| m.parse().ok())
    }

    /// JSON output preference from the file, if set.
    pub fn json(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.json)
    }
}

/// Configuration discovery and loading functionality.
#[derive(Debug, Default)]
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, LookupError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LookupError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            LookupError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            LookupError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;
        debug!(path = %path.display(), "loaded configuration file");

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is lowest, then the home-directory file, then the local
    /// file in the working directory.
    pub fn discover_and_load(&self) -> Result<FileConfig, LookupError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        let candidates = [
            self.get_xdg_config_path(),
            self.get_global_config_path(),
            self.get_local_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            match self.load_file(&path) {
                Ok(config) => {
                    merged_config = self.merge_configs(merged_config, config);
                    loaded_files.push(path);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping config file"),
            }
        }

        if loaded_files.len() > 1 {
            info!(
                files = ?loaded_files,
                "multiple config files found, later files take precedence"
            );
        }

        Ok(merged_config)
    }

    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./whois-lookup.toml", "./.whois-lookup.toml"];

        candidates
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }

    /// Looks for configuration files in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        let candidates = [".whois-lookup.toml", "whois-lookup.toml"];

        candidates
            .iter()
            .map(|candidate| Path::new(&home).join(candidate))
            .find(|path| path.exists())
    }

    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("whois-lookup").join("config.toml");
        path.exists().then_some(path)
    }

    /// Merge two configurations, values in `higher` winning.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            api: match (lower.api, higher.api) {
                (Some(mut lower_api), Some(higher_api)) => {
                    if higher_api.key.is_some() {
                        lower_api.key = higher_api.key;
                    }
                    if higher_api.endpoint.is_some() {
                        lower_api.endpoint = higher_api.endpoint;
                    }
                    if higher_api.timeout.is_some() {
                        lower_api.timeout = higher_api.timeout;
                    }
                    Some(lower_api)
                }
                (lower_api, higher_api) => higher_api.or(lower_api),
            },
            display: match (lower.display, higher.display) {
                (Some(mut lower_display), Some(higher_display)) => {
                    if higher_display.mode.is_some() {
                        lower_display.mode = higher_display.mode;
                    }
                    if higher_display.json.is_some() {
                        lower_display.json = higher_display.json;
                    }
                    Some(lower_display)
                }
                (lower_display, higher_display) => higher_display.or(lower_display),
            },
        }
    }

    fn validate_config(&self, config: &FileConfig) -> Result<(), LookupError> {
        if let Some(api) = &config.api {
            if let Some(timeout_str) = &api.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(LookupError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m' (at most 60m)",
                        timeout_str
                    )));
                }
            }

            if let Some(endpoint) = &api.endpoint {
                if endpoint.trim().is_empty() {
                    return Err(LookupError::config("Endpoint cannot be empty"));
                }
            }

            if let Some(key) = &api.key {
                if key.trim().is_empty() {
                    return Err(LookupError::config("API key cannot be empty"));
                }
            }
        }

        if let Some(mode) = config.display.as_ref().and_then(|d| d.mode.as_ref()) {
            mode.parse::<DisplayMode>().map_err(LookupError::config)?;
        }

        Ok(())
    }
}

/// Settings read from `WL_*` environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Option<String>,
    pub mode: Option<DisplayMode>,
    pub json: Option<bool>,
    pub config: Option<String>,
}

impl EnvConfig {
    /// Apply these settings on top of `config`.
    pub fn apply_to(&self, mut config: LookupConfig) -> LookupConfig {
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout.as_deref().and_then(parse_timeout_string) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Read `WL_*` variables from the process environment.
pub fn load_env_config() -> EnvConfig {
    env_config_from(|name| env::var(name).ok())
}

/// Build an [`EnvConfig`] from an arbitrary variable lookup.
///
/// Invalid values are skipped with a warning.
pub fn env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    // WL_API_KEY - credential for the lookup service
    if let Some(key) = lookup("WL_API_KEY") {
        if !key.trim().is_empty() {
            env_config.api_key = Some(key.trim().to_string());
            debug!("using WL_API_KEY");
        }
    }

    // WL_ENDPOINT - upstream endpoint override
    if let Some(endpoint) = lookup("WL_ENDPOINT") {
        if !endpoint.trim().is_empty() {
            debug!(endpoint = %endpoint, "using WL_ENDPOINT");
            env_config.endpoint = Some(endpoint);
        }
    }

    // WL_TIMEOUT - request timeout
    if let Some(timeout_str) = lookup("WL_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            debug!(timeout = %timeout_str, "using WL_TIMEOUT");
            env_config.timeout = Some(timeout_str);
        } else {
            warn!(
                "Invalid WL_TIMEOUT='{}', use format like '5s', '30s', '2m' (at most 60m)",
                timeout_str
            );
        }
    }

    // WL_MODE - initial display mode
    if let Some(mode) = lookup("WL_MODE") {
        match mode.parse::<DisplayMode>() {
            Ok(mode) => {
                debug!(%mode, "using WL_MODE");
                env_config.mode = Some(mode);
            }
            Err(e) => warn!("Invalid WL_MODE: {}", e),
        }
    }

    // WL_JSON - JSON output
    if let Some(val) = lookup("WL_JSON") {
        match parse_bool(&val) {
            Some(json) => env_config.json = Some(json),
            None => warn!("Invalid WL_JSON='{}', use true/false", val),
        }
    }

    // WL_CONFIG - explicit config file
    if let Some(config_path) = lookup("WL_CONFIG") {
        if !config_path.trim().is_empty() {
            debug!(path = %config_path, "using WL_CONFIG");
            env_config.config = Some(config_path);
        }
    }

    env_config
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Longest accepted lookup timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Parse a timeout like "5s", "2m", or "30" (seconds) into seconds.
///
/// Zero and anything above [`MAX_TIMEOUT_SECS`] are rejected.
pub fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    let secs = if let Some(s) = timeout_str.strip_suffix('s') {
        s.parse::<u64>().ok()
    } else if let Some(m) = timeout_str.strip_suffix('m') {
        m.parse::<u64>().ok().and_then(|m| m.checked_mul(60))
    } else {
        timeout_str.parse::<u64>().ok()
    }?;

    (1..=MAX_TIMEOUT_SECS).contains(&secs).then_some(secs)
}
