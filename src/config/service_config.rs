//! Service configuration loaded from TOML.
//!
//! Every field carries a serde default, so an empty file (or no file at all)
//! yields a working local server.

use serde::{Deserialize, Serialize};
use std::net::ToSocketAddrs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{
    CONFIG_PATH_ENV, CORS_ORIGINS_ENV, DEFAULT_MAX_BODY_BYTES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_ADDR, LOCAL_CONFIG_FILE, SERVER_ADDR_ENV,
};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a VERDANT deployment.
///
/// Load with `ServiceConfig::load()` which searches:
/// 1. `$VERDANT_CONFIG` env var
/// 2. `./verdant.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl ServiceConfig {
    /// Load configuration using the standard search order.
    ///
    /// Unreadable or invalid files are logged and skipped, never fatal.
    pub fn load() -> Self {
        let from_env = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_with(from_env.as_deref(), Path::new(LOCAL_CONFIG_FILE))
    }

    /// Search order behind [`ServiceConfig::load`]: `config_env` (the value of
    /// `$VERDANT_CONFIG`, if set), then `local`, then defaults.
    pub fn load_with(config_env: Option<&str>, local: &Path) -> Self {
        // 1. Check env var
        if let Some(path) = config_env {
            let p = PathBuf::from(path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {CONFIG_PATH_ENV}");
                        return config;
                    }
                    Err(e) => {
                        warn!(
                            path = %p.display(),
                            error = %e,
                            "Failed to load config from {CONFIG_PATH_ENV}, falling back"
                        );
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_PATH_ENV} points to non-existent file, falling back");
            }
        }

        // 2. Check ./verdant.toml
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded local config");
                    return config;
                }
                Err(e) => {
                    warn!(
                        path = %local.display(),
                        error = %e,
                        "Failed to load local config, using defaults"
                    );
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate TOML text. Unknown keys are logged, not rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Apply `VERDANT_SERVER_ADDR` and `VERDANT_CORS_ORIGINS` on top of the loaded values.
    ///
    /// This is the only place either variable is read; `--addr` on the
    /// command line is applied after it and wins.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var(SERVER_ADDR_ENV) {
            if !addr.trim().is_empty() {
                info!(addr = %addr, "Server address overridden by {SERVER_ADDR_ENV}");
                self.server.addr = addr.trim().to_string();
            }
        }
        if let Ok(origins) = std::env::var(CORS_ORIGINS_ENV) {
            self.server.cors_origins = parse_origin_list(&origins);
        }
    }

    /// Check every field, collecting all problems rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let server = &self.server;

        if !resolves(&server.addr) {
            errors.push(format!(
                "server.addr: '{}' is not a resolvable HOST:PORT address",
                server.addr
            ));
        }
        if server.max_body_bytes == 0 {
            errors.push("server.max_body_bytes: must be > 0".to_string());
        }
        if server.request_timeout_secs == 0 {
            errors.push("server.request_timeout_secs: must be > 0".to_string());
        }
        for origin in &server.cors_origins {
            if origin == "*" {
                errors.push(
                    "server.cors_origins: wildcard '*' is not supported, list origins explicitly"
                        .to_string(),
                );
            } else if axum::http::HeaderValue::from_str(origin).is_err() {
                errors.push(format!(
                    "server.cors_origins: '{origin}' is not a valid origin header value"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// `HOST:PORT` where HOST is an IP literal or a name such as `localhost`.
fn resolves(addr: &str) -> bool {
    addr.to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({path}): {1}", path = .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({path}): {1}", path = .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server
// ============================================================================

/// HTTP listener and middleware settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (HOST:PORT); HOST may be an IP or a resolvable name
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Maximum request body size in bytes; larger bodies get 413
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Per-request timeout in seconds; slower requests get 408
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cross-origin callers allowed by CORS. Empty means same-origin only.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_server_addr() -> String {
    DEFAULT_SERVER_ADDR.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
