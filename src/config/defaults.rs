//! Built-in configuration defaults.

/// Bind address used when nothing else is configured.
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:5000";

/// Maximum accepted request body (bytes).
///
/// Prediction payloads are three numbers; 64 KiB leaves ample room for
/// clients that send extra, ignored fields.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Per-request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "verdant.toml";

/// Env var holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "VERDANT_CONFIG";

/// Env var overriding `server.addr`.
pub const SERVER_ADDR_ENV: &str = "VERDANT_SERVER_ADDR";

/// Env var overriding `server.cors_origins` (comma-separated).
pub const CORS_ORIGINS_ENV: &str = "VERDANT_CORS_ORIGINS";
