//! Service Configuration Module
//!
//! ## Loading Order
//!
//! 1. `VERDANT_CONFIG` environment variable (path to TOML file)
//! 2. `verdant.toml` in the current working directory
//! 3. Built-in defaults
//!
//! `VERDANT_SERVER_ADDR` and `VERDANT_CORS_ORIGINS` are applied on top by
//! [`ServiceConfig::apply_env_overrides`].
//!
//! There is no global instance: the loaded config is handed to
//! [`crate::server::Server::new`] and flows from there.

mod service_config;
pub mod defaults;
pub mod validation;

pub use service_config::*;
