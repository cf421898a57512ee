//! VERDANT: Climate Indicator Prediction Service
//!
//! Serves a closed-form linear estimate of three climate indicators over HTTP.
//!
//! ## Architecture
//!
//! - **Prediction**: typed parameter extraction and the prediction formula
//! - **API**: axum router, handlers and response envelope
//! - **Server**: config-constructed server instance with graceful shutdown
//! - **Config**: TOML configuration with env overrides

pub mod api;
pub mod config;
pub mod prediction;
pub mod server;

pub use config::{ConfigError, ServiceConfig};
pub use prediction::{compute, ParameterError, ParameterSet, PredictionResult};
pub use server::Server;
