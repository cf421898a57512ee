//! Climate indicator prediction
//!
//! - `parameters`: typed `ParameterSet` built from a request body
//! - `formula`: the linear estimate of temperature, sea level rise and biodiversity loss

pub mod formula;
pub mod parameters;

pub use formula::{compute, PredictionResult};
pub use parameters::{ignored_keys, ParameterError, ParameterSet, RECOGNIZED_KEYS};
