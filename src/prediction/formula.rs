//! Closed-form climate indicator estimates.
//!
//! Each indicator is a linear function of a single driver:
//!
//! ```text
//! temperature       = 1.2 + co2 × 0.01
//! sea_level_rise    = 0.3 + deforestation × 0.005
//! biodiversity_loss = 5.6 − renewable_adoption × 0.02
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::ParameterSet;

// ============================================================================
// Coefficients
// ============================================================================

/// Baseline temperature anomaly with no additional CO₂ (°C).
pub const TEMPERATURE_BASELINE: f64 = 1.2;

/// Temperature increase per unit of CO₂.
pub const TEMPERATURE_PER_CO2: f64 = 0.01;

/// Baseline sea level rise with no deforestation.
pub const SEA_LEVEL_BASELINE: f64 = 0.3;

/// Sea level rise per unit of deforestation.
pub const SEA_LEVEL_PER_DEFORESTATION: f64 = 0.005;

/// Baseline biodiversity loss with no renewable adoption.
pub const BIODIVERSITY_BASELINE: f64 = 5.6;

/// Biodiversity loss avoided per unit of renewable adoption.
pub const BIODIVERSITY_PER_RENEWABLE: f64 = 0.02;

// ============================================================================
// Result
// ============================================================================

/// The three derived indicators returned by `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub temperature: f64,
    pub sea_level_rise: f64,
    pub biodiversity_loss: f64,
}

/// Evaluate the prediction formula.
///
/// Never fails and has no side effects. Any real input is accepted,
/// including negatives.
pub fn compute(params: ParameterSet) -> PredictionResult {
    PredictionResult {
        temperature: TEMPERATURE_BASELINE + params.co2 * TEMPERATURE_PER_CO2,
        sea_level_rise: SEA_LEVEL_BASELINE + params.deforestation * SEA_LEVEL_PER_DEFORESTATION,
        biodiversity_loss: BIODIVERSITY_BASELINE
            - params.renewable_adoption * BIODIVERSITY_PER_RENEWABLE,
    }
}
