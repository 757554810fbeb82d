//! Simulated result used when the backend cannot be reached.
//!
//! Only the manual prediction path falls back, and only on connection
//! failures; a server error is shown as-is.

use chrono::Utc;

use crate::models::{PredictionRequest, ResultOrigin, SessionResult, DEFAULT_UNIT};

/// Added to the submitted maximum temperature.
pub const SIMULATION_OFFSET_C: f64 = 1.2;

pub const SIMULATION_LABEL: &str = "Simulación (sin conexión al servidor)";

/// Placeholder result: the submitted maximum plus [`SIMULATION_OFFSET_C`].
pub fn estimate(request: &PredictionRequest) -> SessionResult {
    // ---
    SessionResult {
        last_temperature: request.temp_max() + SIMULATION_OFFSET_C,
        last_risk_description: SIMULATION_LABEL.to_string(),
        last_frost_alert: false,
        unit: DEFAULT_UNIT.to_string(),
        origin: ResultOrigin::Simulated,
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::FormInput;

    #[test]
    fn adds_offset_to_max_temperature() {
        // ---
        let request = PredictionRequest::try_from(FormInput {
            temp_max: 18.0,
            ..FormInput::default()
        })
        .unwrap();

        let result = estimate(&request);
        assert!((result.last_temperature - 19.2).abs() < 1e-9);
        assert!(result.is_simulated());
        assert!(!result.last_frost_alert);
        assert_eq!(result.last_risk_description, SIMULATION_LABEL);
    }
}
