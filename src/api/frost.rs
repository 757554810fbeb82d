// src/api/frost.rs
//! Automatic frost check from the backend's own sensor readings.
//!
//! One GET per operator action; there is no polling.

use super::ApiClient;
use crate::{models::PredictionResponse, normalize, DispatchError};

const AUTO_FROST_PATH: &str = "/api/v1/prediccion/helada-automatica";

impl ApiClient {
    /// GET the automatic scan and normalize it with the configured frost key.
    pub async fn check_frost_auto(&self) -> Result<PredictionResponse, DispatchError> {
        // ---
        tracing::info!("Automatic frost check ({})", self.frost_contract);

        let body = self.get_json(AUTO_FROST_PATH).await?;
        Ok(normalize::auto_scan(&body, self.frost_contract.key()))
    }
}
