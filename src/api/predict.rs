// src/api/predict.rs
//! Manual prediction from operator-entered values.
//!
//! The contract decides both the payload layout and which normalizer reads
//! the answer.

use super::{ApiClient, PredictionContract};
use crate::{
    models::{ClimatePayload, PredictionRequest, PredictionResponse, TemperaturePayload},
    normalize, DispatchError,
};

impl ApiClient {
    /// POST the request to the contract's endpoint and normalize the answer.
    pub async fn predict_manual(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, DispatchError> {
        // ---
        let contract = self.prediction_contract;
        tracing::info!("Manual prediction via '{}' contract", contract);

        let response = match contract {
            PredictionContract::Clima => {
                let body = self
                    .post_json(contract.path(), &ClimatePayload::from(request))
                    .await?;
                normalize::nested(&body)
            }
            PredictionContract::Temperatura => {
                let body = self
                    .post_json(contract.path(), &TemperaturePayload::from(request))
                    .await?;
                normalize::flat(&body, "temperatura_predicha")
            }
            PredictionContract::Prediccion => {
                let body = self
                    .post_json(contract.path(), &ClimatePayload::from(request))
                    .await?;
                normalize::flat(&body, "prediccion_temperatura")
            }
        };

        tracing::debug!("Normalized prediction: {:?}", response);
        Ok(response)
    }
}
