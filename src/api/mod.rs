//! HTTP dispatcher for the prediction backend.
//!
//! This module is the gateway for everything that talks to the backend
//! (Explicit Module Boundary Pattern): the shared [`ApiClient`] and the
//! contract selectors live here, while each intent is implemented in a
//! sibling file:
//! - `predict` – manual prediction (POST, contract-dependent endpoint)
//! - `frost`   – automatic frost check (GET)
//! - `health`  – reachability probe for the status badge (GET `/`)
//!
//! Every call is bounded by a timeout. Non-200 answers become
//! [`DispatchError::Server`], transport failures [`DispatchError::Connection`].
//! Nothing is retried.

use std::{fmt, str::FromStr, time::Duration};

use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::{config::Config, error::UnknownContract, DispatchError};

mod frost;
mod health;
mod predict;

// ---

/// Manual-prediction endpoint spoken by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PredictionContract {
    /// `POST /api/v1/predecir-clima`, nested `resultado` answer.
    #[default]
    Clima,
    /// `POST /api/v1/predecir-temperatura`, flat `temperatura_predicha` answer.
    Temperatura,
    /// `POST /api/v1/prediccion/temperatura`, flat `prediccion_temperatura` + `unidad`.
    Prediccion,
}

impl PredictionContract {
    // ---
    pub fn path(self) -> &'static str {
        match self {
            PredictionContract::Clima => "/api/v1/predecir-clima",
            PredictionContract::Temperatura => "/api/v1/predecir-temperatura",
            PredictionContract::Prediccion => "/api/v1/prediccion/temperatura",
        }
    }
}

impl fmt::Display for PredictionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PredictionContract::Clima => "clima",
            PredictionContract::Temperatura => "temperatura",
            PredictionContract::Prediccion => "prediccion",
        })
    }
}

impl FromStr for PredictionContract {
    type Err = UnknownContract;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clima" => Ok(PredictionContract::Clima),
            "temperatura" => Ok(PredictionContract::Temperatura),
            "prediccion" => Ok(PredictionContract::Prediccion),
            _ => Err(UnknownContract(s.to_string())),
        }
    }
}

/// Key carrying the frost flag in the automatic scan answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrostContract {
    #[default]
    AlertaHelada,
    HayHelada,
}

impl FrostContract {
    // ---
    pub fn key(self) -> &'static str {
        match self {
            FrostContract::AlertaHelada => "alerta_helada",
            FrostContract::HayHelada => "hay_helada",
        }
    }
}

impl fmt::Display for FrostContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FrostContract {
    type Err = UnknownContract;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alerta" | "alerta_helada" => Ok(FrostContract::AlertaHelada),
            "hay" | "hay_helada" => Ok(FrostContract::HayHelada),
            _ => Err(UnknownContract(s.to_string())),
        }
    }
}

/// Client for one prediction backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    // ---
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    health_timeout: Duration,
    prediction_contract: PredictionContract,
    frost_contract: FrostContract,
}

impl ApiClient {
    // ---
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        // ---
        let http = reqwest::Client::builder().build()?;

        Ok(ApiClient {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            health_timeout: config.health_timeout,
            prediction_contract: config.prediction_contract,
            frost_contract: config.frost_contract,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Result<Value, DispatchError> {
        // ---
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        send_for_json(self.http.get(&url).timeout(self.timeout)).await
    }

    async fn post_json<T: Serialize + fmt::Debug>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value, DispatchError> {
        // ---
        let url = self.url(path);
        tracing::debug!("POST {} payload: {:?}", url, payload);
        send_for_json(self.http.post(&url).json(payload).timeout(self.timeout)).await
    }
}

/// Send a request and read a 200 body as JSON.
///
/// A 200 body that is not JSON yields `Value::Null`; the normalizers turn that
/// into defaults.
async fn send_for_json(request: RequestBuilder) -> Result<Value, DispatchError> {
    // ---
    let response = request.send().await.map_err(|e| {
        tracing::warn!("Request failed: {}", e);
        DispatchError::Connection(e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read {} body: {}", status, e);
            String::new()
        });
        tracing::warn!("Backend answered {}: {}", status, body);
        return Err(DispatchError::Server {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await.map_err(DispatchError::Connection)?;
    tracing::debug!("Raw response: {}", text);

    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("Response body is not JSON ({}), using defaults", e);
        Value::Null
    }))
}
