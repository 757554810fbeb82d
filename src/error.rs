//! Error types for the prediction client.
//!
//! Two families live here: [`ValidationError`] for operator input that is
//! rejected before any request is built, and [`DispatchError`] for failures
//! of a call to the prediction backend. Malformed response bodies are not an
//! error at all; the normalizers absorb them by filling defaults.

use thiserror::Error;

/// Operator input that cannot become a [`crate::PredictionRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("la temperatura mínima ({min}) no puede superar la máxima ({max})")]
    MinAboveMax { min: f64, max: f64 },

    #[error("humedad fuera de rango: {0} (0-100)")]
    HumidityOutOfRange(i64),

    #[error("precipitación negativa: {0}")]
    NegativePrecipitation(f64),

    #[error("valor no numérico en '{0}'")]
    NotFinite(&'static str),

    #[error("mes inválido: '{0}'")]
    InvalidMonth(String),
}

/// Failure of a single call to the prediction backend.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// DNS, connect, timeout or body-read failure.
    #[error("error de conexión: {0}")]
    Connection(#[source] reqwest::Error),

    /// The backend answered with a non-200 status.
    #[error("error del servidor: {status}")]
    Server { status: u16, body: String },
}

/// A contract name in configuration that no backend version uses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contract '{0}'")]
pub struct UnknownContract(pub String);
