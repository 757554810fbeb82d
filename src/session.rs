//! Per-session state for one interactive visit.
//!
//! A [`Session`] is an explicit context object owned by the caller and passed
//! to the renderer; there is no process-wide state. Each submission runs
//! `Idle → Dispatching → {Rendered, ErrorShown}`. Results are replaced whole,
//! never merged, and an error leaves the previous result in place.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ResultOrigin, ServerStatus, SessionResult};

// ---

/// Where the current submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Dispatching,
    Rendered,
    ErrorShown,
}

/// User-facing message for the last submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Banner {
    Success(String),
    Warning(String),
    Error(String),
}

impl Banner {
    // ---
    pub fn message(&self) -> &str {
        match self {
            Banner::Success(m) | Banner::Warning(m) | Banner::Error(m) => m,
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Live answer from the backend.
    Completed(SessionResult),
    /// Connection failed; a simulated result stands in.
    Simulated { result: SessionResult, reason: String },
    /// Non-200 answer; shown verbatim, state untouched.
    ServerError { status: u16, body: String },
    /// Connection failed with no fallback.
    ConnectionError(String),
    /// Input rejected before dispatch.
    Rejected(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    // ---
    id: Uuid,
    started_at: DateTime<Utc>,
    phase: Phase,
    result: Option<SessionResult>,
    status: Option<ServerStatus>,
    banner: Option<Banner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    // ---
    pub fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            phase: Phase::Idle,
            result: None,
            status: None,
            banner: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn status(&self) -> Option<&ServerStatus> {
        self.status.as_ref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_status(&mut self, status: ServerStatus) {
        self.status = Some(status);
    }

    /// Mark a submission as in flight.
    pub fn begin(&mut self) {
        // ---
        tracing::debug!(session = %self.id, "{:?} -> Dispatching", self.phase);
        self.phase = Phase::Dispatching;
    }

    /// Apply the outcome of a submission and return the banner to show.
    pub fn complete(&mut self, outcome: Outcome) -> &Banner {
        // ---
        let (phase, banner) = match outcome {
            Outcome::Completed(result) => {
                let banner = success_banner(&result);
                self.result = Some(result);
                (Phase::Rendered, banner)
            }
            Outcome::Simulated { result, reason } => {
                self.result = Some(result);
                (
                    Phase::Rendered,
                    Banner::Warning(format!(
                        "Error de conexión: {reason}. Mostrando valor simulado."
                    )),
                )
            }
            Outcome::ServerError { status, body } => (
                Phase::ErrorShown,
                Banner::Error(format!("Error del servidor: {status}\n{body}")),
            ),
            Outcome::ConnectionError(reason) => (
                Phase::ErrorShown,
                Banner::Error(format!("Error de conexión: {reason}")),
            ),
            Outcome::Rejected(reason) => (
                Phase::ErrorShown,
                Banner::Error(format!("Datos inválidos: {reason}")),
            ),
        };

        tracing::debug!(session = %self.id, "{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.banner.insert(banner)
    }
}

fn success_banner(result: &SessionResult) -> Banner {
    // ---
    match &result.origin {
        ResultOrigin::AutoScan { location, .. } if result.last_frost_alert => Banner::Warning(
            format!("Alerta de helada en {location}: {}", result.last_risk_description),
        ),
        ResultOrigin::AutoScan { location, .. } => Banner::Success(format!(
            "Sin riesgo de helada en {location}: {}",
            result.last_risk_description
        )),
        _ => Banner::Success(format!(
            "¡Cálculo Exitoso! Estado: {}",
            result.last_risk_description
        )),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn live(temperature: f64, description: &str) -> SessionResult {
        // ---
        SessionResult {
            last_temperature: temperature,
            last_risk_description: description.to_string(),
            last_frost_alert: false,
            unit: "°C".to_string(),
            origin: ResultOrigin::Live,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn starts_idle_and_empty() {
        // ---
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.result().is_none());
        assert!(session.status().is_none());
        assert!(session.banner().is_none());
    }

    #[test]
    fn success_replaces_result() {
        // ---
        let mut session = Session::new();
        session.begin();
        assert_eq!(session.phase(), Phase::Dispatching);

        session.complete(Outcome::Completed(live(14.5, "Normal")));
        session.begin();
        let banner = session.complete(Outcome::Completed(live(3.0, "Riesgo")));
        assert_eq!(banner, &Banner::Success("¡Cálculo Exitoso! Estado: Riesgo".into()));

        assert_eq!(session.phase(), Phase::Rendered);
        assert_eq!(session.result().unwrap().last_temperature, 3.0);
    }

    #[test]
    fn server_error_preserves_prior_result() {
        // ---
        let mut session = Session::new();
        session.complete(Outcome::Completed(live(14.5, "Normal")));
        let before = session.result().cloned();

        session.begin();
        let banner = session
            .complete(Outcome::ServerError {
                status: 500,
                body: "Internal Server Error".into(),
            })
            .clone();

        assert!(matches!(banner, Banner::Error(_)));
        assert!(banner.message().contains("500"));
        assert!(banner.message().contains("Internal Server Error"));
        assert_eq!(session.phase(), Phase::ErrorShown);
        assert_eq!(session.result().cloned(), before);
    }

    #[test]
    fn connection_error_without_fallback_preserves_result() {
        // ---
        let mut session = Session::new();
        session.complete(Outcome::ConnectionError("timeout".into()));
        assert!(session.result().is_none());
        assert_eq!(session.phase(), Phase::ErrorShown);
    }

    #[test]
    fn simulated_result_renders_with_warning() {
        // ---
        let mut session = Session::new();
        let mut result = live(19.2, "sim");
        result.origin = ResultOrigin::Simulated;

        let banner = session
            .complete(Outcome::Simulated {
                result,
                reason: "connection refused".into(),
            })
            .clone();

        assert!(matches!(banner, Banner::Warning(_)));
        assert_eq!(session.phase(), Phase::Rendered);
        assert!(session.result().unwrap().is_simulated());
    }
}
