//! Operator actions for one session.
//!
//! The [`Dashboard`] owns one [`ApiClient`] and one [`Session`]. Each action
//! issues at most one backend call, waits for it, and folds the outcome into
//! the session.

use crate::{
    api::ApiClient,
    fallback,
    models::{FormInput, PredictionRequest},
    session::{Banner, Outcome, Session},
    DispatchError,
};

pub struct Dashboard {
    // ---
    client: ApiClient,
    session: Session,
    simulate_on_disconnect: bool,
}

impl Dashboard {
    // ---
    pub fn new(client: ApiClient, simulate_on_disconnect: bool) -> Self {
        Dashboard {
            client,
            session: Session::new(),
            simulate_on_disconnect,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Validate the form, run a manual prediction, update the session.
    ///
    /// Connection failures fall back to a simulated value when enabled;
    /// server errors and rejected input leave the last result in place.
    pub async fn submit_manual(&mut self, form: FormInput) -> Banner {
        // ---
        let request = match PredictionRequest::try_from(form) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(session = %self.session.id(), "Form rejected: {}", e);
                return self.session.complete(Outcome::Rejected(e.to_string())).clone();
            }
        };

        self.session.begin();
        let outcome = match self.client.predict_manual(&request).await {
            Ok(response) => Outcome::Completed(response.into_session_result()),
            Err(DispatchError::Connection(e)) if self.simulate_on_disconnect => {
                tracing::warn!(session = %self.session.id(), "Using simulated value: {}", e);
                Outcome::Simulated {
                    result: fallback::estimate(&request),
                    reason: e.to_string(),
                }
            }
            Err(e) => failure_outcome(e),
        };

        self.session.complete(outcome).clone()
    }

    /// Run the automatic frost check. No fallback on this path.
    pub async fn check_frost(&mut self) -> Banner {
        // ---
        self.session.begin();
        let outcome = match self.client.check_frost_auto().await {
            Ok(response) => Outcome::Completed(response.into_session_result()),
            Err(e) => failure_outcome(e),
        };

        self.session.complete(outcome).clone()
    }

    /// Re-probe the backend for the status badge.
    pub async fn refresh_status(&mut self) {
        // ---
        let status = self.client.check_health().await;
        tracing::debug!(session = %self.session.id(), "Server status: {:?}", status);
        self.session.set_status(status);
    }
}

fn failure_outcome(err: DispatchError) -> Outcome {
    // ---
    match err {
        DispatchError::Server { status, body } => Outcome::ServerError { status, body },
        DispatchError::Connection(e) => Outcome::ConnectionError(e.to_string()),
    }
}
