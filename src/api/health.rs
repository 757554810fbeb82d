// src/api/health.rs
//! Reachability probe behind the status badge.
//!
//! The probe never fails: every problem degrades to an unreachable
//! [`ServerStatus`] because the badge is cosmetic.

use reqwest::StatusCode;

use super::ApiClient;
use crate::models::ServerStatus;

impl ApiClient {
    /// GET `/`; any 200 counts as reachable.
    pub async fn check_health(&self) -> ServerStatus {
        // ---
        let url = self.url("/");
        let outcome = self
            .http
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await;

        match outcome {
            Ok(response) if response.status() == StatusCode::OK => ServerStatus {
                reachable: true,
                display_message: format!("Conectado a {}", self.base_url),
            },
            Ok(response) => {
                tracing::debug!("Health probe got {}", response.status());
                ServerStatus {
                    reachable: false,
                    display_message: format!(
                        "Servidor respondió {} en {}",
                        response.status().as_u16(),
                        self.base_url
                    ),
                }
            }
            Err(e) => {
                tracing::debug!("Health probe failed: {}", e);
                ServerStatus {
                    reachable: false,
                    display_message: format!("Servidor desconectado ({})", self.base_url),
                }
            }
        }
    }
}
