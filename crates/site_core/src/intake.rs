//! Delivery of reservation payloads to the remote lead-intake endpoint.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::ReservationPayload;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("intake endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("intake endpoint rejected reservation with status {status}")]
    Rejected { status: u16 },
    #[error("intake endpoint is not configured")]
    NotConfigured,
    #[error("reservation delivery was interrupted before the endpoint answered")]
    Interrupted,
}

#[async_trait]
pub trait IntakeTransport: Send + Sync {
    async fn deliver(&self, payload: &ReservationPayload) -> Result<(), IntakeError>;
}

/// Posts the payload as JSON; any 2xx status is an acknowledgement.
#[derive(Debug, Clone)]
pub struct HttpIntake {
    http: Client,
    endpoint: Url,
}

impl HttpIntake {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl IntakeTransport for HttpIntake {
    async fn deliver(&self, payload: &ReservationPayload) -> Result<(), IntakeError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

pub struct MissingIntake;

#[async_trait]
impl IntakeTransport for MissingIntake {
    async fn deliver(&self, _payload: &ReservationPayload) -> Result<(), IntakeError> {
        Err(IntakeError::NotConfigured)
    }
}

#[cfg(test)]
#[path = "tests/intake_tests.rs"]
mod tests;
