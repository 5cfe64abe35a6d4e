use super::error::SubmissionError;
use super::request::ReservationRequest;
use crate::sdk::config::QuoteConfig;
use reqwest::Client;

/// Sends reservations to the external booking API.
pub struct ReservationClient {
    client: Client,
    endpoint: String,
}

impl ReservationClient {
    pub fn new(endpoint: impl Into<String>, config: &QuoteConfig) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub async fn submit(&self, request: &ReservationRequest) -> Result<(), SubmissionError> {
        log::info!(
            "[RESERVATION] Submitting booking for {} ({} → {}) to {}",
            request.name,
            request.pickup_address,
            request.destination_address,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status.is_success() {
            log::info!("[RESERVATION] Accepted with status {}", status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        log::error!(
            "[RESERVATION] API returned non-success status: {}. Body: {}",
            status,
            body
        );
        Err(SubmissionError::Rejected { status, body })
    }
}

/// Separates "the server could not be reached" from other transport errors.
fn classify(e: reqwest::Error) -> SubmissionError {
    if e.is_connect() || e.is_timeout() {
        log::error!("[RESERVATION] Could not reach the reservation API: {}", e);
        SubmissionError::Connection(e)
    } else {
        SubmissionError::Request(e)
    }
}
