use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use crate::app_config::RegistryConfig;
use crate::errors::RegistryError;
use crate::registry::DocumentFetcher;

/// Client for the corporate registry's extract service.
///
/// A disclosure document is obtained through a four-step job protocol:
/// submit the search query, poll the search result until it leaves the
/// pending state, request the full extract, download the document bytes.
/// Each step hands an opaque ticket to the next; no state survives a
/// completed fetch.
#[derive(Debug)]
pub struct RegistryClient {
    /// Base URL of the registry
    base_url: String,
    /// HTTP client for making requests; reused across steps and fetches
    client: Client,
    /// Delay between poll attempts
    poll_interval: Duration,
    /// Maximum poll attempts before the search is treated as stuck
    poll_max_attempts: u32,
}

/// Ticket-bearing response returned by the search and extract-request steps
#[derive(Debug, Deserialize)]
struct TicketResponse {
    /// Opaque token for the next protocol step
    t: String,
}

/// One row of a completed search result
#[derive(Debug, Deserialize)]
pub struct SearchRow {
    /// Ticket for requesting this entity's extract
    pub t: String,
}

/// Body of the poll endpoint, pending or completed
#[derive(Debug, Deserialize)]
pub struct SearchResultResponse {
    /// "wait" while the search job is still running
    pub status: Option<String>,
    /// Matched entities once the job has completed
    pub rows: Option<Vec<SearchRow>>,
}

/// Outcome of interpreting one poll response body
#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The search job is still running
    Pending,
    /// The search completed; carries the result ticket of the first row
    Ready(String),
}

/// Interpret a poll response body.
///
/// A "wait" status means the job is still pending. A non-empty row set means
/// the job completed; only the first row is used — the registry is expected
/// to return a unique match for identifier queries, and ambiguity of
/// free-text name queries is a documented limitation rather than handled
/// here. Anything else is a protocol error.
pub fn interpret_poll_response(body: &SearchResultResponse) -> Result<PollOutcome, RegistryError> {
    if body.status.as_deref() == Some("wait") {
        return Ok(PollOutcome::Pending);
    }

    match body.rows.as_deref() {
        Some([first, ..]) => Ok(PollOutcome::Ready(first.t.clone())),
        _ => Err(RegistryError::Protocol(
            "empty result or unknown status".to_string(),
        )),
    }
}

/// Drive a poll step until it reports a ready result.
///
/// The registry would report "wait" forever for a stuck search job; the
/// attempt budget turns that into a `PollTimeout` instead of blocking the
/// caller indefinitely.
async fn poll_until_ready<F, Fut>(
    max_attempts: u32,
    interval: Duration,
    mut poll: F,
) -> Result<String, RegistryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollOutcome, RegistryError>>,
{
    for attempt in 1..=max_attempts {
        match poll().await? {
            PollOutcome::Ready(result_ticket) => {
                debug!(
                    "Search result ready after {} poll attempt(s), result ticket {}",
                    attempt, result_ticket
                );
                return Ok(result_ticket);
            }
            PollOutcome::Pending => tokio::time::sleep(interval).await,
        }
    }

    Err(RegistryError::PollTimeout {
        attempts: max_attempts,
    })
}

impl RegistryClient {
    /// Create a new registry client with default poll settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(&RegistryConfig {
            endpoint: endpoint.into(),
            ..RegistryConfig::default()
        })
    }

    /// Create a new registry client from configuration
    ///
    /// Uses connection pooling so the four protocol steps and the fetches of
    /// an entire recursive resolution reuse the same connections.
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            poll_max_attempts: config.poll_max_attempts,
        }
    }

    /// Submit a search query; returns the query ticket
    async fn submit_search(&self, query: &str) -> Result<String, RegistryError> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("query", query)])
            .send()
            .await
            .map_err(|e| RegistryError::RequestFailed(e.to_string()))?;

        let body: TicketResponse = Self::checked_json(response).await?;
        debug!("Search submitted for '{}', query ticket {}", query, body.t);
        Ok(body.t)
    }

    /// Poll the search result until it is ready; returns the result ticket
    async fn poll_result(&self, query_ticket: &str) -> Result<String, RegistryError> {
        let url = format!("{}/search-result/{}", self.base_url, query_ticket);

        poll_until_ready(self.poll_max_attempts, self.poll_interval, || async {
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| RegistryError::RequestFailed(e.to_string()))?;

            let body: SearchResultResponse = Self::checked_json(response).await?;
            interpret_poll_response(&body)
        })
        .await
    }

    /// Request the full extract; returns the extract ticket
    async fn request_extract(&self, result_ticket: &str) -> Result<String, RegistryError> {
        let url = format!("{}/vyp-request/{}", self.base_url, result_ticket);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::RequestFailed(e.to_string()))?;

        let body: TicketResponse = Self::checked_json(response).await?;
        Ok(body.t)
    }

    /// Download the extract document bytes
    async fn download_extract(&self, extract_ticket: &str) -> Result<Bytes, RegistryError> {
        let url = format!("{}/vyp-download/{}", self.base_url, extract_ticket);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::RequestFailed(e.to_string()))?;

        let response = Self::checked_status(response).await?;
        response
            .bytes()
            .await
            .map_err(|e| RegistryError::RequestFailed(e.to_string()))
    }

    // Raise on non-success status before the body is interpreted
    async fn checked_status(response: reqwest::Response) -> Result<reqwest::Response, RegistryError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to get error response text".to_string());
        error!("Registry API error ({}): {}", status, message);
        Err(RegistryError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }

    // Status check plus JSON body decoding
    async fn checked_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RegistryError> {
        let response = Self::checked_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| RegistryError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl DocumentFetcher for RegistryClient {
    async fn fetch_document(&self, query: &str) -> Result<Bytes, RegistryError> {
        let query_ticket = self.submit_search(query).await?;
        let result_ticket = self.poll_result(&query_ticket).await?;
        let extract_ticket = self.request_extract(&result_ticket).await?;
        let bytes = self.download_extract(&extract_ticket).await?;
        debug!(
            "Downloaded extract for '{}' ({} bytes)",
            query,
            bytes.len()
        );
        Ok(bytes)
    }
}
