// Gateway client for the transfer marketplace: five endpoints, one HTTP
// attempt each. Retrying terminal-state polls is the poll engine's job, not
// this layer's.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::models::{BookingRequest, ReservationPoll, SearchCreated, SearchPoll, SearchRequest};

/// Static credential header sent on every request.
pub const API_KEY_HEADER: &str = "API-KEY";

/// Per-call timeout, independent of the poll delay and budget.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response. The body is the parsed error payload, surfaced
    /// verbatim for diagnostics.
    #[error("api returned {status}: {body}")]
    Status { status: u16, body: serde_json::Value },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The five logical operations the workflow needs from the marketplace.
///
/// Orchestrators depend on this trait so tests can script responses without
/// a live gateway.
#[async_trait]
pub trait TransferApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchCreated, ApiError>;

    async fn poll_search(&self, search_id: &str) -> Result<SearchPoll, ApiError>;

    /// Acknowledgement only; the booking outcome is obtained by polling the
    /// reservation endpoint.
    async fn book(&self, request: &BookingRequest) -> Result<serde_json::Value, ApiError>;

    /// Keyed by the owning search, not by a reservation id.
    async fn poll_reservation(&self, search_id: &str) -> Result<ReservationPoll, ApiError>;

    /// True iff the server acknowledged the cancellation with a 2xx status.
    async fn cancel(&self, reservation_id: &str) -> Result<bool, ApiError>;
}

/// Live gateway client. Construction validates nothing beyond what
/// [`Config`] already guarantees and performs no network I/O.
pub struct HttpTransferClient {
    http: reqwest::Client,
    config: Config,
}

impl HttpTransferClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: parse_error_body(text),
            });
        }

        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}

// Error bodies are usually JSON but the gateway is not guaranteed to keep
// that up under load; fall back to the raw text.
fn parse_error_body(text: String) -> serde_json::Value {
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}

#[async_trait]
impl TransferApi for HttpTransferClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchCreated, ApiError> {
        let response = self
            .http
            .post(self.url("search/"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn poll_search(&self, search_id: &str) -> Result<SearchPoll, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("search/{search_id}/poll/")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn book(&self, request: &BookingRequest) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .post(self.url("reservations/"))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn poll_reservation(&self, search_id: &str) -> Result<ReservationPoll, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("reservations/{search_id}/poll/")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn cancel(&self, reservation_id: &str) -> Result<bool, ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("reservations/{reservation_id}")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        let text = response.text().await?;
        Err(ApiError::Status {
            status: status.as_u16(),
            body: parse_error_body(text),
        })
    }
}
