//! reqwest-backed [`ShortenClient`].

use crate::domain::entities::ShortenedResult;
use crate::domain::ports::ShortenClient;
use crate::error::ShortenError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

/// Path of the shortening endpoint, relative to the service base URL.
pub const SHORTEN_PATH: &str = "/shorten";

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

/// Client for `POST {base_url}/shorten`.
///
/// Sends `{"url": ...}` as JSON and expects `{"short_url": ...}` back.
/// The underlying [`reqwest::Client`] is reused across calls; no timeout is
/// set beyond reqwest's defaults and failed requests are not retried.
#[derive(Debug, Clone)]
pub struct HttpShortenClient {
    client: Client,
    endpoint: String,
}

impl HttpShortenClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SHORTEN_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ShortenClient for HttpShortenClient {
    async fn shorten(&self, url: &str) -> Result<ShortenedResult, ShortenError> {
        debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ShortenRequest { url })
            .send()
            .await
            .map_err(|e| {
                warn!("Shorten request to {} failed: {}", self.endpoint, e);
                ShortenError::request_failed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Shorten request to {} returned {}", self.endpoint, status);
            return Err(ShortenError::with_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        response.json::<ShortenedResult>().await.map_err(|e| {
            warn!("Shorten response from {} is malformed: {}", self.endpoint, e);
            ShortenError::request_failed(format!("malformed response: {e}"))
        })
    }
}
