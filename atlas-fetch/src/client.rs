//! HTTP fetcher — reqwest-backed implementation of `DatasetFetcher`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, warn};

use atlas_core::config::HttpConfig;
use atlas_core::error::FetchError;
use atlas_core::fetch::DatasetFetcher;

/// Fetches dataset documents over HTTP(S).
///
/// Wraps a shared [`reqwest::Client`]; the configured timeout is applied
/// per request so a hung remote fails that one fetch rather than
/// poisoning the client.
pub struct HttpFetcher {
    http: Client,
    timeout: Duration,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher from the mirror's HTTP configuration.
    #[must_use]
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            http: Client::new(),
            timeout: Duration::from_millis(config.request_timeout_ms),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl DatasetFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("fetching {url}");

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(&e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{url} answered {status}");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(&e, self.timeout))?;
        if body.is_empty() {
            warn!("{url} answered with an empty body");
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }
}

// `FetchError` belongs to atlas-core, so the reqwest mapping lives here
// as a free function rather than a `From` impl.
fn map_transport_error(err: &reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout.as_millis() as u64)
    } else {
        FetchError::Network(err.to_string())
    }
}
