//! Dataset fetch abstraction.
//!
//! The sync engine pulls dataset documents through a trait so the
//! transport can be swapped out. The production implementation lives in
//! `atlas-fetch` (HTTP via `reqwest`); a static in-memory implementation
//! is provided here for tests and offline use.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::FetchError;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Fetch a remote dataset document by URL.
///
/// Implementations must be `Send + Sync` so a mirror can be shared across
/// request-handling threads.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    /// Fetch the document at `url` and return its body.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-success status,
    /// timeout, or an empty body. An empty body is an error, never an
    /// empty document.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// ---------------------------------------------------------------------------
// Static / in-memory fetcher (for tests & offline use)
// ---------------------------------------------------------------------------

/// A fetcher backed by an in-memory url → body map.
///
/// Used by unit and integration tests, and usable as a seed source when
/// the remote is unreachable. URLs without a registered body yield
/// [`FetchError::Status`] 404; registered failures are returned verbatim.
#[derive(Default)]
pub struct StaticFetcher {
    responses: Mutex<HashMap<String, Result<String, FetchError>>>,
}

impl StaticFetcher {
    /// Create an empty static fetcher. Every fetch fails with 404 until
    /// bodies are registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful response body for `url`.
    pub fn insert(&self, url: impl Into<String>, body: impl Into<String>) {
        self.responses
            .lock()
            .insert(url.into(), Ok(body.into()));
    }

    /// Register a failure for `url`.
    pub fn insert_error(&self, url: impl Into<String>, error: FetchError) {
        self.responses.lock().insert(url.into(), Err(error));
    }
}

#[async_trait]
impl DatasetFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.responses.lock().get(url) {
            Some(response) => response.clone(),
            None => Err(FetchError::Status(404)),
        }
    }
}
