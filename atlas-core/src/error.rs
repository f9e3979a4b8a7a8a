//! Error types for the game data mirror.

use thiserror::Error;

use crate::types::Dataset;

/// Failure while loading a [`MirrorConfig`](crate::config::MirrorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML document was invalid.
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
}

/// Failure while fetching a remote dataset document.
///
/// Produced by [`DatasetFetcher`](crate::fetch::DatasetFetcher)
/// implementations; the HTTP-backed implementation maps transport errors
/// into these variants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection-level failure (DNS, refused, reset).
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response completed but carried no body.
    #[error("response body was empty")]
    EmptyBody,
}

/// Failure of a single dataset refresh.
///
/// A refresh that fails leaves the dataset's published snapshot
/// untouched; the error is surfaced in the
/// [`SyncReport`](crate::mirror::SyncReport) alongside the outcomes of
/// the other datasets.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote document could not be fetched.
    #[error("failed to fetch {dataset} data: {source}")]
    Fetch {
        /// Which dataset was being refreshed.
        dataset: Dataset,
        /// The underlying fetch failure.
        #[source]
        source: FetchError,
    },

    /// The response body was not valid JSON.
    #[error("failed to parse {dataset} data: {source}")]
    Parse {
        /// Which dataset was being refreshed.
        dataset: Dataset,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but lacked the expected sub-document.
    #[error("{dataset} document is missing the `{section}` section")]
    MissingSection {
        /// Which dataset was being refreshed.
        dataset: Dataset,
        /// Name of the absent sub-document.
        section: &'static str,
    },
}

impl SyncError {
    /// The dataset whose refresh produced this error.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        match self {
            SyncError::Fetch { dataset, .. }
            | SyncError::Parse { dataset, .. }
            | SyncError::MissingSection { dataset, .. } => *dataset,
        }
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, SyncError>;
