//! # Atlas Core
//!
//! In-memory mirror of the remote game-data tables backing a
//! strategy-sharing platform. Five independent JSON datasets — stages,
//! zones, activities, characters, towers — are fetched, re-indexed into
//! fast lookup structures, and published atomically so concurrent
//! readers never observe a partially-updated dataset.
//!
//! The request-handling layer queries the mirror synchronously through
//! [`GameDataMirror`]'s `find_*` operations to enrich stored strategy
//! documents with display metadata. Refresh cadence is the caller's
//! concern: drive [`GameDataMirror::sync_all`] from whatever scheduler
//! fits, and inspect the returned [`SyncReport`] for per-dataset
//! outcomes.
//!
//! ## Consistency model
//!
//! Each dataset's snapshot is built in an unshared scratch structure and
//! published with a single atomic store (`arc-swap`). Readers always see
//! either the previous or the new fully-consistent snapshot. A failed
//! refresh leaves the last-good snapshot in place — stale but available.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod mirror;
pub mod types;

pub use config::MirrorConfig;
pub use error::{ConfigError, FetchError, SyncError};
pub use fetch::{DatasetFetcher, StaticFetcher};
pub use mirror::{DatasetOutcome, DatasetStats, GameDataMirror, SyncReport};
pub use types::{Activity, Character, Dataset, Stage, Tower, Zone};
