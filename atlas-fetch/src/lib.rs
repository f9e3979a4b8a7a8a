//! # atlas-fetch — HTTP transport for the game data mirror
//!
//! The production [`DatasetFetcher`](atlas_core::fetch::DatasetFetcher)
//! implementation: plain GETs of the remote table documents with a hard
//! per-request timeout. All transport failures are mapped into
//! [`FetchError`](atlas_core::error::FetchError) so the sync engine
//! never sees `reqwest` types.
//!
//! No retries live here — a failed fetch fails that dataset's refresh
//! and the scheduler driving the mirror decides when to try again.

pub mod client;

pub use client::HttpFetcher;
