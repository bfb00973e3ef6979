//! Provider abstraction for market data sources.
//!
//! This module defines the [`SnapshotSource`] trait, the single interface the
//! tracker uses to pull a batch of coin snapshots from any market data vendor.
//! Each concrete provider (currently CoinGecko) implements it and owns its
//! vendor-specific request building, validation and response decoding.
//!
//! The trait is async and object safe, so callers can hold a
//! `Box<dyn SnapshotSource>` chosen at runtime and tests can substitute a fake.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use coin_ingestor::models::{request_params::MarketsRequestParams, snapshot::Snapshot};
//! use coin_ingestor::providers::{ProviderError, SnapshotSource};
//!
//! struct EmptySource;
//!
//! #[async_trait]
//! impl SnapshotSource for EmptySource {
//!     async fn fetch_snapshots(
//!         &self,
//!         _params: MarketsRequestParams,
//!     ) -> Result<Vec<Snapshot>, ProviderError> {
//!         Ok(vec![])
//!     }
//! }
//! ```

pub mod coingecko_rest;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{request_params::MarketsRequestParams, snapshot::Snapshot};

/// Source of coin snapshots for "now".
///
/// A failed fetch must surface as an error, never as a partial batch: the
/// caller treats any `Err` as "no data available" for the whole cycle.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches the current snapshot batch, largest market capitalization first,
    /// bounded by `params.top_n`.
    async fn fetch_snapshots(
        &self,
        params: MarketsRequestParams,
    ) -> Result<Vec<Snapshot>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// Failed to build the reqwest client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains characters that are not valid in a header.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `SnapshotSource` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body could not be decoded into the expected shape.
    #[snafu(display("Failed to decode provider response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"), context(false))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}
