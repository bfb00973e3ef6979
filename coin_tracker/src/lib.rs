//! Tracking side of the crypto market tracker.
//!
//! Persists snapshot batches fetched by `coin_ingestor` into SQLite, derives
//! trailing-window statistics and alerts from them, and drives the
//! fetch-store-alert cycle used by the `coin-tracker` binary.

#![deny(missing_docs)]

pub mod analytics;
pub mod clock;
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline;
pub mod render;
#[allow(missing_docs)]
pub mod schema;
pub mod store;
pub mod timestamp;
