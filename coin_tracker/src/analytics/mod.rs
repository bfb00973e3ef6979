//! Pure computations over fetched and stored data.
//!
//! Nothing here performs I/O or holds state; every function can be called
//! concurrently from anywhere.

pub mod alerts;
pub mod stats;

pub use alerts::evaluate_alerts;
pub use stats::compute_statistics;
