//! Market data plumbing for the coin tracker: the canonical data model, the
//! snapshot source abstraction with its CoinGecko implementation, file export
//! sinks and the alert notification sink.

pub mod io;
pub mod models;
pub mod notify;
pub mod providers;
