//! Snapshot-to-alert evaluation.

use coin_ingestor::models::{
    alert::{Alert, Direction},
    snapshot::Snapshot,
};

/// Alerts for every snapshot whose absolute 24h change is at least
/// `threshold_percent`, in input order.
///
/// A positive change is [`Direction::Up`]; anything else, zero included, is
/// [`Direction::Down`].
pub fn evaluate_alerts(snapshots: &[Snapshot], threshold_percent: f64) -> Vec<Alert> {
    snapshots
        .iter()
        .filter(|s| s.change_pct_24h.abs() >= threshold_percent)
        .map(|s| Alert {
            coin_name: s.name.clone(),
            symbol: s.symbol.clone(),
            price: s.price_usd,
            change_pct: s.change_pct_24h,
            direction: if s.change_pct_24h > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            },
        })
        .collect()
}
