use std::cmp::Ordering;

use serde::Deserialize;
use tracing::warn;

use crate::models::snapshot::Snapshot;

/// One entry of the `/coins/markets` listing. Only the fields we keep are decoded.
#[derive(Deserialize, Debug)]
pub struct CoinGeckoMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinGeckoMarket {
    /// Converts into the canonical model. Entries without a price carry no
    /// usable data and are dropped.
    pub fn into_snapshot(self) -> Option<Snapshot> {
        let Some(price) = self.current_price else {
            warn!(coin_id = %self.id, "skipping market entry without a price");
            return None;
        };

        Some(Snapshot {
            coin_id: self.id,
            name: self.name,
            symbol: self.symbol,
            price_usd: price,
            market_cap: self.market_cap,
            volume_24h: self.total_volume,
            change_pct_24h: self.price_change_percentage_24h.unwrap_or(0.0),
        })
    }
}

/// Converts a decoded page into snapshots, largest market cap first, at most `top_n`.
///
/// The API already orders by market cap; sorting again keeps the contract
/// when it does not (entries without a cap go last, ties keep API order).
pub fn into_snapshots(markets: Vec<CoinGeckoMarket>, top_n: u32) -> Vec<Snapshot> {
    let mut snapshots: Vec<Snapshot> = markets
        .into_iter()
        .filter_map(CoinGeckoMarket::into_snapshot)
        .collect();

    snapshots.sort_by(|a, b| match (a.market_cap, b.market_cap) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    snapshots.truncate(top_n as usize);
    snapshots
}
