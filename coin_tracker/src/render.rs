//! Plain-text rendering for the CLI.

use std::fmt::Write as _;

use coin_ingestor::models::{
    alert::Alert, snapshot::Snapshot, summary::StatsSummary,
};

/// Renders a summary block, or the "insufficient data" line when the window
/// was empty. Change lines are omitted when there is only one sample.
pub fn render_summary(coin_id: &str, hours: u32, summary: Option<&StatsSummary>) -> String {
    let Some(s) = summary else {
        return format!("{coin_id}: insufficient data in the last {hours}h\n");
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} over the last {}h ({} samples)",
        s.coin_id, s.period_hours, s.data_points
    );
    let _ = writeln!(out, "  current:    ${:.2}", s.current_price);
    let _ = writeln!(out, "  average:    ${:.2}", s.avg_price);
    let _ = writeln!(out, "  low / high: ${:.2} / ${:.2}", s.min_price, s.max_price);
    if s.has_trend() {
        let _ = writeln!(
            out,
            "  change:     {:+.2} ({:+.2}%)",
            s.price_change, s.price_change_percent
        );
        let _ = writeln!(out, "  volatility: {:.2}", s.volatility);
    } else {
        let _ = writeln!(out, "  change:     n/a (single sample)");
    }
    out
}

fn compact(v: Option<f64>) -> String {
    match v {
        None => "-".to_string(),
        Some(x) if x >= 1e12 => format!("{:.2}T", x / 1e12),
        Some(x) if x >= 1e9 => format!("{:.2}B", x / 1e9),
        Some(x) if x >= 1e6 => format!("{:.2}M", x / 1e6),
        Some(x) => format!("{x:.0}"),
    }
}

/// Renders snapshots as an aligned table, one row per coin in the given order.
pub fn render_batch_table(batch: &[Snapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<20} {:<8} {:>14} {:>9} {:>10} {:>10}",
        "#", "name", "symbol", "price", "24h %", "mcap", "volume"
    );
    for (i, s) in batch.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:<8} {:>14.4} {:>+9.2} {:>10} {:>10}",
            i + 1,
            s.name,
            s.symbol.to_uppercase(),
            s.price_usd,
            s.change_pct_24h,
            compact(s.market_cap),
            compact(s.volume_24h),
        );
    }
    out
}

/// One line per alert.
pub fn render_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "no alerts\n".to_string();
    }
    alerts
        .iter()
        .map(|a| {
            format!(
                "{} {} ({}) {:+.2}% at ${:.2}\n",
                a.direction.glyph(),
                a.coin_name,
                a.symbol.to_uppercase(),
                a.change_pct,
                a.price
            )
        })
        .collect()
}
