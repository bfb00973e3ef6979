//! Descriptive statistics over a window of price samples.

use coin_ingestor::models::{sample::Sample, summary::StatsSummary};

/// Summarizes `samples`, which must already be limited to the trailing
/// `period_hours` window and sorted oldest first.
///
/// Returns `None` for an empty window. With a single sample every delta is
/// zero; see [`StatsSummary::has_trend`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use coin_ingestor::models::sample::Sample;
/// use coin_tracker::analytics::compute_statistics;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let samples = [Sample::new(100.0, t), Sample::new(110.0, t), Sample::new(90.0, t)];
/// let s = compute_statistics("bitcoin", &samples, 24).unwrap();
/// assert_eq!(s.price_change_percent, -10.0);
/// ```
pub fn compute_statistics(
    coin_id: &str,
    samples: &[Sample],
    period_hours: u32,
) -> Option<StatsSummary> {
    let first = samples.first()?.price;
    let last = samples.last()?.price;

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in samples {
        sum += s.price;
        min = min.min(s.price);
        max = max.max(s.price);
    }
    // rounding can push the mean one ulp outside [min, max]
    let avg = (sum / samples.len() as f64).max(min).min(max);

    let price_change = last - first;
    let price_change_percent = if first == 0.0 {
        0.0
    } else {
        price_change / first * 100.0
    };

    Some(StatsSummary {
        coin_id: coin_id.to_string(),
        period_hours,
        data_points: samples.len(),
        current_price: last,
        avg_price: avg,
        min_price: min,
        max_price: max,
        price_change,
        price_change_percent,
        volatility: max - min,
    })
}
