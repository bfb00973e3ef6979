//! One fetch-store-alert cycle, plus the read paths the CLI builds on.
//!
//! A cycle fetches the current top-N snapshots, appends them to the store as
//! one batch, evaluates alerts over the fresh batch and, when a notifier is
//! configured, dispatches them. A source failure ends the cycle before anything
//! is written. Cycles never overlap: the caller awaits one before starting the
//! next.

use std::time::Duration;

use coin_ingestor::{
    models::{
        alert::Alert, report::HistoryReport, request_params::MarketsRequestParams,
        sample::Sample, snapshot::Snapshot, summary::StatsSummary,
    },
    notify::{DispatchReport, Notifier, Pacer, dispatch_alerts},
    providers::{ProviderError, SnapshotSource},
};
use tracing::{info, warn};

use crate::{
    analytics::{compute_statistics, evaluate_alerts},
    clock::Clock,
    store::{StoreError, TimeSeriesStore},
};

/// Per-cycle knobs, usually derived from [`AppConfig`](crate::config::AppConfig).
#[derive(Debug, Clone)]
pub struct CycleOptions {
    /// What to fetch.
    pub params: MarketsRequestParams,
    /// Absolute 24h change, in percent, that raises an alert.
    pub alert_threshold_pct: f64,
    /// Pause between consecutive notifications.
    pub notify_spacing: Duration,
}

/// What a completed cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Snapshots returned by the source.
    pub fetched: usize,
    /// Rows the store accepted.
    pub stored: usize,
    /// The fetched batch, in source order.
    pub batch: Vec<Snapshot>,
    /// Alerts raised by the batch.
    pub alerts: Vec<Alert>,
    /// Delivery counts, when a notifier was configured and there was something to send.
    pub dispatch: Option<DispatchReport>,
}

/// Result of [`run_cycle`].
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The source failed; nothing was stored or sent.
    SourceUnavailable,
    /// The cycle ran to the end.
    Completed(CycleReport),
}

/// Runs one cycle.
///
/// Only store failures are returned as errors. A source failure is logged and
/// reported as [`CycleOutcome::SourceUnavailable`]; notification failures are
/// counted in the [`DispatchReport`].
pub async fn run_cycle(
    source: &dyn SnapshotSource,
    store: &mut dyn TimeSeriesStore,
    notifier: Option<&dyn Notifier>,
    pacer: &dyn Pacer,
    opts: &CycleOptions,
    clock: &dyn Clock,
) -> Result<CycleOutcome, StoreError> {
    let batch = match source.fetch_snapshots(opts.params.clone()).await {
        Ok(batch) => batch,
        Err(e) => {
            warn!(error = %e, "snapshot source unavailable; skipping cycle");
            return Ok(CycleOutcome::SourceUnavailable);
        }
    };

    let stored = store.append_batch(&batch)?;
    let alerts = evaluate_alerts(&batch, opts.alert_threshold_pct);
    info!(
        fetched = batch.len(),
        stored,
        alerts = alerts.len(),
        "cycle stored batch"
    );

    let dispatch = match notifier {
        Some(n) if !alerts.is_empty() => {
            let report = dispatch_alerts(n, &alerts, clock.now(), opts.notify_spacing, pacer).await;
            info!(sent = report.sent, failed = report.failed, "alerts dispatched");
            Some(report)
        }
        _ => None,
    };

    Ok(CycleOutcome::Completed(CycleReport {
        fetched: batch.len(),
        stored,
        batch,
        alerts,
        dispatch,
    }))
}

/// Fetches and evaluates alerts without storing or sending anything.
pub async fn preview_alerts(
    source: &dyn SnapshotSource,
    params: MarketsRequestParams,
    threshold_pct: f64,
) -> Result<Vec<Alert>, ProviderError> {
    let batch = source.fetch_snapshots(params).await?;
    Ok(evaluate_alerts(&batch, threshold_pct))
}

/// Window samples for `coin_id` and their summary.
pub fn summarize(
    store: &mut dyn TimeSeriesStore,
    coin_id: &str,
    hours: u32,
) -> Result<(Option<StatsSummary>, Vec<Sample>), StoreError> {
    let samples = store.range_query(coin_id, hours)?;
    let summary = compute_statistics(coin_id, &samples, hours);
    Ok((summary, samples))
}

/// Bundles the window for `coin_id` into a report for the export sinks.
pub fn build_report(
    store: &mut dyn TimeSeriesStore,
    clock: &dyn Clock,
    coin_id: &str,
    hours: u32,
) -> Result<HistoryReport, StoreError> {
    let (summary, history) = summarize(store, coin_id, hours)?;
    Ok(HistoryReport {
        coin_id: coin_id.to_string(),
        period_hours: hours,
        generated_at: clock.now(),
        summary,
        history,
    })
}
