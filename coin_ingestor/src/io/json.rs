use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use snafu::ResultExt;
use tracing::debug;

use crate::io::naming::resolve_target;
use crate::io::sink::{DataSink, IoSnafu, JsonSnafu, OutputTarget, SinkError};
use crate::models::report::HistoryReport;

/// Writes a whole [`HistoryReport`] (summary plus history array) as pretty JSON.
pub struct JsonReportSink {
    target: OutputTarget,
}

impl JsonReportSink {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl DataSink for JsonReportSink {
    type Output = PathBuf;

    fn write(&self, report: &HistoryReport) -> Result<PathBuf, SinkError> {
        let path = resolve_target(
            &self.target,
            &report.coin_id,
            "report",
            "json",
            report.generated_at,
        )?;

        let file = File::create(&path).context(IoSnafu { path: &path })?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, report).context(JsonSnafu { path: &path })?;
        out.write_all(b"\n").context(IoSnafu { path: &path })?;
        out.flush().context(IoSnafu { path: &path })?;

        debug!(path = %path.display(), samples = report.history.len(), "wrote json report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::Value;

    use super::*;
    use crate::models::{sample::Sample, summary::StatsSummary};

    #[test]
    fn test_report_round_trips_through_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let report = HistoryReport {
            coin_id: "ethereum".into(),
            period_hours: 24,
            generated_at: t0,
            summary: Some(StatsSummary {
                coin_id: "ethereum".into(),
                period_hours: 24,
                data_points: 1,
                current_price: 3000.0,
                avg_price: 3000.0,
                min_price: 3000.0,
                max_price: 3000.0,
                price_change: 0.0,
                price_change_percent: 0.0,
                volatility: 0.0,
            }),
            history: vec![Sample::new(3000.0, t0)],
        };

        let path = JsonReportSink::new(OutputTarget::Dir(tmp.path().to_path_buf()))
            .write(&report)
            .unwrap();
        assert!(path.ends_with("ethereum_report_20240501_100000.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let back: HistoryReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_missing_summary_is_null() {
        let tmp = tempfile::TempDir::new().unwrap();
        let report = HistoryReport {
            coin_id: "dogecoin".into(),
            period_hours: 6,
            generated_at: Utc::now(),
            summary: None,
            history: vec![],
        };

        let path = JsonReportSink::new(OutputTarget::File(tmp.path().join("r.json")))
            .write(&report)
            .unwrap();
        let v: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(v["summary"].is_null());
        assert_eq!(v["history"].as_array().unwrap().len(), 0);
        assert_eq!(v["period_hours"], 6);
    }
}
