use std::fs::File;
use std::path::PathBuf;

use chrono::SecondsFormat;
use snafu::ResultExt;
use tracing::debug;

use crate::io::naming::resolve_target;
use crate::io::sink::{CsvSnafu, DataSink, IoSnafu, OutputTarget, SinkError};
use crate::models::report::HistoryReport;

/// Writes the raw history of a report as a `price,timestamp` table.
pub struct CsvHistorySink {
    target: OutputTarget,
}

impl CsvHistorySink {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

impl DataSink for CsvHistorySink {
    type Output = PathBuf;

    fn write(&self, report: &HistoryReport) -> Result<PathBuf, SinkError> {
        let path = resolve_target(
            &self.target,
            &report.coin_id,
            "history",
            "csv",
            report.generated_at,
        )?;

        let file = File::create(&path).context(IoSnafu { path: &path })?;
        let mut wtr = ::csv::Writer::from_writer(file);

        // Header is written explicitly so an empty window still yields a valid table.
        wtr.write_record(["price", "timestamp"])
            .context(CsvSnafu { path: &path })?;
        for sample in &report.history {
            wtr.write_record([
                sample.price.to_string(),
                sample.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            ])
            .context(CsvSnafu { path: &path })?;
        }
        wtr.flush().context(IoSnafu { path: &path })?;

        debug!(path = %path.display(), rows = report.history.len(), "wrote history csv");
        Ok(path)
    }
}
