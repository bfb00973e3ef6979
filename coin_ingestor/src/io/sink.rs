use std::path::PathBuf;

use snafu::{Backtrace, Snafu};

use crate::models::report::HistoryReport;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// Creating the output directory or file failed.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Serializing a row into the tabular format failed.
    #[snafu(display("CSV write error on {}: {source}", path.display()))]
    Csv {
        path: PathBuf,
        source: ::csv::Error,
        backtrace: Backtrace,
    },

    /// Serializing the report into JSON failed.
    #[snafu(display("JSON write error on {}: {source}", path.display()))]
    Json {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

/// Where a sink should put its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write exactly this file.
    File(PathBuf),
    /// Write into this directory under the default generated filename.
    Dir(PathBuf),
}

pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// The file sinks in this crate return the `PathBuf` they created; a sink
    /// writing somewhere else could report a row count instead.
    type Output;

    /// Writes one coin's history report to the destination.
    fn write(&self, report: &HistoryReport) -> Result<Self::Output, SinkError>;
}
