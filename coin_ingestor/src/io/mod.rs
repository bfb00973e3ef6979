//! File export sinks for a coin's history window.
//!
//! - [`csv::CsvHistorySink`] writes the raw `(price, timestamp)` series.
//! - [`json::JsonReportSink`] writes the statistics summary together with the series.
//!
//! Both implement [`sink::DataSink`] and return the path they wrote.

pub mod csv;
pub mod json;
pub mod naming;
pub mod sink;
