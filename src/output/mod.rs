//! Output module for recording scrape results
//!
//! This module handles:
//! - The per-URL output row ([`ListingRecord`])
//! - Writing rows to the CSV output file, fresh or appended
//! - The append-only failure log
//! - The end-of-run summary

mod csv_writer;
mod error_log;
mod record;
mod summary;

pub use csv_writer::{CsvWriter, WriteMode, HEADER};
pub use error_log::ErrorLog;
pub use record::{timestamp_now, ListingRecord, TIMESTAMP_FORMAT};
pub use summary::{print_summary, RunSummary};

use chrono::Local;
use std::path::PathBuf;

/// Builds the default output file name, e.g. `zillow_data_2026-10-18_14-05.csv`
pub fn default_output_path(prefix: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.csv",
        prefix,
        Local::now().format("%Y-%m-%d_%H-%M")
    ))
}
