//! Append-only log of per-URL failures
//!
//! This is a diagnostic sink. Writing to it can fail without affecting the
//! records; such failures are reported through `tracing` only.

use crate::output::record::timestamp_now;
use crate::state::FailureStage;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One line per failure: `<timestamp> ERROR <stage> <url> - <reason>`
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    file: Option<File>,
    entries: usize,
}

impl ErrorLog {
    /// Creates a log at `path`. The file is opened on the first failure.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            entries: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of failures recorded during this run
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Appends one failure line
    pub fn record(&mut self, url: &str, stage: FailureStage, reason: &str) {
        self.entries += 1;
        let line = format_entry(&timestamp_now(), url, stage, reason);

        if let Err(e) = self.append(&line) {
            tracing::warn!(
                "Could not write to error log {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn append(&mut self, line: &str) -> std::io::Result<()> {
        if self.file.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            self.file = Some(file);
        }

        match self.file.as_mut() {
            Some(file) => {
                writeln!(file, "{}", line)?;
                file.flush()
            }
            None => Ok(()),
        }
    }
}

fn format_entry(timestamp: &str, url: &str, stage: FailureStage, reason: &str) -> String {
    format!(
        "{} ERROR {} {} - {}",
        timestamp,
        stage,
        url,
        reason.replace(['\r', '\n'], " ")
    )
}
