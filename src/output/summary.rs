//! End-of-run summary

use crate::output::ListingRecord;
use crate::state::FailureStage;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Counts for one completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// URLs processed (one record each)
    pub attempted: usize,

    /// Records with an empty error field
    pub succeeded: usize,

    /// Records with an error
    pub failed: usize,

    /// Successful records where no field could be located
    pub empty: usize,

    /// Failed records by the stage that stopped them
    pub failures_by_stage: BTreeMap<FailureStage, usize>,

    /// Where the records were written
    pub output_path: PathBuf,

    /// Where failures were logged
    pub error_log_path: PathBuf,
}

impl RunSummary {
    /// Tallies a finished batch of records
    pub fn from_records(
        records: &[ListingRecord],
        output_path: impl Into<PathBuf>,
        error_log_path: impl Into<PathBuf>,
    ) -> Self {
        let mut summary = Self {
            attempted: records.len(),
            output_path: output_path.into(),
            error_log_path: error_log_path.into(),
            ..Self::default()
        };

        for record in records {
            if record.is_success() {
                summary.succeeded += 1;
                if record.is_empty_success() {
                    summary.empty += 1;
                }
            } else {
                summary.failed += 1;
                if let Some(stage) = record.failure_stage() {
                    *summary.failures_by_stage.entry(stage).or_insert(0) += 1;
                }
            }
        }

        summary
    }

    /// Percentage of attempted URLs that succeeded; 0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.attempted as f64) * 100.0
        }
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("\n=== Scrape Complete ===\n");

    println!("Total URLs processed: {}", summary.attempted);
    println!("Successful: {}", summary.succeeded);
    if summary.empty > 0 {
        println!("  with no listing fields found: {}", summary.empty);
    }
    println!("Failed: {}", summary.failed);
    for stage in FailureStage::all_stages() {
        if let Some(count) = summary.failures_by_stage.get(&stage) {
            println!("  {}: {}", stage, count);
        }
    }
    println!("Success rate: {:.1}%", summary.success_rate());

    println!("\nResults saved to: {}", summary.output_path.display());
    if summary.failed > 0 {
        println!(
            "Error details logged to: {}",
            summary.error_log_path.display()
        );
    }
}
