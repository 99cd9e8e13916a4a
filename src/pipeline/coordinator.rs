//! Run coordinator - the sequential scrape loop
//!
//! This module drives a batch from start to finish:
//! - Checking the batch size before any request is made
//! - Moving each URL through validate, fetch, extract, record
//! - Pacing requests with the rate limiter
//! - Writing every record once the batch is done
//!
//! A failure on one URL becomes that URL's record. Only output-file errors
//! end the run early.

use crate::config::Config;
use crate::extract::extract_from_body;
use crate::input::BatchRequest;
use crate::output::{timestamp_now, CsvWriter, ErrorLog, ListingRecord, RunSummary, WriteMode};
use crate::pipeline::fetcher::{build_http_client, fetch_url, FetchOutcome};
use crate::pipeline::rate_limiter::{Confirmation, RateLimiter};
use crate::state::{FailureStage, ListingState};
use crate::ScoutError;
use reqwest::Client;
use std::path::PathBuf;

/// Error text recorded for URLs outside the configured site
pub const INVALID_URL_MESSAGE: &str = "Invalid listing URL";

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// Every URL was processed and the records were written
    Completed(RunSummary),

    /// The operator declined the volume prompt; nothing was fetched or written
    Aborted,
}

/// Main run coordinator
pub struct Coordinator {
    config: Config,
    client: Client,
    rate_limiter: RateLimiter,
    error_log: ErrorLog,
    writer: CsvWriter,
}

impl Coordinator {
    /// Creates a coordinator writing to `output_path`
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `output_path` - Destination CSV file
    /// * `mode` - Whether to overwrite or append to the destination
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScoutError)` - The HTTP client could not be built
    pub fn new(
        config: Config,
        output_path: impl Into<PathBuf>,
        mode: WriteMode,
    ) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.fetch)?;
        let rate_limiter = RateLimiter::new(&config.rate_limit);
        let error_log = ErrorLog::new(&config.output.error_log);
        let writer = CsvWriter::new(output_path, mode);

        Ok(Self {
            config,
            client,
            rate_limiter,
            error_log,
            writer,
        })
    }

    /// Replaces the rate limiter
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Runs a whole batch
    ///
    /// This method:
    /// 1. Checks the batch size, asking `confirmation` if it is large
    /// 2. Checks that the output file can be written
    /// 3. Processes each URL in order, pausing after every request but the last
    /// 4. Writes one record per URL to the output file
    /// 5. Summarizes the run
    pub async fn run(
        &mut self,
        batch: &BatchRequest,
        confirmation: &mut dyn Confirmation,
    ) -> Result<RunOutcome, ScoutError> {
        let total = batch.len();

        if !self.rate_limiter.check_volume(total, confirmation) {
            tracing::warn!("Run aborted at the volume check; nothing was fetched");
            return Ok(RunOutcome::Aborted);
        }

        self.writer.preflight()?;

        tracing::info!("Starting scrape of {} URL(s)", total);
        let start_time = std::time::Instant::now();
        let mut records = Vec::with_capacity(total);

        for (index, url) in batch.iter().enumerate() {
            tracing::info!("Processing {}/{}: {}", index + 1, total, url);

            let record = self.process_url(url).await?;
            report(&record);
            let requested = record.failure_stage() != Some(FailureStage::Validation);
            records.push(record);

            if requested && index + 1 < total {
                self.rate_limiter.pause().await;
            }
        }

        let written = self.writer.write(&records)?;
        tracing::info!(
            "Wrote {} record(s) to {} in {:?}",
            written,
            self.writer.path().display(),
            start_time.elapsed()
        );

        Ok(RunOutcome::Completed(RunSummary::from_records(
            &records,
            self.writer.path(),
            self.error_log.path(),
        )))
    }

    /// Processes a single URL into its record
    ///
    /// Per-URL failures are returned as failure records. An `Err` here means
    /// the state machine was driven out of order.
    pub async fn process_url(&mut self, url: &str) -> Result<ListingRecord, ScoutError> {
        let state = ListingState::Pending;

        if !crate::url::validate(url, &self.config.site.domain) {
            return self.fail(state, url, FailureStage::Validation, INVALID_URL_MESSAGE);
        }
        let state = state.transition(ListingState::Validated)?;

        let (body, content_type) = match fetch_url(&self.client, url).await {
            FetchOutcome::Success {
                body,
                status,
                content_type,
            } => {
                tracing::debug!("Fetched {} (HTTP {}, {} bytes)", url, status, body.len());
                (body, content_type)
            }
            outcome => {
                let message = outcome
                    .error_message()
                    .unwrap_or_else(|| "request failed".to_string());
                return self.fail(state, url, FailureStage::Fetch, &message);
            }
        };
        let state = state.transition(ListingState::Fetched)?;

        if let Some(content_type) = content_type.filter(|ct| !is_markup(ct)) {
            let message = format!("Parsing error: unsupported content type {}", content_type);
            return self.fail(state, url, FailureStage::Extraction, &message);
        }

        let fields = extract_from_body(&body);
        let state = state.transition(ListingState::Extracted)?;

        if fields.is_empty() {
            tracing::warn!("No listing fields found on {}", url);
        }

        let record = ListingRecord::success(url, fields, timestamp_now());
        state.transition(ListingState::Recorded)?;
        Ok(record)
    }

    /// Moves to the failed state and builds the failure record
    fn fail(
        &mut self,
        state: ListingState,
        url: &str,
        stage: FailureStage,
        message: &str,
    ) -> Result<ListingRecord, ScoutError> {
        state.transition(ListingState::Failed(stage))?;
        self.error_log.record(url, stage, message);
        Ok(ListingRecord::failure(url, stage, message, timestamp_now()))
    }
}

/// Returns true for content types the extractor can read
fn is_markup(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.contains("xml")
}

/// Logs the per-URL result
fn report(record: &ListingRecord) {
    if record.is_success() {
        tracing::info!(
            "Scraped {}: address={}, price={}, lot size={}",
            record.url(),
            record.address(),
            record.price(),
            record.lot_size()
        );
    } else {
        tracing::error!(
            "Failed {} at {}: {}",
            record.url(),
            record
                .failure_stage()
                .map(|stage| stage.as_str())
                .unwrap_or("unknown"),
            record.error()
        );
    }
}
