//! Pipeline module for processing a batch of listing URLs
//!
//! This module contains the sequential scrape flow, including:
//! - HTTP fetching with a browser-like client
//! - Request pacing and the large-batch confirmation
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod rate_limiter;

pub use coordinator::{Coordinator, RunOutcome, INVALID_URL_MESSAGE};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, NetworkErrorKind};
pub use rate_limiter::{AutoConfirm, Confirmation, Prompt, RateLimiter};

use crate::config::Config;
use crate::input::BatchRequest;
use crate::output::WriteMode;
use crate::ScoutError;
use std::path::PathBuf;

/// Runs a complete scrape
///
/// This is the main entry point for a batch. It will:
/// 1. Build the HTTP client and rate limiter from `config`
/// 2. Check the batch size with `confirmation`
/// 3. Fetch and extract each URL in order
/// 4. Write the records to `output_path`
///
/// # Returns
///
/// * `Ok(RunOutcome)` - The run completed or was declined
/// * `Err(ScoutError)` - A run-scoped failure, such as an unwritable output file
pub async fn scrape(
    config: Config,
    batch: &BatchRequest,
    output_path: impl Into<PathBuf>,
    mode: WriteMode,
    confirmation: &mut dyn Confirmation,
) -> Result<RunOutcome, ScoutError> {
    let mut coordinator = Coordinator::new(config, output_path, mode)?;
    coordinator.run(batch, confirmation).await
}
