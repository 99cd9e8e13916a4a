//! Listing-Scout: a polite real-estate listing scraper
//!
//! This crate fetches listing pages one at a time, recovers a fixed set of
//! listing fields from the markup using layered heuristics, and records one
//! CSV row per input URL.

pub mod config;
pub mod extract;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for run-scoped Listing-Scout failures
///
/// Anything scoped to a single URL is recorded as data on its
/// [`output::ListingRecord`] instead of surfacing here.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Failed to read URL list {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::ListingState,
        to: state::ListingState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Output-file errors. All of them are fatal to the run.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} already exists with an unrecognized header: {found}")]
    HeaderMismatch { path: String, found: String },
}

/// Result type alias for Listing-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract, FieldSet, FieldValue, ListingDocument};
pub use output::{ListingRecord, RunSummary, WriteMode};
pub use pipeline::{Coordinator, RunOutcome};
pub use state::{FailureStage, ListingState};
pub use crate::url::validate;
