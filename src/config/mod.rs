//! Configuration module for Listing-Scout
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file the built-in defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use listing_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Pausing at least {}s between requests", config.rate_limit.min_delay_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, RateLimitConfig, SiteConfig, DEFAULT_USER_AGENT,
};
pub use validation::MIN_DELAY_FLOOR_SECS;

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
