//! State module for tracking per-URL progress
//!
//! # Components
//!
//! - `ListingState`: where a single input URL is in the pipeline
//! - `FailureStage`: which stage stopped a failed URL

mod listing_state;

// Re-export main types
pub use listing_state::{FailureStage, ListingState};
