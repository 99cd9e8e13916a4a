/// Listing state definitions for tracking per-URL progress
///
/// Each input URL walks `Pending -> Validated -> Fetched -> Extracted -> Recorded`.
/// Any non-terminal state may instead drop into `Failed(stage)`.
use crate::ScoutError;
use std::fmt;

/// The pipeline stage at which a URL stopped making progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureStage {
    /// URL was not a listing URL for the configured site
    Validation,

    /// HTTP error status or network failure
    Fetch,

    /// The fetched document could not be turned into a field set
    Extraction,
}

impl FailureStage {
    /// Returns a short lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fetch => "fetch",
            Self::Extraction => "extraction",
        }
    }

    /// Returns all stages in pipeline order
    pub fn all_stages() -> [Self; 3] {
        [Self::Validation, Self::Fetch, Self::Extraction]
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the current state of one input URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingState {
    // ===== Active States =====
    /// URL has been read but nothing has been checked yet
    Pending,

    /// URL passed the site check
    Validated,

    /// A 2xx response body is in hand
    Fetched,

    /// Field extraction has run
    Extracted,

    // ===== Terminal States =====
    /// The record for this URL has been added to the output batch
    Recorded,

    /// Processing stopped at the given stage
    Failed(FailureStage),
}

impl ListingState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Recorded | Self::Failed(_))
    }

    /// Returns true if this is an active state
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the URL made it all the way through the pipeline
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    /// Returns the failure stage, if this is a failed state
    pub fn failure_stage(&self) -> Option<FailureStage> {
        match self {
            Self::Failed(stage) => Some(*stage),
            _ => None,
        }
    }

    /// Returns true if moving from `self` to `next` is allowed
    ///
    /// Success transitions advance exactly one step. A failure is only
    /// reachable from the state whose stage it describes: validation fails
    /// from `Pending`, fetch from `Validated`, extraction from `Fetched`.
    pub fn can_transition_to(&self, next: ListingState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Validated)
                | (Self::Validated, Self::Fetched)
                | (Self::Fetched, Self::Extracted)
                | (Self::Extracted, Self::Recorded)
                | (Self::Pending, Self::Failed(FailureStage::Validation))
                | (Self::Validated, Self::Failed(FailureStage::Fetch))
                | (Self::Fetched, Self::Failed(FailureStage::Extraction))
        )
    }

    /// Moves to `next`, or reports an invalid transition
    pub fn transition(self, next: ListingState) -> Result<ListingState, ScoutError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ScoutError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for ListingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Validated => f.write_str("validated"),
            Self::Fetched => f.write_str("fetched"),
            Self::Extracted => f.write_str("extracted"),
            Self::Recorded => f.write_str("recorded"),
            Self::Failed(stage) => write!(f, "failed({})", stage),
        }
    }
}
