//! Field extraction from listing markup
//!
//! Listing pages change shape often, so every field is recovered by an
//! ordered list of independent [`Strategy`] probes. Each candidate a probe
//! produces is checked by the field's guard; the first candidate that
//! survives wins and later strategies are not consulted. A field whose
//! strategies all miss is [`FieldValue::NotAvailable`].
//!
//! Extraction is a pure function of the document: no network, no files.
//!
//! ```
//! use listing_scout::extract::{extract, ListingDocument};
//!
//! let doc = ListingDocument::parse(
//!     r#"<html><body><h1 data-testid="bdp-address">12 Oak Ln, Austin, TX</h1>
//!        <span data-testid="price">$450,000</span></body></html>"#,
//! );
//! let fields = extract(&doc);
//! assert_eq!(fields.address.as_deref(), Some("12 Oak Ln, Austin, TX"));
//! assert_eq!(fields.price.as_deref(), Some("$450,000"));
//! assert!(!fields.lot_size.is_found());
//! ```

mod address;
mod days_on_market;
mod guards;
mod lot_size;
mod price;
mod price_per_sqft;
pub mod text;

pub use guards::{
    guard_address, guard_days_on_market, guard_lot_size, guard_price, guard_price_per_sqft,
};

use scraper::Html;
use serde::{Serialize, Serializer};
use std::fmt;

/// Text written to the output for a field that was not found
pub const NOT_AVAILABLE: &str = "N/A";

/// A parsed listing page plus its visible plain text
pub struct ListingDocument {
    html: Html,
    text: String,
}

impl ListingDocument {
    /// Parses a response body. html5ever never fails, it repairs.
    pub fn parse(body: &str) -> Self {
        let html = Html::parse_document(body);
        let text = text::visible_text(&html);
        Self { html, text }
    }

    /// The parsed markup
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Whitespace-collapsed text outside scripts and styles
    pub fn visible_text(&self) -> &str {
        &self.text
    }
}

/// One extracted field: either a value or explicitly absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    #[default]
    NotAvailable,
}

impl FieldValue {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotAvailable => None,
        }
    }

    /// The text written to the output table
    pub fn as_output(&self) -> &str {
        self.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Found).unwrap_or(Self::NotAvailable)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_output())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_output())
    }
}

/// The five listing fields recovered from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    pub address: FieldValue,
    pub lot_size: FieldValue,
    pub price: FieldValue,
    pub price_per_sqft: FieldValue,
    pub days_on_market: FieldValue,
}

impl FieldSet {
    /// Number of fields that were found
    pub fn found_count(&self) -> usize {
        [
            &self.address,
            &self.lot_size,
            &self.price,
            &self.price_per_sqft,
            &self.days_on_market,
        ]
        .into_iter()
        .filter(|field| field.is_found())
        .count()
    }

    /// True when no field was found at all
    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }
}

/// Produces candidate values for a field, in preference order
pub type Probe = fn(&ListingDocument) -> Vec<String>;

/// Accepts (and possibly normalizes) a candidate, or rejects it
pub type Guard = fn(&str) -> Option<String>;

/// A named, independently testable way of finding one field
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub probe: Probe,
}

impl Strategy {
    /// Runs the probe and returns the first candidate the guard accepts
    pub fn apply(&self, document: &ListingDocument, guard: Guard) -> Option<String> {
        (self.probe)(document)
            .iter()
            .find_map(|candidate| guard(candidate))
    }
}

/// The strategies and guard for one field
pub struct FieldRule {
    pub field: &'static str,
    pub strategies: &'static [Strategy],
    pub guard: Guard,
}

impl FieldRule {
    /// Tries each strategy in order; the first accepted candidate wins
    pub fn extract(&self, document: &ListingDocument) -> FieldValue {
        for strategy in self.strategies {
            match strategy.apply(document, self.guard) {
                Some(value) => {
                    tracing::debug!(
                        field = self.field,
                        strategy = strategy.name,
                        value = %value,
                        "field found"
                    );
                    return FieldValue::Found(value);
                }
                None => {
                    tracing::trace!(field = self.field, strategy = strategy.name, "no match");
                }
            }
        }

        tracing::debug!(field = self.field, "field not available");
        FieldValue::NotAvailable
    }
}

pub static ADDRESS: FieldRule = FieldRule {
    field: "address",
    strategies: address::STRATEGIES,
    guard: guard_address,
};

pub static LOT_SIZE: FieldRule = FieldRule {
    field: "lot_size",
    strategies: lot_size::STRATEGIES,
    guard: guard_lot_size,
};

pub static PRICE: FieldRule = FieldRule {
    field: "price",
    strategies: price::STRATEGIES,
    guard: guard_price,
};

pub static PRICE_PER_SQFT: FieldRule = FieldRule {
    field: "price_per_sqft",
    strategies: price_per_sqft::STRATEGIES,
    guard: guard_price_per_sqft,
};

pub static DAYS_ON_MARKET: FieldRule = FieldRule {
    field: "days_on_market",
    strategies: days_on_market::STRATEGIES,
    guard: guard_days_on_market,
};

/// Extracts all five listing fields from a parsed page
pub fn extract(document: &ListingDocument) -> FieldSet {
    FieldSet {
        address: ADDRESS.extract(document),
        lot_size: LOT_SIZE.extract(document),
        price: PRICE.extract(document),
        price_per_sqft: PRICE_PER_SQFT.extract(document),
        days_on_market: DAYS_ON_MARKET.extract(document),
    }
}

/// Parses a response body and extracts its fields in one step
pub fn extract_from_body(body: &str) -> FieldSet {
    extract(&ListingDocument::parse(body))
}
