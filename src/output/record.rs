//! The output row type

use crate::extract::{FieldSet, FieldValue};
use crate::state::FailureStage;
use serde::Serialize;

/// Format of the `scrape_timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the current local time in [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One row of output: the fields found for one input URL
///
/// Exactly one record exists per input URL. A failed URL still gets a record,
/// with every field [`FieldValue::NotAvailable`] and the reason in `error`.
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    url: String,
    address: FieldValue,
    lot_size: FieldValue,
    price: FieldValue,
    price_per_sqft: FieldValue,
    days_on_market: FieldValue,
    scrape_timestamp: String,
    error: String,
    #[serde(skip)]
    failure_stage: Option<FailureStage>,
}

impl ListingRecord {
    /// A record for a page that was fetched and run through extraction
    pub fn success(url: impl Into<String>, fields: FieldSet, scrape_timestamp: String) -> Self {
        Self {
            url: url.into(),
            address: fields.address,
            lot_size: fields.lot_size,
            price: fields.price,
            price_per_sqft: fields.price_per_sqft,
            days_on_market: fields.days_on_market,
            scrape_timestamp,
            error: String::new(),
            failure_stage: None,
        }
    }

    /// A record for a URL that stopped at `stage`
    pub fn failure(
        url: impl Into<String>,
        stage: FailureStage,
        error: impl Into<String>,
        scrape_timestamp: String,
    ) -> Self {
        let fields = FieldSet::default();
        Self {
            url: url.into(),
            address: fields.address,
            lot_size: fields.lot_size,
            price: fields.price,
            price_per_sqft: fields.price_per_sqft,
            days_on_market: fields.days_on_market,
            scrape_timestamp,
            error: error.into(),
            failure_stage: Some(stage),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn address(&self) -> &FieldValue {
        &self.address
    }

    pub fn lot_size(&self) -> &FieldValue {
        &self.lot_size
    }

    pub fn price(&self) -> &FieldValue {
        &self.price
    }

    pub fn price_per_sqft(&self) -> &FieldValue {
        &self.price_per_sqft
    }

    pub fn days_on_market(&self) -> &FieldValue {
        &self.days_on_market
    }

    pub fn scrape_timestamp(&self) -> &str {
        &self.scrape_timestamp
    }

    /// Error text; empty for a successful record
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn failure_stage(&self) -> Option<FailureStage> {
        self.failure_stage
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// True for a successful fetch where no field could be located
    pub fn is_empty_success(&self) -> bool {
        self.is_success()
            && [
                &self.address,
                &self.lot_size,
                &self.price,
                &self.price_per_sqft,
                &self.days_on_market,
            ]
            .iter()
            .all(|field| !field.is_found())
    }
}
