//! Validation guards applied to every extraction candidate
//!
//! A guard either accepts a candidate (returning the value to record, possibly
//! normalized) or rejects it. Rejected candidates are discarded, never coerced
//! into something that looks valid.

use super::text::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on a plausible days-on-market count (about a century)
pub const MAX_DAYS_ON_MARKET: u32 = 36_500;

const MAX_ADDRESS_LEN: usize = 200;
const MAX_LOT_SIZE_CANDIDATE_LEN: usize = 60;

/// The number must start the candidate or follow a character that cannot be
/// part of a number, so `.25` and `1.5-2` are never cut down to a fragment.
static LOT_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,\-])(\d[\d,]*(?:\.\d+)?)\s*(sq\.?\s*ft|square\s+f(?:ee|oo)t|acres?|ac)\b",
    )
    .expect("Failed to compile lot size regex")
});

static PRICE_PER_SQFT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\$\s?\d[\d,]*(?:\.\d+)?(?:\s*(?:/|per)\s*(?:sq\.?\s*ft\.?|square\s+f(?:ee|oo)t))?$",
    )
    .expect("Failed to compile price per sqft regex")
});

static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d[\d,]*)(?:\s+days?)?$").expect("Failed to compile days regex")
});

/// Accepts a non-empty address containing at least one letter
pub fn guard_address(candidate: &str) -> Option<String> {
    let address = collapse_whitespace(candidate);
    if address.is_empty() || address.len() > MAX_ADDRESS_LEN {
        return None;
    }
    if !address.chars().any(char::is_alphabetic) {
        return None;
    }
    Some(address)
}

/// Parses an amount that may use `,` thousands separators
fn parse_amount(amount: &str) -> Option<f64> {
    let digits: String = amount.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Accepts a `<number> <unit>` lot size and normalizes the unit
///
/// Small-area units (`sqft`, `sq ft`, `sq. ft.`, `square feet`) become `sqft`;
/// large-area units (`acre`, `acres`, `ac`) become `acres`. A bare number is
/// rejected.
pub fn guard_lot_size(candidate: &str) -> Option<String> {
    let candidate = collapse_whitespace(candidate);
    if candidate.len() > MAX_LOT_SIZE_CANDIDATE_LEN {
        return None;
    }

    let captures = LOT_SIZE_RE.captures(&candidate)?;
    let number = captures.get(1)?.as_str().trim_end_matches(',');
    let unit = captures.get(2)?.as_str().to_lowercase();

    if parse_amount(number)? <= 0.0 {
        return None;
    }

    let unit = if unit.starts_with("ac") { "acres" } else { "sqft" };
    Some(format!("{} {}", number, unit))
}

/// Accepts a `$`-prefixed amount that is numeric once the marker is stripped
pub fn guard_price(candidate: &str) -> Option<String> {
    let price = candidate.trim();
    let amount = price.strip_prefix('$')?;
    let amount: String = amount.chars().filter(|c| !c.is_whitespace()).collect();

    if parse_amount(&amount)? <= 0.0 {
        return None;
    }
    Some(price.to_string())
}

/// Accepts `$<amount>` optionally followed by a per-area suffix such as `/sqft`
pub fn guard_price_per_sqft(candidate: &str) -> Option<String> {
    let value = collapse_whitespace(candidate);
    if PRICE_PER_SQFT_RE.is_match(&value) {
        Some(value)
    } else {
        None
    }
}

/// Accepts a small non-negative integer, optionally followed by `day`/`days`
///
/// The value is normalized to `<n> days`.
pub fn guard_days_on_market(candidate: &str) -> Option<String> {
    let value = collapse_whitespace(candidate);
    let captures = DAYS_RE.captures(&value)?;
    let number = captures.get(1)?.as_str();

    let digits: String = number.chars().filter(|c| *c != ',').collect();
    let days: u32 = digits.parse().ok()?;
    if days > MAX_DAYS_ON_MARKET {
        return None;
    }
    Some(format!("{} days", days))
}
