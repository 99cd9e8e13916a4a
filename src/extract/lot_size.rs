//! Lot size strategies

use super::text::{attr_contains, element_text};
use super::{ListingDocument, Strategy};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

const LOT_LABEL: &str = "lot size";

static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("Failed to parse span selector"));

static TESTED_SPAN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span[data-testid]").expect("Failed to parse test id selector")
});

static INLINE_LOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\blot(?:\s+size)?\s*:?\s*(\d[\d,]*(?:\.\d+)?\s*(?:sq\.?\s*ft|square\s+f(?:ee|oo)t|acres?|ac)\b)",
    )
    .expect("Failed to compile inline lot size regex")
});

pub(super) static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "lot-label-proximity",
        probe: label_proximity,
    },
    Strategy {
        name: "lot-test-id",
        probe: lot_test_id,
    },
    Strategy {
        name: "lot-inline-text",
        probe: inline_text,
    },
];

/// The first non-label span following each "Lot size" label span
fn label_proximity(document: &ListingDocument) -> Vec<String> {
    let spans: Vec<String> = document.html().select(&SPAN).map(element_text).collect();
    let is_label = |text: &str| text.to_lowercase().contains(LOT_LABEL);

    let mut candidates = Vec::new();
    for (index, text) in spans.iter().enumerate() {
        if !is_label(text) {
            continue;
        }
        let value = spans[index + 1..]
            .iter()
            .find(|next| !next.is_empty() && !is_label(next));
        if let Some(value) = value {
            candidates.push(value.clone());
        }
    }
    candidates
}

/// Spans whose `data-testid` mentions the lot
fn lot_test_id(document: &ListingDocument) -> Vec<String> {
    document
        .html()
        .select(&TESTED_SPAN)
        .filter(|element| attr_contains(*element, "data-testid", "lot"))
        .map(element_text)
        .collect()
}

/// `Lot size: 0.25 acres` style phrases anywhere in the visible text
fn inline_text(document: &ListingDocument) -> Vec<String> {
    INLINE_LOT_RE
        .captures_iter(document.visible_text())
        .filter_map(|captures| captures.get(1))
        .map(|value| value.as_str().to_string())
        .collect()
}
