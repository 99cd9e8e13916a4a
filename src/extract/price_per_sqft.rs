//! Price per square foot strategies

use super::text::{attr_contains, element_text};
use super::{ListingDocument, Strategy};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

const LABELS: [&str; 3] = ["$/sqft", "per sqft", "price/sqft"];

static SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("Failed to parse span selector"));

static TESTED_SPAN: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span[data-testid]").expect("Failed to parse test id selector")
});

static INLINE_PER_SQFT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\s?\d[\d,]*(?:\.\d+)?\s*(?:/|per)\s*(?:sq\.?\s*ft|sqft)\b")
        .expect("Failed to compile inline price per sqft regex")
});

pub(super) static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "per-sqft-label-proximity",
        probe: label_proximity,
    },
    Strategy {
        name: "per-sqft-test-id",
        probe: per_sqft_test_id,
    },
    Strategy {
        name: "per-sqft-inline-text",
        probe: inline_text,
    },
];

fn is_label(text: &str) -> bool {
    let lower = text.to_lowercase();
    LABELS.iter().any(|label| lower.contains(label))
}

/// Dollar amounts next to the label's container
///
/// Following siblings of the label's parent come first, then its preceding
/// sibling.
fn label_proximity(document: &ListingDocument) -> Vec<String> {
    let mut candidates = Vec::new();

    for label in document.html().select(&SPAN) {
        if !is_label(&element_text(label)) {
            continue;
        }
        let Some(parent) = label.parent().and_then(ElementRef::wrap) else {
            continue;
        };

        let following = parent.next_siblings().filter_map(ElementRef::wrap);
        let preceding = parent.prev_siblings().filter_map(ElementRef::wrap).take(1);

        for sibling in following.chain(preceding) {
            let text = element_text(sibling);
            if text.contains('$') {
                candidates.push(text);
            }
        }
    }

    candidates
}

fn per_sqft_test_id(document: &ListingDocument) -> Vec<String> {
    document
        .html()
        .select(&TESTED_SPAN)
        .filter(|element| attr_contains(*element, "data-testid", "price-per-sqft"))
        .map(element_text)
        .collect()
}

/// `$215/sqft` style phrases anywhere in the visible text
fn inline_text(document: &ListingDocument) -> Vec<String> {
    INLINE_PER_SQFT_RE
        .find_iter(document.visible_text())
        .map(|m| m.as_str().to_string())
        .collect()
}
