//! Days-on-market strategies

use super::text::{attr_contains, element_text, visible_text_nodes};
use super::{ListingDocument, Strategy};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Phrases that sit next to the days count, most specific first
const KEYWORDS: [&str; 4] = ["time on zillow", "days on zillow", "on zillow", "days on market"];

/// Units that mean a number is not a day count
const OTHER_TIME_UNITS: [&str; 5] = ["hour", "minute", "week", "month", "year"];

static TESTED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[data-testid]").expect("Failed to parse test id selector")
});

static INLINE_DAYS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d[\d,]*)\s+days?\s+on\s+(?:zillow|market)\b")
        .expect("Failed to compile inline days regex")
});

pub(super) static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "days-keyword-proximity",
        probe: keyword_proximity,
    },
    Strategy {
        name: "days-test-id",
        probe: days_test_id,
    },
    Strategy {
        name: "days-inline-text",
        probe: inline_text,
    },
];

fn is_count(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == ',')
}

/// Day counts in a short piece of text
///
/// A number followed by a `day` word comes first. Bare numbers follow, unless
/// the next word names a different time unit ("3 hours").
fn day_counts(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| matches!(c, ':' | ';' | '(' | ')' | '.'))
                .trim_end_matches(',')
                .to_lowercase()
        })
        .collect();

    let mut with_unit = Vec::new();
    let mut bare = Vec::new();

    for (index, word) in words.iter().enumerate() {
        if !is_count(word) {
            continue;
        }
        match words.get(index + 1) {
            Some(next) if next.starts_with("day") => with_unit.push(format!("{} days", word)),
            Some(next) if OTHER_TIME_UNITS.iter().any(|unit| next.starts_with(unit)) => {}
            _ => bare.push(word.clone()),
        }
    }

    with_unit.extend(bare);
    with_unit
}

/// Numbers in the element holding a "... on Zillow" / "days on market" phrase
fn keyword_proximity(document: &ListingDocument) -> Vec<String> {
    let nodes = visible_text_nodes(document.html());
    let mut candidates = Vec::new();

    for keyword in KEYWORDS {
        for (parent, text) in &nodes {
            if text.to_lowercase().contains(keyword) {
                candidates.extend(day_counts(&element_text(*parent)));
            }
        }
    }

    candidates
}

fn days_test_id(document: &ListingDocument) -> Vec<String> {
    document
        .html()
        .select(&TESTED)
        .filter(|element| {
            attr_contains(*element, "data-testid", "days-on")
                || attr_contains(*element, "data-testid", "time-on")
        })
        .flat_map(|element| day_counts(&element_text(element)))
        .collect()
}

/// `12 days on Zillow` style phrases anywhere in the visible text
fn inline_text(document: &ListingDocument) -> Vec<String> {
    INLINE_DAYS_RE
        .captures_iter(document.visible_text())
        .filter_map(|captures| captures.get(1))
        .map(|count| format!("{} days", count.as_str()))
        .collect()
}
