//! Price strategies

use super::text::{attr_contains, element_text};
use super::{ListingDocument, Strategy};
use scraper::Selector;
use std::sync::LazyLock;

static PRICE_TEST_ID: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"span[data-testid="price"]"#).expect("Failed to parse price selector")
});

static CLASSED_SPAN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span[class]").expect("Failed to parse span selector"));

static CLASSED_DIV: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[class]").expect("Failed to parse div selector"));

pub(super) static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "price-test-id",
        probe: price_test_id,
    },
    Strategy {
        name: "price-class-span",
        probe: price_class_span,
    },
    Strategy {
        name: "price-class-div",
        probe: price_class_div,
    },
    Strategy {
        name: "dollar-token",
        probe: dollar_token,
    },
];

fn price_test_id(document: &ListingDocument) -> Vec<String> {
    document
        .html()
        .select(&PRICE_TEST_ID)
        .map(element_text)
        .collect()
}

fn with_price_class(document: &ListingDocument, selector: &Selector) -> Vec<String> {
    document
        .html()
        .select(selector)
        .filter(|element| attr_contains(*element, "class", "price"))
        .map(element_text)
        .collect()
}

fn price_class_span(document: &ListingDocument) -> Vec<String> {
    with_price_class(document, &CLASSED_SPAN)
}

fn price_class_div(document: &ListingDocument) -> Vec<String> {
    with_price_class(document, &CLASSED_DIV)
}

/// `$`-prefixed words with a thousands separator, e.g. `$450,000`
fn dollar_token(document: &ListingDocument) -> Vec<String> {
    document
        .visible_text()
        .split_whitespace()
        .filter(|word| word.starts_with('$') && word.contains(','))
        .map(|word| {
            word.trim_end_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | ')'))
                .to_string()
        })
        .collect()
}
