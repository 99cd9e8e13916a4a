//! Address strategies

use super::text::element_text;
use super::{ListingDocument, Strategy};
use scraper::Selector;
use std::sync::LazyLock;

static ADDRESS_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1.ds-address-container").expect("Failed to parse address container selector")
});

static ADDRESS_TEST_ID: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"h1[data-testid="bdp-address"]"#)
        .expect("Failed to parse address test id selector")
});

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1").expect("Failed to parse heading selector"));

pub(super) static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "address-container",
        probe: address_container,
    },
    Strategy {
        name: "address-test-id",
        probe: address_test_id,
    },
    Strategy {
        name: "first-heading",
        probe: first_heading,
    },
];

fn select_texts(document: &ListingDocument, selector: &Selector) -> Vec<String> {
    document
        .html()
        .select(selector)
        .map(element_text)
        .collect()
}

fn address_container(document: &ListingDocument) -> Vec<String> {
    select_texts(document, &ADDRESS_CONTAINER)
}

fn address_test_id(document: &ListingDocument) -> Vec<String> {
    select_texts(document, &ADDRESS_TEST_ID)
}

fn first_heading(document: &ListingDocument) -> Vec<String> {
    select_texts(document, &HEADING)
}
