//! Text helpers shared by the extraction strategies

use scraper::{ElementRef, Html};

/// Elements whose text never reaches the rendered page
const HIDDEN_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "title"];

/// Collapses every run of whitespace into a single space and trims the ends
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the whitespace-collapsed text content of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Returns true if the attribute value contains `needle`, ignoring case
pub fn attr_contains(element: ElementRef<'_>, attr: &str, needle: &str) -> bool {
    element
        .value()
        .attr(attr)
        .map(|value| value.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Returns every visible text node paired with the element that contains it
///
/// Nodes inside non-rendered elements (scripts, styles, the document title)
/// are skipped, as are nodes holding only whitespace. Document order is
/// preserved.
pub fn visible_text_nodes(html: &Html) -> Vec<(ElementRef<'_>, &str)> {
    let mut nodes = Vec::new();

    for node in html.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let text: &str = text;
        if text.trim().is_empty() {
            continue;
        }

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|element| HIDDEN_ELEMENTS.contains(&element.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        if let Some(parent) = node.parent().and_then(ElementRef::wrap) {
            nodes.push((parent, text));
        }
    }

    nodes
}

/// Returns the page's visible text as one whitespace-collapsed string
pub fn visible_text(html: &Html) -> String {
    let parts: Vec<&str> = visible_text_nodes(html)
        .into_iter()
        .map(|(_, text)| text)
        .collect();
    collapse_whitespace(&parts.join(" "))
}
