//! HTML parsing: the RDoC tree on the root page and `rdoc-unit` blocks on construct pages.
//!
//! Everything here is synchronous and works on already-fetched HTML.

pub mod features;
pub mod hierarchy;
pub mod tag;

use crate::error::{Result, ScrapeError};
use scraper::node::Node;
use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        css: css.to_string(),
        reason: e.to_string(),
    })
}

/// Text of an element, excluding any nested `ul`/`ol` lists.
pub(crate) fn own_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) if matches!(e.name(), "ul" | "ol") => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    out.push_str(&own_text(child_el));
                }
            }
            _ => {}
        }
    }
    out
}

/// Direct element children of `el` with the given tag name.
pub(crate) fn child_elements<'a>(
    el: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}
