//! Parse `rdoc-unit` content blocks on a construct page.
//!
//! A block is an element with class `rdoc-unit` whose `id` starts with a
//! category name. Its layout is a heading (`h1`..`h6`) as a direct child
//! followed by the body, which is either an element (a list, a paragraph)
//! or bare text. Each non-blank line of the body becomes one item.

use super::{child_elements, selector};
use super::tag::clean_label;
use crate::config::BlockPolicy;
use crate::error::{Result, ScrapeError};
use crate::model::Category;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// One parsed content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureBlock {
    pub category: Category,
    /// Raw `id` attribute of the block.
    pub id: String,
    /// Lowercased line items in page order.
    pub items: Vec<String>,
}

/// Parse every recognized block on a construct page.
///
/// Blocks whose id names no category are ignored. A recognized block that
/// breaks the layout contract fails the page, or is dropped with a warning
/// under [`BlockPolicy::Skip`].
pub fn parse_feature_blocks(html: &str, url: &str, policy: BlockPolicy) -> Result<Vec<FeatureBlock>> {
    let document = Html::parse_document(html);
    let unit_sel = selector(".rdoc-unit[id]")?;

    let mut blocks = Vec::new();
    for unit in document.select(&unit_sel) {
        let id = unit.value().attr("id").unwrap_or_default().to_string();
        let Some(category) = Category::from_block_id(&id) else {
            debug!(%url, %id, "ignoring block with unknown category");
            continue;
        };

        match block_items(unit) {
            Ok(items) => blocks.push(FeatureBlock { category, id, items }),
            Err(reason) => match policy {
                BlockPolicy::Fail => {
                    return Err(ScrapeError::MalformedBlock {
                        url: url.to_string(),
                        id,
                        reason: reason.to_string(),
                    })
                }
                BlockPolicy::Skip => warn!(%url, %id, reason, "skipping malformed block"),
            },
        }
    }

    Ok(blocks)
}

fn block_items(block: ElementRef<'_>) -> std::result::Result<Vec<String>, &'static str> {
    let mut children = block.children().skip_while(|node| !is_heading(node.value()));
    if children.next().is_none() {
        return Err("no heading");
    }

    let mut rest = children.skip_while(|node| is_blank(node.value()));
    let body = rest.next().ok_or("nothing after the heading")?;

    if let Some(el) = ElementRef::wrap(body) {
        if is_heading(body.value()) {
            return Err("heading followed by another heading");
        }
        if el.value().name() != "br" {
            return Ok(element_lines(el));
        }
    }

    // Bare text: runs until the next element other than <br>.
    let mut text = String::new();
    for node in std::iter::once(body).chain(rest) {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            Node::Element(_) => break,
            _ => {}
        }
    }
    Ok(split_lines(&text))
}

/// Items of a body element: its list entries when it has any, otherwise
/// its text split at newlines, `<br>` and paragraph boundaries.
fn element_lines(el: ElementRef<'_>) -> Vec<String> {
    let list = if matches!(el.value().name(), "ul" | "ol") {
        Some(el)
    } else {
        selector("ul, ol")
            .ok()
            .and_then(|sel| el.select(&sel).next())
    };
    if let Some(list) = list {
        let mut items = Vec::new();
        list_items(list, &mut items);
        if !items.is_empty() {
            return items;
        }
    }

    let mut text = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(e) if matches!(e.name(), "br" | "p" | "div") => text.push('\n'),
            _ => {}
        }
    }
    split_lines(&text)
}

/// Flatten a list into items. Each direct `li` contributes its own text
/// (split at `<br>`), followed by the entries of any nested list.
fn list_items(list: ElementRef<'_>, out: &mut Vec<String>) {
    for li in child_elements(list, "li") {
        let mut text = String::new();
        let mut nested = Vec::new();
        item_text(li, &mut text, &mut nested);

        out.extend(split_lines(&text));
        for sub in nested {
            list_items(sub, out);
        }
    }
}

fn item_text<'a>(el: ElementRef<'a>, text: &mut String, nested: &mut Vec<ElementRef<'a>>) {
    for child in el.children() {
        match child.value() {
            // Source line breaks inside an item are layout, not separators.
            Node::Text(t) => text.push_str(&t.replace('\n', " ")),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            Node::Element(e) if matches!(e.name(), "ul" | "ol") => {
                nested.extend(ElementRef::wrap(child));
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    item_text(child_el, text, nested);
                }
            }
            _ => {}
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(clean_label)
        .filter(|line| !line.is_empty())
        .collect()
}

fn is_heading(node: &Node) -> bool {
    matches!(
        node,
        Node::Element(e) if matches!(e.name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    )
}

fn is_blank(node: &Node) -> bool {
    match node {
        Node::Text(t) => t.trim().is_empty(),
        Node::Comment(_) => true,
        _ => false,
    }
}
