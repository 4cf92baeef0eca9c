//! Parse the `rdoc-tree` navigation widget into hierarchy rows.
//!
//! The widget is a nested list: each top-level `li` is a domain, and every
//! `li` nested under it is either a construct (label starting with `con`)
//! or a subconstruct of the most recent construct.

use super::tag::{clean_label, normalize_tag};
use super::{child_elements, own_text, selector};
use crate::error::{Result, ScrapeError};
use crate::model::{HierarchyRow, NO_SUBCONSTRUCT};
use scraper::Html;
use tracing::{debug, info};

/// Parse the root page HTML. `root_url` is both the page address used in
/// error messages and the prefix for every row URL.
pub fn parse_hierarchy(html: &str, root_url: &str) -> Result<Vec<HierarchyRow>> {
    let document = Html::parse_document(html);

    let tree_sel = selector("section.rdoc-tree")?;
    let list_sel = selector("ul")?;
    let item_sel = selector("li")?;

    let tree = document
        .select(&tree_sel)
        .next()
        .ok_or_else(|| missing(root_url, "section.rdoc-tree"))?;
    let list = tree
        .select(&list_sel)
        .next()
        .ok_or_else(|| missing(root_url, "ul inside section.rdoc-tree"))?;

    let mut rows = Vec::new();

    for domain_el in child_elements(list, "li") {
        let domain_label = clean_label(&own_text(domain_el));
        if domain_label.is_empty() {
            return Err(missing(root_url, "a label on every domain entry"));
        }
        let domain = normalize_tag(&domain_label);
        info!(domain = %domain, "parsing RDoC domain");

        let mut construct: Option<String> = None;

        for item in domain_el
            .select(&item_sel)
            .filter(|item| *item != domain_el)
        {
            let label = clean_label(&own_text(item));
            if label.is_empty() {
                debug!(domain = %domain, "skipping unlabeled tree item");
                continue;
            }

            let tag = normalize_tag(&label);
            let (construct_tag, subconstruct) = if label.starts_with("con") {
                construct = Some(tag.clone());
                (tag, None)
            } else {
                let current = construct.clone().ok_or_else(|| ScrapeError::OrphanSubconstruct {
                    domain: domain.clone(),
                    label: label.clone(),
                })?;
                (current, Some(tag))
            };

            let url = format!(
                "{root_url}{}",
                subconstruct.as_deref().unwrap_or(&construct_tag)
            );
            debug!(%url, "tree item");

            rows.push(HierarchyRow {
                domain: domain.clone(),
                construct: construct_tag,
                subconstruct: subconstruct.unwrap_or_else(|| NO_SUBCONSTRUCT.to_string()),
                url,
            });
        }
    }

    Ok(rows)
}

fn missing(url: &str, what: &str) -> ScrapeError {
    ScrapeError::MissingElement {
        url: url.to_string(),
        what: what.to_string(),
    }
}
