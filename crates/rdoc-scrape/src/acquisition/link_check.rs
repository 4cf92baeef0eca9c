//! HEAD pre-flight over hierarchy URLs.
//!
//! Determines which construct pages are reachable before the feature crawl,
//! without downloading bodies. What happens to dead links is decided by
//! [`LinkPolicy`].

use super::http_client::HttpClient;
use crate::config::LinkPolicy;
use crate::error::{Result, ScrapeError};
use crate::model::HierarchyRow;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Result of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStatus {
    pub url: String,
    /// HTTP status code (0 if the request failed).
    pub status: u16,
}

impl LinkStatus {
    pub fn is_alive(&self) -> bool {
        self.status == 200
    }
}

/// `true` iff a HEAD request to `url` answers 200.
pub async fn validate_url(client: &HttpClient, url: &str) -> bool {
    matches!(client.head_status(url).await, Ok(200))
}

/// Check each distinct URL once, in order of first appearance.
pub async fn scan_links(client: &HttpClient, urls: &[String]) -> Vec<LinkStatus> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for url in urls {
        if !seen.insert(url.as_str()) {
            continue;
        }
        let status = match client.head_status(url).await {
            Ok(status) => status,
            Err(e) => {
                warn!(%url, error = %e, "HEAD request failed");
                0
            }
        };
        results.push(LinkStatus {
            url: url.clone(),
            status,
        });
    }

    results
}

/// URLs that did not answer 200.
pub fn dead_links(results: &[LinkStatus]) -> Vec<String> {
    results
        .iter()
        .filter(|r| !r.is_alive())
        .map(|r| r.url.clone())
        .collect()
}

/// Run the pre-flight over `rows` and apply `policy` to the dead links.
pub async fn preflight(
    client: &HttpClient,
    rows: Vec<HierarchyRow>,
    policy: LinkPolicy,
) -> Result<Vec<HierarchyRow>> {
    if policy == LinkPolicy::Off {
        return Ok(rows);
    }

    let urls: Vec<String> = rows.iter().map(|r| r.url.clone()).collect();
    let results = scan_links(client, &urls).await;
    let dead = dead_links(&results);
    info!(checked = results.len(), dead = dead.len(), "link pre-flight done");

    apply_policy(rows, dead, policy)
}

fn apply_policy(
    rows: Vec<HierarchyRow>,
    dead: Vec<String>,
    policy: LinkPolicy,
) -> Result<Vec<HierarchyRow>> {
    if dead.is_empty() {
        return Ok(rows);
    }
    match policy {
        LinkPolicy::Off => Ok(rows),
        LinkPolicy::Fail => Err(ScrapeError::DeadLinks(dead)),
        LinkPolicy::Skip => {
            for url in &dead {
                warn!(%url, "skipping dead link");
            }
            let dead: HashSet<String> = dead.into_iter().collect();
            Ok(rows.into_iter().filter(|r| !dead.contains(&r.url)).collect())
        }
    }
}
