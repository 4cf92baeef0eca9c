//! Fetching stages: the root tree page and every construct page.

use crate::acquisition::http_client::HttpClient;
use crate::config::BlockPolicy;
use crate::error::Result;
use crate::extraction::features::parse_feature_blocks;
use crate::extraction::hierarchy::parse_hierarchy;
use crate::model::{ConstructFeatureSet, HierarchyRow};
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

/// Fetch the root page and parse its tree into hierarchy rows.
pub async fn extract_hierarchy(client: &HttpClient, root_url: &str) -> Result<Vec<HierarchyRow>> {
    info!(%root_url, "fetching RDoC tree");
    let html = client.get_text(root_url).await?;
    let rows = parse_hierarchy(&html, root_url)?;
    info!(rows = rows.len(), "hierarchy extracted");
    Ok(rows)
}

/// Visit every row URL once and collect its content blocks.
///
/// Items are stored under the slug of the row URL. Pages are fetched in row
/// order; a repeated URL is not fetched again. `progress` advances once per
/// fetched page.
pub async fn crawl_features(
    client: &HttpClient,
    rows: &[HierarchyRow],
    policy: BlockPolicy,
    progress: &ProgressBar,
) -> Result<ConstructFeatureSet> {
    let mut features = ConstructFeatureSet::new();
    let mut visited = HashSet::new();

    let total = rows.iter().map(|r| r.url.as_str()).collect::<HashSet<_>>().len();
    progress.set_length(total as u64);

    for row in rows {
        if !visited.insert(row.url.as_str()) {
            debug!(url = %row.url, "already crawled");
            continue;
        }

        let slug = row.slug();
        debug!(%slug, page = visited.len(), total, "parsing construct page");
        progress.set_message(slug.to_string());

        let html = client.get_text(&row.url).await?;
        let blocks = parse_feature_blocks(&html, &row.url, policy)?;
        debug!(%slug, blocks = blocks.len(), "content blocks");

        for block in blocks {
            features.insert(block.category, slug, block.items);
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(features)
}
