//! `rdoc-scrape hierarchy`: fetch the tree and write `rdoc.csv` only.

use crate::acquisition::http_client::HttpClient;
use crate::cli::output::{self, Mark, Styled};
use crate::cli::ScrapeArgs;
use crate::model::HierarchyRow;
use crate::pipeline;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::time::Instant;

pub async fn run(args: &ScrapeArgs) -> Result<()> {
    let config = args.to_config();
    config.validate()?;
    let start = Instant::now();

    let client = HttpClient::from_config(&config)?;
    let rows = pipeline::scrape_hierarchy(&client, &config, true)
        .await
        .with_context(|| format!("failed to extract hierarchy from {}", config.root_url))?;
    let path = config.hierarchy_path();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "rows": rows.len(),
            "domains": domain_counts(&rows),
            "path": path,
            "duration_ms": start.elapsed().as_millis(),
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    let s = Styled::new();
    output::print_section(&s, "Domains");
    for (domain, count) in domain_counts(&rows) {
        output::print_line(&s, Mark::Ok, &domain, &format!("{count} entries"));
    }
    output::print_status(
        &s,
        &s.green("done"),
        &format!("{} rows written to {}", rows.len(), path.display()),
    );
    Ok(())
}

/// Rows per domain, sorted by domain tag.
fn domain_counts(rows: &[HierarchyRow]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.domain.clone()).or_default() += 1;
    }
    counts
}
