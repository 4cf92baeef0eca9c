//! `rdoc-scrape matrices`: crawl and build matrices from an existing `rdoc.csv`.

use crate::cli::output;
use crate::cli::scrape_cmd::report;
use crate::cli::ScrapeArgs;
use crate::pipeline;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Instant;

pub async fn run(args: &ScrapeArgs, hierarchy: Option<PathBuf>) -> Result<()> {
    let config = args.to_config();
    let path = hierarchy.unwrap_or_else(|| config.hierarchy_path());
    if !path.exists() {
        bail!(
            "{} not found; run `rdoc-scrape hierarchy` first or pass --hierarchy",
            path.display()
        );
    }

    let start = Instant::now();
    let progress = output::page_progress();
    let summary = pipeline::run_from_hierarchy(&config, &path, &progress)
        .await
        .with_context(|| format!("failed to build matrices from {}", path.display()))?;

    report(&summary, start.elapsed());
    Ok(())
}
