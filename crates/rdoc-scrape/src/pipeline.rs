//! The four stages wired together: hierarchy, features, vocabulary, matrices.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::link_check;
use crate::config::ScrapeConfig;
use crate::crawler;
use crate::error::Result;
use crate::export;
use crate::matrix::{build_matrices, build_vocabulary, FeatureMatrix, Vocabulary};
use crate::model::{Category, ConstructFeatureSet, HierarchyRow};
use indicatif::ProgressBar;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-category outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixSummary {
    pub category: Category,
    pub terms: usize,
    pub constructs: usize,
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub hierarchy_rows: usize,
    pub pages_crawled: usize,
    pub links_skipped: usize,
    pub matrices: Vec<MatrixSummary>,
    pub files: Vec<PathBuf>,
}

/// Stage 1: fetch the tree and optionally write `rdoc.csv`.
pub async fn scrape_hierarchy(
    client: &HttpClient,
    config: &ScrapeConfig,
    write: bool,
) -> Result<Vec<HierarchyRow>> {
    let rows = crawler::extract_hierarchy(client, &config.root_url).await?;
    if write {
        export::write_hierarchy(&config.hierarchy_path(), &rows)?;
    }
    Ok(rows)
}

/// Stage 4: build every category matrix and write one file per category.
pub fn create_matrices(
    features: &ConstructFeatureSet,
    vocabulary: &Vocabulary,
    output_dir: &Path,
) -> Result<(Vec<FeatureMatrix>, Vec<PathBuf>)> {
    let matrices = build_matrices(features, vocabulary);
    let files = export::write_matrices(output_dir, &matrices)?;
    Ok((matrices, files))
}

/// Stages 2-4 over existing hierarchy rows, with the link pre-flight first.
pub async fn build_from_rows(
    client: &HttpClient,
    config: &ScrapeConfig,
    rows: Vec<HierarchyRow>,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    let hierarchy_rows = rows.len();
    let before = distinct_urls(&rows);
    let rows = link_check::preflight(client, rows, config.link_policy).await?;
    let pages_crawled = distinct_urls(&rows);

    info!("parsing construct features");
    let features = crawler::crawl_features(client, &rows, config.block_policy, progress).await?;

    let vocabulary = build_vocabulary(&features);
    info!(terms = vocabulary.total_terms(), "vocabularies built");

    let (matrices, files) = create_matrices(&features, &vocabulary, &config.output_dir)?;

    Ok(RunSummary {
        hierarchy_rows,
        pages_crawled,
        links_skipped: before - pages_crawled,
        matrices: matrices
            .iter()
            .map(|m| MatrixSummary {
                category: m.category,
                terms: m.vals.len(),
                constructs: m.columns.len(),
            })
            .collect(),
        files,
    })
}

/// Full run: scrape the tree, write `rdoc.csv`, crawl and write matrices.
pub async fn run(config: &ScrapeConfig, progress: &ProgressBar) -> Result<RunSummary> {
    config.validate()?;
    let client = HttpClient::from_config(config)?;

    let rows = scrape_hierarchy(&client, config, true).await?;
    let mut summary = build_from_rows(&client, config, rows, progress).await?;
    summary.files.insert(0, config.hierarchy_path());
    Ok(summary)
}

/// Stages 2-4 from a previously written `rdoc.csv`.
pub async fn run_from_hierarchy(
    config: &ScrapeConfig,
    hierarchy: &Path,
    progress: &ProgressBar,
) -> Result<RunSummary> {
    config.validate()?;
    let client = HttpClient::from_config(config)?;
    let rows = export::read_hierarchy(hierarchy)?;
    info!(path = %hierarchy.display(), rows = rows.len(), "loaded hierarchy");
    build_from_rows(&client, config, rows, progress).await
}

fn distinct_urls(rows: &[HierarchyRow]) -> usize {
    rows.iter().map(|r| r.url.as_str()).collect::<HashSet<_>>().len()
}
