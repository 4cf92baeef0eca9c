//! `rdoc-scrape check-links`: HEAD every construct URL and report dead ones.

use crate::acquisition::http_client::HttpClient;
use crate::acquisition::link_check::{dead_links, scan_links};
use crate::cli::output::{self, Mark, Styled};
use crate::cli::ScrapeArgs;
use crate::{crawler, export};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Check links from `hierarchy` when given (or when `rdoc.csv` exists in the
/// output directory), otherwise from a fresh parse of the tree.
/// Exits with an error when any link is dead.
pub async fn run(args: &ScrapeArgs, hierarchy: Option<PathBuf>) -> Result<()> {
    let config = args.to_config();
    config.validate()?;
    let client = HttpClient::from_config(&config)?;

    let existing = hierarchy.or_else(|| {
        let path = config.hierarchy_path();
        path.exists().then_some(path)
    });
    let rows = match existing {
        Some(path) => export::read_hierarchy(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => crawler::extract_hierarchy(&client, &config.root_url).await?,
    };

    let urls: Vec<String> = rows.into_iter().map(|r| r.url).collect();
    let results = scan_links(&client, &urls).await;
    let dead = dead_links(&results);

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "checked": results.len(),
            "dead": dead,
            "results": results,
        }));
    } else if !output::is_quiet() {
        let s = Styled::new();
        output::print_section(&s, "Links");
        for r in results.iter().filter(|r| !r.is_alive()) {
            output::print_line(&s, Mark::Dead, &r.status.to_string(), &r.url);
        }
        let status = if dead.is_empty() {
            s.green("ok")
        } else {
            s.red("dead links")
        };
        output::print_status(
            &s,
            &status,
            &format!("{} of {} reachable", results.len() - dead.len(), results.len()),
        );
    }

    if !dead.is_empty() {
        anyhow::bail!("{} dead link(s)", dead.len());
    }
    Ok(())
}
