//! `rdoc-scrape scrape`: run the full pipeline.

use crate::cli::output::{self, Mark, Styled};
use crate::cli::ScrapeArgs;
use crate::pipeline::{self, RunSummary};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};

/// Run the scrape command.
pub async fn run(args: &ScrapeArgs) -> Result<()> {
    let config = args.to_config();
    let start = Instant::now();

    if !output::is_quiet() && !output::is_json() {
        output::print_header(&Styled::new());
        eprintln!("  Scraping {}", config.root_url);
        eprintln!();
    }

    let progress = output::page_progress();
    let summary = pipeline::run(&config, &progress)
        .await
        .with_context(|| format!("scrape of {} failed", config.root_url))?;

    report(&summary, start.elapsed());
    Ok(())
}

/// Print a run summary in the selected output mode.
pub(crate) fn report(summary: &RunSummary, elapsed: Duration) {
    if output::is_json() {
        let mut value = serde_json::to_value(summary).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert("duration_ms".into(), serde_json::json!(elapsed.as_millis()));
        }
        output::print_json(&value);
        return;
    }
    if output::is_quiet() {
        return;
    }

    let s = Styled::new();
    output::print_section(&s, "Hierarchy");
    output::print_line(&s, Mark::Ok, "rows", &summary.hierarchy_rows.to_string());
    output::print_line(&s, Mark::Ok, "pages crawled", &summary.pages_crawled.to_string());
    if summary.links_skipped > 0 {
        output::print_line(
            &s,
            Mark::Warn,
            "dead links",
            &format!("{} skipped", summary.links_skipped),
        );
    }
    eprintln!();

    output::print_section(&s, "Matrices");
    for m in &summary.matrices {
        let mark = if m.constructs > 0 { Mark::Ok } else { Mark::Warn };
        output::print_line(
            &s,
            mark,
            m.category.name(),
            &format!("{} terms x {} constructs", m.terms, m.constructs),
        );
    }

    output::print_status(
        &s,
        &s.green("done"),
        &format!(
            "{} files in {}",
            summary.files.len(),
            output::format_duration(elapsed)
        ),
    );
}
