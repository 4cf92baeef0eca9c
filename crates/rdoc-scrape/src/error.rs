//! Error types for the scraping pipeline.

use thiserror::Error;

/// Errors raised by any pipeline stage.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid selector {css:?}: {reason}")]
    InvalidSelector { css: String, reason: String },

    #[error("{url}: expected {what}")]
    MissingElement { url: String, what: String },

    #[error("{url}: block {id} is malformed: {reason}")]
    MalformedBlock {
        url: String,
        id: String,
        reason: String,
    },

    #[error("domain {domain}: subconstruct {label:?} appears before any construct")]
    OrphanSubconstruct { domain: String, label: String },

    #[error("{} dead link(s): {}", .0.len(), .0.join(", "))]
    DeadLinks(Vec<String>),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
