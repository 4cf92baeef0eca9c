//! Scrape the NIMH RDoC construct taxonomy into a hierarchy table and
//! per-category binary feature matrices.
//!
//! The pipeline runs four stages in sequence:
//!
//! 1. [`crawler::extract_hierarchy`] parses the tree on the root page into
//!    [`model::HierarchyRow`]s.
//! 2. [`crawler::crawl_features`] visits each construct page and collects its
//!    `rdoc-unit` blocks into a [`model::ConstructFeatureSet`].
//! 3. [`matrix::build_vocabulary`] gathers the distinct items per category.
//! 4. [`matrix::build_matrices`] turns both into 0/1 tables, written by
//!    [`export`].
//!
//! [`pipeline::run`] wires them together.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod export;
pub mod extraction;
pub mod matrix;
pub mod model;
pub mod pipeline;

pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
