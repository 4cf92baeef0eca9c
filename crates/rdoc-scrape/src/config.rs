//! Run configuration and defaults.

use crate::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root of the RDoC construct pages. Construct tags are appended to it.
pub const DEFAULT_ROOT_URL: &str =
    "https://www.nimh.nih.gov/research/research-funded-by-nimh/rdoc/constructs/";

/// Directory the CSV files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "scraping_output";

/// File name of the hierarchy table inside the output directory.
pub const HIERARCHY_FILE: &str = "rdoc.csv";

pub const USER_AGENT: &str = concat!("rdoc-scrape/", env!("CARGO_PKG_VERSION"));

/// What to do with hierarchy URLs that fail the HEAD pre-flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Do not check links.
    #[default]
    Off,
    /// Drop dead links from the crawl.
    Skip,
    /// Abort the run if any link is dead.
    Fail,
}

/// What to do with an `rdoc-unit` block that does not match the expected layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BlockPolicy {
    #[default]
    Fail,
    Skip,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub root_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Minimum gap between consecutive requests.
    pub min_delay: Duration,
    pub link_policy: LinkPolicy,
    pub block_policy: BlockPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_agent: USER_AGENT.to_string(),
            timeout: None,
            min_delay: Duration::ZERO,
            link_policy: LinkPolicy::Off,
            block_policy: BlockPolicy::Fail,
        }
    }
}

impl ScrapeConfig {
    /// Check the root URL: it must parse as http(s) and end with `/`,
    /// since child URLs are formed by appending tags to it.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.root_url).map_err(|e| ScrapeError::InvalidUrl {
            url: self.root_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl {
                url: self.root_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        if !self.root_url.ends_with('/') {
            return Err(ScrapeError::InvalidUrl {
                url: self.root_url.clone(),
                reason: "root URL must end with '/'".to_string(),
            });
        }
        Ok(())
    }

    pub fn hierarchy_path(&self) -> PathBuf {
        self.output_dir.join(HIERARCHY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScrapeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.link_policy, LinkPolicy::Off);
        assert_eq!(config.block_policy, BlockPolicy::Fail);
        assert!(config.timeout.is_none());
        assert_eq!(
            config.hierarchy_path(),
            PathBuf::from("scraping_output").join("rdoc.csv")
        );
    }

    #[test]
    fn test_root_url_validation() {
        let mut config = ScrapeConfig {
            root_url: "https://example.com/constructs".into(),
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScrapeError::InvalidUrl { .. })
        ));

        config.root_url = "ftp://example.com/constructs/".into();
        assert!(config.validate().is_err());

        config.root_url = "not a url/".into();
        assert!(config.validate().is_err());

        config.root_url = "http://127.0.0.1:8080/constructs/".into();
        assert!(config.validate().is_ok());
    }
}
