//! CLI subcommand implementations for the `rdoc-scrape` binary.

pub mod check_cmd;
pub mod hierarchy_cmd;
pub mod matrices_cmd;
pub mod output;
pub mod scrape_cmd;

use crate::config::{
    BlockPolicy, LinkPolicy, ScrapeConfig, DEFAULT_OUTPUT_DIR, DEFAULT_ROOT_URL, USER_AGENT,
};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct ScrapeArgs {
    /// Root of the construct pages; tags are appended to it.
    #[arg(long, default_value = DEFAULT_ROOT_URL)]
    pub root_url: String,

    /// Directory for rdoc.csv and the category matrices.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Per-request timeout in milliseconds (no timeout when omitted).
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Minimum milliseconds between consecutive requests.
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// HEAD pre-flight over construct URLs before crawling.
    #[arg(long, value_enum, default_value_t = LinkPolicy::Off)]
    pub check_links: LinkPolicy,

    /// What to do with content blocks that do not match the expected layout.
    #[arg(long, value_enum, default_value_t = BlockPolicy::Fail)]
    pub on_malformed: BlockPolicy,

    #[arg(long, default_value = USER_AGENT)]
    pub user_agent: String,
}

impl ScrapeArgs {
    pub fn to_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            root_url: self.root_url.clone(),
            output_dir: self.output.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_ms.map(Duration::from_millis),
            min_delay: Duration::from_millis(self.delay_ms),
            link_policy: self.check_links,
            block_policy: self.on_malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ScrapeArgs,
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let harness = Harness::try_parse_from(["rdoc-scrape"]).unwrap();
        let config = harness.args.to_config();
        let default = ScrapeConfig::default();

        assert_eq!(config.root_url, default.root_url);
        assert_eq!(config.output_dir, default.output_dir);
        assert_eq!(config.timeout, None);
        assert_eq!(config.min_delay, Duration::ZERO);
        assert_eq!(config.link_policy, LinkPolicy::Off);
        assert_eq!(config.block_policy, BlockPolicy::Fail);
    }

    #[test]
    fn test_overrides() {
        let harness = Harness::try_parse_from([
            "rdoc-scrape",
            "--root-url",
            "http://localhost:9000/constructs/",
            "-o",
            "/tmp/out",
            "--timeout-ms",
            "2500",
            "--delay-ms",
            "100",
            "--check-links",
            "skip",
            "--on-malformed",
            "skip",
        ])
        .unwrap();
        let config = harness.args.to_config();

        assert_eq!(config.root_url, "http://localhost:9000/constructs/");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.min_delay, Duration::from_millis(100));
        assert_eq!(config.link_policy, LinkPolicy::Skip);
        assert_eq!(config.block_policy, BlockPolicy::Skip);
    }
}
