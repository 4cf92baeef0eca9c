//! Thin HTTP client over `reqwest` with a request throttle.

use super::throttle::Throttle;
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use tracing::debug;

/// HTTP client shared by every pipeline stage.
///
/// Page fetches follow redirects. Link checks do not: a HEAD answered with a
/// 3xx reports that status.
pub struct HttpClient {
    client: reqwest::Client,
    head_client: reqwest::Client,
    throttle: Throttle,
}

impl HttpClient {
    /// Build a client from the run configuration: user agent, optional
    /// timeout and minimum delay between requests.
    pub fn from_config(config: &ScrapeConfig) -> Result<Self> {
        let builder = || {
            let builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
            match config.timeout {
                Some(timeout) => builder.timeout(timeout),
                None => builder,
            }
        };
        let client = builder().build().map_err(ScrapeError::ClientBuild)?;
        let head_client = builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ScrapeError::ClientBuild)?;

        Ok(Self {
            client,
            head_client,
            throttle: Throttle::new(config.min_delay),
        })
    }

    /// GET `url` and return the body. Any non-success status is an error.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.throttle.wait().await;
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| http_error(url, source))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| http_error(url, source))
    }

    /// HEAD `url` and return the status code, without following redirects.
    pub async fn head_status(&self, url: &str) -> Result<u16> {
        self.throttle.wait().await;
        debug!(%url, "HEAD");

        let resp = self
            .head_client
            .head(url)
            .send()
            .await
            .map_err(|source| http_error(url, source))?;
        Ok(resp.status().as_u16())
    }
}

fn http_error(url: &str, source: reqwest::Error) -> ScrapeError {
    ScrapeError::Http {
        url: url.to_string(),
        source,
    }
}
