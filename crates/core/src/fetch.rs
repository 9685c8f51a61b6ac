//! Content fetching from URLs and files.
//!
//! [`HtmlSource`] is the seam the [`crate::Extractor`] fetches through; the
//! default [`HttpFetcher`] performs a single GET with reqwest, no retries.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{PostcraftError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Postcraft/0.1; +https://github.com/postcraft/postcraft)".to_string(),
        }
    }
}

/// Something that can turn a URL into raw HTML.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    /// Retrieve the document at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`HtmlSource`] backed by a reusable reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(PostcraftError::HttpError)?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl HtmlSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let parsed_url = Url::parse(url).map_err(|e| PostcraftError::InvalidUrl(e.to_string()))?;

        if !matches!(parsed_url.scheme(), "http" | "https") {
            return Err(PostcraftError::InvalidUrl(
                "URL must use the http:// or https:// scheme".to_string(),
            ));
        }

        tracing::debug!(url = %parsed_url, timeout = self.config.timeout, "fetching document");

        let response = self
            .client
            .get(parsed_url)
            .header("User-Agent", &self.config.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PostcraftError::Timeout { timeout: self.config.timeout }
                } else {
                    PostcraftError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostcraftError::HttpStatus { status: status.as_u16() });
        }

        let content = response.text().await?;
        tracing::debug!(bytes = content.len(), "document fetched");

        Ok(content)
    }
}

/// Fetches HTML content from a URL with a one-off client.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    HttpFetcher::new(config.clone())?.fetch(url).await
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(PostcraftError::WriteError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path_buf.display()),
        )))
    } else {
        fs::read_to_string(&path_buf).map_err(PostcraftError::from)
    }
}
