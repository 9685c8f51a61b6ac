//! Article extraction entry point.
//!
//! [`Extractor`] runs the whole pipeline for one URL: fetch, preprocess,
//! pick the main content, read metadata and build an [`ArticleData`]. Every
//! failure along the way becomes an [`ExtractionError`] value.
//!
//! # Example
//!
//! ```rust
//! use postcraft_core::{Extractor, ExtractorConfig, FetchConfig};
//!
//! let extractor = Extractor::new(FetchConfig::default()).unwrap();
//! let html = r#"<html><head><title>Hello</title></head>
//!     <body><article><p>Some readable text for the post.</p></article></body></html>"#;
//!
//! let article = extractor.extract_html(html).unwrap();
//! assert_eq!(article.title, "Hello");
//! assert_eq!(article.author, "Unknown Author");
//! ```

use crate::article::{ArticleData, ExtractionError};
use crate::extract::{ExtractConfig, extract_content};
use crate::fetch::{FetchConfig, HtmlSource, HttpFetcher};
use crate::parse::Document;
use crate::preprocess::PreprocessConfig;
use crate::{PostcraftError, Result};

/// Configuration for the [`Extractor`].
///
/// ```rust
/// use postcraft_core::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .min_score(25.0)
///     .char_threshold(300)
///     .build();
/// assert_eq!(config.min_score, 25.0);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Minimum score the best container needs before the whole body is used (default: 20.0).
    pub min_score: f64,

    /// Characters of text a typical article holds; a tenth of it is the minimum
    /// for a block to be scored (default: 500).
    pub char_threshold: usize,

    /// Maximum elements to score (0 = unlimited, default: 1000).
    pub max_elems_to_parse: usize,

    /// Whether to remove elements that look like page chrome (default: true).
    pub remove_unlikely: bool,

    /// Whether to drop tables before extraction (default: true).
    pub remove_tables: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { min_score: 20.0, char_threshold: 500, max_elems_to_parse: 1000, remove_unlikely: true, remove_tables: true }
    }
}

impl ExtractorConfig {
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            min_score_threshold: self.min_score,
            char_threshold: self.char_threshold,
            max_elements: self.max_elems_to_parse,
            ..Default::default()
        }
    }

    fn preprocess_config(&self) -> PreprocessConfig {
        PreprocessConfig { remove_unlikely: self.remove_unlikely, remove_tables: self.remove_tables, ..Default::default() }
    }
}

/// Builder for ExtractorConfig.
#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum score threshold.
    pub fn min_score(mut self, value: f64) -> Self {
        self.config.min_score = value;
        self
    }

    /// Sets the character threshold.
    pub fn char_threshold(mut self, value: usize) -> Self {
        self.config.char_threshold = value;
        self
    }

    /// Sets the maximum elements to score.
    pub fn max_elems_to_parse(mut self, value: usize) -> Self {
        self.config.max_elems_to_parse = value;
        self
    }

    /// Sets whether to remove unlikely candidates.
    pub fn remove_unlikely(mut self, value: bool) -> Self {
        self.config.remove_unlikely = value;
        self
    }

    /// Sets whether to drop tables.
    pub fn remove_tables(mut self, value: bool) -> Self {
        self.config.remove_tables = value;
        self
    }

    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

/// Turns a URL into an [`ArticleData`].
///
/// Generic over the [`HtmlSource`] so tests and callers can substitute the
/// fetching collaborator.
#[derive(Debug, Clone)]
pub struct Extractor<S = HttpFetcher> {
    source: S,
    config: ExtractorConfig,
}

impl Extractor<HttpFetcher> {
    /// Creates an extractor that fetches over HTTP with default extraction settings.
    ///
    /// # Errors
    ///
    /// Returns [`PostcraftError::HttpError`] if the HTTP client cannot be built.
    pub fn new(fetch: FetchConfig) -> Result<Self> {
        Ok(Self::with_source(HttpFetcher::new(fetch)?, ExtractorConfig::default()))
    }
}

impl<S: HtmlSource> Extractor<S> {
    pub fn with_source(source: S, config: ExtractorConfig) -> Self {
        Self { source, config }
    }

    /// Fetches `url` and extracts its article.
    ///
    /// Any fetch failure (bad URL, network error, error status) yields the
    /// fetch message; a page without readable text yields the content
    /// message. Nothing else escapes: remaining errors are wrapped as
    /// "An error occurred during scraping: ...".
    pub async fn extract(&self, url: &str) -> std::result::Result<ArticleData, ExtractionError> {
        tracing::info!(url, "extracting article");

        let html = match self.source.fetch(url).await {
            Ok(html) if !html.trim().is_empty() => html,
            Ok(_) => {
                tracing::warn!(url, "server returned an empty document");
                return Err(ExtractionError::fetch());
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "fetch failed");
                return Err(ExtractionError::fetch());
            }
        };

        self.extract_html(&html)
    }

    /// Runs extraction over already-fetched HTML.
    pub fn extract_html(&self, html: &str) -> std::result::Result<ArticleData, ExtractionError> {
        self.try_extract_html(html).map_err(|e| match e {
            PostcraftError::NoContent => {
                tracing::warn!("no readable content found");
                ExtractionError::content()
            }
            other => {
                tracing::error!(error = %other, "extraction failed");
                ExtractionError::unexpected(other)
            }
        })
    }

    fn try_extract_html(&self, html: &str) -> Result<ArticleData> {
        let raw = Document::parse(html)?;
        let metadata = raw.extract_metadata();
        tracing::debug!(
            title = ?metadata.title,
            author = ?metadata.author,
            date = ?metadata.date,
            site_name = ?metadata.site_name,
            "metadata extracted"
        );

        let doc = Document::parse_with_preprocessing(html, &self.config.preprocess_config())?;
        let extracted = extract_content(&doc, &self.config.extract_config())?;
        tracing::debug!(
            chars = extracted.text.chars().count(),
            score = extracted.top_score,
            elements = extracted.element_count,
            "content extracted"
        );

        Ok(ArticleData::new(extracted.text, metadata.title, metadata.author, metadata.date))
    }
}
