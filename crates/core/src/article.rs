//! Records that flow from extraction into composition.
//!
//! [`ArticleData`] is what a successful extraction produces, [`ExtractionError`]
//! what a failed one produces, and [`ManualInput`] what the user types in when
//! extraction fails. The composer only ever reads a title and a body, so both
//! records implement [`PostSource`] and are interchangeable there.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title used when the document exposes none.
pub const NO_TITLE: &str = "No Title Found";
/// Author used when the document exposes none.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Date used when the document exposes none.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Anything a post can be written about.
pub trait PostSource {
    fn title(&self) -> &str;
    fn content(&self) -> &str;
}

/// The result of a successful extraction.
///
/// `content` is never empty: an empty extraction is reported as an
/// [`ExtractionError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleData {
    pub title: String,
    pub author: String,
    pub date: String,
    pub summary: String,
    /// Always empty; present for shape compatibility with downstream consumers.
    pub keywords: Vec<String>,
    pub content: String,
}

impl ArticleData {
    /// Builds an article from extracted content and optional metadata, applying
    /// the sentinel defaults and deriving the summary.
    pub fn new(content: String, title: Option<String>, author: Option<String>, date: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            author: author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            date: date.unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            summary: summarize(&content),
            keywords: Vec::new(),
            content,
        }
    }
}

impl PostSource for ArticleData {
    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Topic and context typed in by the user after extraction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualInput {
    pub title: String,
    pub content: String,
}

impl ManualInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self { title: title.into(), content: content.into() }
    }
}

impl PostSource for ManualInput {
    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Which stage of extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionErrorKind {
    /// Nothing came back from the server.
    Fetch,
    /// A document came back but held no readable text.
    Content,
    /// Anything else.
    Unexpected,
}

/// A failed extraction, carrying the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
    pub kind: ExtractionErrorKind,
    pub message: String,
}

impl ExtractionError {
    pub const FETCH_MESSAGE: &'static str = "Failed to fetch URL. The link might be broken or the server is blocking requests.";
    pub const CONTENT_MESSAGE: &'static str =
        "Failed to extract main content from the page. The page might be heavily JavaScript-based or protected.";

    pub fn fetch() -> Self {
        Self { kind: ExtractionErrorKind::Fetch, message: Self::FETCH_MESSAGE.to_string() }
    }

    pub fn content() -> Self {
        Self { kind: ExtractionErrorKind::Content, message: Self::CONTENT_MESSAGE.to_string() }
    }

    pub fn unexpected(detail: impl fmt::Display) -> Self {
        Self { kind: ExtractionErrorKind::Unexpected, message: format!("An error occurred during scraping: {detail}") }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExtractionError {}

/// First three `.`-separated segments of `content`, joined by single spaces,
/// with a trailing period.
///
/// Splits on every literal period, so abbreviations and decimals cut
/// sentences short. The output is stable across versions and is not meant to
/// be linguistically correct.
pub fn summarize(content: &str) -> String {
    let head = content.split('.').take(3).collect::<Vec<_>>().join(" ");
    format!("{}.", head.trim())
}
