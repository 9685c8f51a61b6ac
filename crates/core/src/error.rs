//! Error types for Postcraft operations.
//!
//! [`PostcraftError`] covers everything that can go wrong internally while
//! fetching, parsing, extracting or talking to the generative model. The two
//! user-facing boundaries ([`crate::Extractor::extract`] and
//! [`crate::Composer::compose`]) never return it directly: they fold it into
//! an [`crate::ExtractionError`] value or a soft-failure string.
//!
//! # Example
//!
//! ```rust
//! use postcraft_core::{PostcraftError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.trim().is_empty() {
//!         return Err(PostcraftError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use thiserror::Error;

/// Main error type for extraction and composition internals.
#[derive(Error, Debug)]
pub enum PostcraftError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection resets and body decoding problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Server answered with a non-success status code.
    #[error("Server responded with status {status}")]
    HttpStatus { status: u16 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No readable text could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// A required configuration value is absent. Carries the message shown to the user.
    #[error("{0}")]
    MissingConfig(String),

    /// The generative model API rejected or failed the request.
    #[error("{0}")]
    ModelError(String),

    /// File read/write errors.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),
}

/// Result type alias for PostcraftError.
pub type Result<T> = std::result::Result<T, PostcraftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostcraftError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = PostcraftError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_status_error() {
        let err = PostcraftError::HttpStatus { status: 403 };
        assert_eq!(err.to_string(), "Server responded with status 403");
    }

    #[test]
    fn test_model_error_is_verbatim() {
        let err = PostcraftError::ModelError("API key not valid".to_string());
        assert_eq!(err.to_string(), "API key not valid");
    }
}
