//! Environment-driven settings.
//!
//! | Variable            | Meaning                                              |
//! |---------------------|------------------------------------------------------|
//! | `LLM_API_KEY`       | Gemini API key (required)                            |
//! | `GEMINI_MODEL_NAME` | Model to call, default [`DEFAULT_MODEL_NAME`]         |
//! | `LLM_MODEL`         | Read and kept, not used by any flow                  |
//! | `GEMINI_API_BASE`   | Endpoint override, default [`DEFAULT_API_BASE`]       |
//!
//! Loading `.env` files is the binary's job; this module only reads variables.

use crate::compose::{DEFAULT_API_BASE, GeminiClient};
use crate::fetch::FetchConfig;
use crate::{PostcraftError, Result};

pub const API_KEY_VAR: &str = "LLM_API_KEY";
pub const MODEL_NAME_VAR: &str = "GEMINI_MODEL_NAME";
pub const RESERVED_MODEL_VAR: &str = "LLM_MODEL";
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";

pub const MISSING_API_KEY_MESSAGE: &str = "Google API Key not found. Please set LLM_API_KEY in your .env file.";

/// Runtime settings for one process.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model_name: String,
    /// Value of `LLM_MODEL`. Nothing reads it; kept so it shows up in diagnostics.
    pub reserved_model: Option<String>,
    pub api_base_url: String,
    pub fetch: FetchConfig,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PostcraftError::MissingConfig`] when `LLM_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = read(API_KEY_VAR).ok_or_else(|| PostcraftError::MissingConfig(MISSING_API_KEY_MESSAGE.to_string()))?;

        let model_name = read(MODEL_NAME_VAR).unwrap_or_else(|| {
            tracing::warn!(default = DEFAULT_MODEL_NAME, "{MODEL_NAME_VAR} is not set, using the default model");
            DEFAULT_MODEL_NAME.to_string()
        });

        let reserved_model = read(RESERVED_MODEL_VAR);
        if let Some(reserved) = &reserved_model {
            tracing::debug!(value = %reserved, "{RESERVED_MODEL_VAR} is set but not used");
        }

        let api_base_url = read(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self { api_key, model_name, reserved_model, api_base_url, fetch: FetchConfig::default() })
    }

    /// Builds the Gemini client these settings describe.
    pub fn gemini_client(&self) -> Result<GeminiClient> {
        Ok(GeminiClient::new(&self.api_key, &self.model_name)?.with_base_url(&self.api_base_url))
    }
}
