//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::compose::{Generation, GenerativeModel};
use crate::{PostcraftError, Result};

/// Public Gemini endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// [`GenerativeModel`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<u16>,
    message: String,
}

impl GeminiClient {
    /// Creates a client for `model`. A leading `models/` is accepted and stripped.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        let model = model.into();
        let model = model.strip_prefix("models/").map(str::to_string).unwrap_or(model);

        Ok(Self { client, api_key: api_key.into(), model, base_url: DEFAULT_API_BASE.to_string() })
    }

    /// Points the client at another endpoint (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn map_error(status: u16, body: &str) -> PostcraftError {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let code = envelope.error.code.unwrap_or(status);
                PostcraftError::ModelError(format!("{code} {}", envelope.error.message))
            }
            Err(_) if body.trim().is_empty() => PostcraftError::ModelError(format!("{status} empty response")),
            Err(_) => PostcraftError::ModelError(format!("{status} {}", body.trim())),
        }
    }

    fn parse_response(body: GenerateResponse) -> Generation {
        let text = body
            .candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect::<String>();

        if !text.is_empty() {
            return Generation::Text(text);
        }

        let reason = body
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .or_else(|| body.candidates.into_iter().find_map(|candidate| candidate.finish_reason));

        Generation::Blocked { reason }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        let request = GenerateRequest { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }] };

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(Self::map_error(status.as_u16(), &text));
        }

        let body: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| PostcraftError::ModelError(format!("invalid response from Gemini: {e}")))?;

        let generation = Self::parse_response(body);
        if let Generation::Blocked { reason } = &generation {
            tracing::info!(reason = ?reason, "Gemini returned no usable output");
        }

        Ok(generation)
    }
}
