use serde::Serialize;

use crate::article::PostSource;
use crate::compose::{Generation, GenerativeModel, Tone, build_prompt};

/// Shown instead of a post when the model returns nothing usable.
pub const REFUSAL_MESSAGE: &str =
    "The model could not generate a response. This might be due to the content policy. Please try a different topic.";

/// Outcome of one composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum PostOutcome {
    /// The post, whitespace-trimmed.
    Generated(String),
    /// The model declined; carries its reason when it gave one.
    Refused(Option<String>),
    /// The API call failed.
    ApiError(String),
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PostOutcome::Generated(_))
    }

    /// The text a user sees: the post itself, or the matching failure message.
    pub fn into_text(self) -> String {
        match self {
            PostOutcome::Generated(text) => text,
            PostOutcome::Refused(_) => REFUSAL_MESSAGE.to_string(),
            PostOutcome::ApiError(detail) => format!("An error occurred with the Google API: {detail}"),
        }
    }
}

/// Writes posts with a [`GenerativeModel`].
///
/// Never returns an error: refusals and API failures come back as
/// [`PostOutcome`] variants, or as text from [`Composer::compose`].
#[derive(Debug, Clone)]
pub struct Composer<M> {
    model: M,
}

impl<M: GenerativeModel> Composer<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Composes a post and reports how it went.
    pub async fn compose_outcome(&self, source: &impl PostSource, tone: Tone, audience: &str) -> PostOutcome {
        let prompt = build_prompt(source, tone, audience);
        tracing::info!(%tone, title = source.title(), "composing post");

        match self.model.generate(&prompt).await {
            Ok(Generation::Text(text)) if !text.trim().is_empty() => PostOutcome::Generated(text.trim().to_string()),
            Ok(Generation::Text(_)) => {
                tracing::warn!("model returned only whitespace");
                PostOutcome::Refused(None)
            }
            Ok(Generation::Blocked { reason }) => {
                tracing::warn!(reason = ?reason, "model refused to generate");
                PostOutcome::Refused(reason)
            }
            Err(e) => {
                tracing::error!(error = %e, "model call failed");
                PostOutcome::ApiError(e.to_string())
            }
        }
    }

    /// Composes a post as plain text; failures read as messages in place of the post.
    pub async fn compose(&self, source: &impl PostSource, tone: Tone, audience: &str) -> String {
        self.compose_outcome(source, tone, audience).await.into_text()
    }
}
