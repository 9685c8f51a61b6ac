use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{PostcraftError, Result};

/// What a model produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Generated text, as returned by the model.
    Text(String),
    /// The model returned no usable output, usually because of a safety filter.
    Blocked { reason: Option<String> },
}

/// A generative-language model that turns a prompt into text.
///
/// `Err` means the call itself failed (auth, network, quota); a refusal is
/// reported as [`Generation::Blocked`].
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation>;
}

#[async_trait]
impl<M: GenerativeModel + ?Sized> GenerativeModel for Arc<M> {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        (**self).generate(prompt).await
    }
}

/// Scripted model for tests and offline runs.
///
/// Replies are consumed in order; once they run out the default reply is
/// repeated. Every prompt is recorded. Clones share the same script and log.
///
/// ```rust
/// use postcraft_core::{Generation, GenerativeModel, MockModel};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let model = MockModel::new("A post #rust");
///     let reply = model.generate("prompt").await.unwrap();
///     assert_eq!(reply, Generation::Text("A post #rust".to_string()));
///     assert_eq!(model.call_count(), 1);
/// });
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    default_reply: MockReply,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Blocked,
    Error(String),
}

impl MockModel {
    /// Always answers with `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(text.into()))
    }

    /// Always refuses.
    pub fn refusing() -> Self {
        Self::with_default(MockReply::Blocked)
    }

    /// Always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Error(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self { default_reply, replies: Arc::default(), prompts: Arc::default() }
    }

    /// Queue a one-off refusal ahead of the default.
    pub fn push_blocked(&self) {
        self.queue(MockReply::Blocked);
    }

    /// Queue a one-off failure ahead of the default.
    pub fn push_error(&self, message: impl Into<String>) {
        self.queue(MockReply::Error(message.into()));
    }

    fn queue(&self, reply: MockReply) {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).push_back(reply);
    }

    /// Number of prompts received so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent prompt.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).push(prompt.to_string());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(Generation::Text(text)),
            MockReply::Blocked => Ok(Generation::Blocked { reason: Some("SAFETY".to_string()) }),
            MockReply::Error(message) => Err(PostcraftError::ModelError(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_reply() {
        let model = MockModel::new("Test response");
        assert_eq!(model.generate("any prompt").await.unwrap(), Generation::Text("Test response".to_string()));
    }

    #[tokio::test]
    async fn test_mock_queued_replies_then_default() {
        let model = MockModel::new("fallback");
        model.push_blocked();
        model.push_error("quota exceeded");

        assert!(matches!(model.generate("1").await.unwrap(), Generation::Blocked { .. }));
        assert!(matches!(model.generate("2").await, Err(PostcraftError::ModelError(m)) if m == "quota exceeded"));
        assert_eq!(model.generate("3").await.unwrap(), Generation::Text("fallback".to_string()));
    }

    #[tokio::test]
    async fn test_mock_records_prompts() {
        let model = MockModel::refusing();
        let shared = model.clone();

        model.generate("first").await.unwrap();
        model.generate("second").await.unwrap();

        assert_eq!(shared.call_count(), 2);
        assert_eq!(shared.prompts(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(shared.last_prompt().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_arc_model_delegates() {
        let model = Arc::new(MockModel::failing("down"));
        assert!(model.generate("p").await.is_err());
        assert_eq!(model.call_count(), 1);
    }
}
