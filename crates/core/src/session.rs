//! Interaction controller.
//!
//! A session is either waiting for a URL or, after extraction failed, waiting
//! for a manually typed topic and context. [`SessionState::transition`] is the
//! pure state machine; [`Controller`] drives it from form submissions and
//! tells the surface what to show through [`Render`].
//!
//! ```text
//!                ExtractionFailed(msg)
//!  AwaitingUrl ─────────────────────────▶ AwaitingManualInput { msg }
//!       ▲                                         │
//!       └─────────── ManualPostGenerated ─────────┘
//! ```

use crate::article::ManualInput;
use crate::compose::{Composer, GenerativeModel, PostOutcome, Tone};
use crate::extractor::Extractor;
use crate::fetch::HtmlSource;

pub const EMPTY_URL_WARNING: &str = "Please enter a URL.";
pub const MISSING_MANUAL_FIELDS_WARNING: &str = "Please provide both a topic and context.";
pub const MANUAL_INPUT_PENDING_WARNING: &str = "Scraping failed. Please provide the topic and context below.";
pub const NO_MANUAL_INPUT_WARNING: &str = "Manual input is only needed after a URL fails to scrape.";

/// Where the session is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    AwaitingUrl,
    /// Extraction failed; `error_message` is shown above the manual form.
    AwaitingManualInput { error_message: String },
}

/// Something that moves the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ExtractionFailed(String),
    ManualPostGenerated,
}

impl SessionState {
    /// Next state after `event`. Events that do not apply leave the state unchanged.
    pub fn transition(self, event: SessionEvent) -> SessionState {
        match (self, event) {
            (SessionState::AwaitingUrl, SessionEvent::ExtractionFailed(error_message)) => {
                SessionState::AwaitingManualInput { error_message }
            }
            (SessionState::AwaitingManualInput { .. }, SessionEvent::ManualPostGenerated) => SessionState::AwaitingUrl,
            (state, _) => state,
        }
    }

    pub fn is_awaiting_manual_input(&self) -> bool {
        matches!(self, SessionState::AwaitingManualInput { .. })
    }
}

/// What the surface should show after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// Input was rejected; nothing was called and the state is unchanged.
    Warning(String),
    /// Extraction failed; show the error and the manual form.
    Fallback { error_message: String },
    /// A composed post, or the soft-failure text in its place.
    Post { text: String, success: bool },
}

impl Render {
    fn post(outcome: PostOutcome) -> Self {
        let success = outcome.is_success();
        Render::Post { text: outcome.into_text(), success }
    }
}

/// Drives one interactive session.
#[derive(Debug)]
pub struct Controller<S, M> {
    state: SessionState,
    extractor: Extractor<S>,
    composer: Composer<M>,
}

impl<S: HtmlSource, M: GenerativeModel> Controller<S, M> {
    pub fn new(extractor: Extractor<S>, composer: Composer<M>) -> Self {
        Self { state: SessionState::default(), extractor, composer }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Back to waiting for a URL, dropping any retained error.
    pub fn reset(&mut self) {
        self.state = SessionState::AwaitingUrl;
    }

    /// Handles the URL form.
    ///
    /// A blank URL is a warning with no network traffic. A failed extraction
    /// moves the session to manual input; a successful one is composed into a
    /// post and the session keeps waiting for URLs.
    pub async fn submit_url(&mut self, url: &str, tone: Tone, audience: &str) -> Render {
        if self.state.is_awaiting_manual_input() {
            return Render::Warning(MANUAL_INPUT_PENDING_WARNING.to_string());
        }

        let url = url.trim();
        if url.is_empty() {
            return Render::Warning(EMPTY_URL_WARNING.to_string());
        }

        match self.extractor.extract(url).await {
            Ok(article) => {
                tracing::debug!(title = %article.title, chars = article.content.len(), "article ready");
                Render::post(self.composer.compose_outcome(&article, tone, audience).await)
            }
            Err(err) => {
                tracing::info!(kind = ?err.kind, "switching to manual input");
                let error_message = err.message;
                self.state = std::mem::take(&mut self.state).transition(SessionEvent::ExtractionFailed(error_message.clone()));
                Render::Fallback { error_message }
            }
        }
    }

    /// Handles the manual topic/context form.
    ///
    /// Both fields are required. After composing, the session returns to
    /// waiting for a URL whatever the outcome text was.
    pub async fn submit_manual(&mut self, topic: &str, context: &str, tone: Tone, audience: &str) -> Render {
        if !self.state.is_awaiting_manual_input() {
            return Render::Warning(NO_MANUAL_INPUT_WARNING.to_string());
        }

        if topic.trim().is_empty() || context.trim().is_empty() {
            return Render::Warning(MISSING_MANUAL_FIELDS_WARNING.to_string());
        }

        let input = ManualInput::new(topic.trim(), context.trim());
        let outcome = self.composer.compose_outcome(&input, tone, audience).await;

        self.state = std::mem::take(&mut self.state).transition(SessionEvent::ManualPostGenerated);
        Render::post(outcome)
    }
}
