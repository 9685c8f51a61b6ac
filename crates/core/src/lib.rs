pub mod article;
pub mod compose;
pub mod config;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod fetch;
pub mod metadata;
pub mod parse;
pub mod preprocess;
pub mod scoring;
pub mod session;

pub use article::{
    ArticleData, ExtractionError, ExtractionErrorKind, ManualInput, NO_TITLE, PostSource, UNKNOWN_AUTHOR, UNKNOWN_DATE,
    summarize,
};
pub use compose::{
    Composer, DEFAULT_API_BASE, DEFAULT_AUDIENCE, GeminiClient, Generation, GenerativeModel, MAX_CONTENT_CHARS,
    MockModel, PostOutcome, REFUSAL_MESSAGE, Tone, build_prompt,
};
pub use config::{DEFAULT_MODEL_NAME, MISSING_API_KEY_MESSAGE, Settings};
pub use error::{PostcraftError, Result};
#[doc(hidden)]
pub use extract::{ExtractConfig, ExtractedContent, extract_content};
pub use extractor::{Extractor, ExtractorConfig, ExtractorConfigBuilder};
pub use fetch::{FetchConfig, HtmlSource, HttpFetcher, fetch_file, fetch_url};
pub use metadata::Metadata;
pub use parse::Document;
#[doc(hidden)]
pub use preprocess::{PreprocessConfig, preprocess_html};
#[doc(hidden)]
pub use scoring::{
    ScoreConfig, ScoreResult, base_tag_score, calculate_score, class_id_weight, content_density_score, link_density,
};
pub use session::{Controller, Render, SessionEvent, SessionState};
