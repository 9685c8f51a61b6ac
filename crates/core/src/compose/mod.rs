pub mod composer;
pub mod gemini;
pub mod model;
pub mod prompt;
pub mod tone;

pub use composer::{Composer, PostOutcome, REFUSAL_MESSAGE};
pub use gemini::{DEFAULT_API_BASE, GeminiClient};
pub use model::{Generation, GenerativeModel, MockModel};
pub use prompt::{DEFAULT_AUDIENCE, MAX_CONTENT_CHARS, build_prompt};
pub use tone::Tone;
