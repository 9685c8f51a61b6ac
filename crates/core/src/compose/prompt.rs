use crate::article::PostSource;
use crate::compose::Tone;

/// Audience used when the caller leaves it blank.
pub const DEFAULT_AUDIENCE: &str = "AI/ML professionals";

/// Characters of content embedded in the prompt. Anything past this is dropped.
pub const MAX_CONTENT_CHARS: usize = 4000;

/// Builds the instruction prompt for one post.
///
/// A blank `audience` falls back to [`DEFAULT_AUDIENCE`]. Content is cut at
/// [`MAX_CONTENT_CHARS`] characters without summarizing the tail.
pub fn build_prompt(source: &impl PostSource, tone: Tone, audience: &str) -> String {
    let audience = if audience.trim().is_empty() { DEFAULT_AUDIENCE } else { audience.trim() };
    let content = truncate_chars(source.content(), MAX_CONTENT_CHARS);

    format!(
        "**Your Role:** You are an expert LinkedIn content creator specializing in creating engaging posts for {audience}.
**Your Task:** Write a LinkedIn post based on the information provided below.
**Required Tone:** {tone}

**Instructions:**
1. Read the provided content.
2. Create a short, insightful, and engaging LinkedIn post that encourages discussion.
3. Include 3-5 relevant hashtags at the end.
4. Do not just summarize. Offer a unique perspective or ask a thought-provoking question.

---
**Title/Topic:** {title}
**Content/Context:**
{content}
---

Now, generate the LinkedIn post.
",
        title = source.title(),
    )
}

/// The first `max` characters of `text`, never splitting a character.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
