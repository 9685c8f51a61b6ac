use crate::parse::{Document, Element};
use crate::scoring::{ScoreConfig, calculate_score, link_density};
use crate::{PostcraftError, Result};

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum score the top candidate needs before the whole body is used instead
    pub min_score_threshold: f64,
    /// Minimum character threshold for content
    pub char_threshold: usize,
    /// Maximum elements to consider (0 = unlimited)
    pub max_elements: usize,
    /// Sibling score threshold (multiplier of top score)
    pub sibling_threshold: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { min_score_threshold: 20.0, char_threshold: 500, max_elements: 1000, sibling_threshold: 0.2 }
    }
}

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Plain text of the main content, paragraphs separated by blank lines
    pub text: String,
    /// The top candidate score
    pub top_score: f64,
    /// Number of elements the text was taken from
    pub element_count: usize,
}

/// A scored element
#[derive(Debug, Clone)]
struct Candidate<'a> {
    element: Element<'a>,
    score: f64,
}

/// Tags that are considered potential content containers
const CANDIDATE_TAGS: &[&str] = &["article", "main", "section", "div", "td", "pre", "blockquote", "p"];

/// Score every plausible container, then credit each candidate's parent with
/// half and its grandparent with a third of the candidate's own score.
fn score_candidates<'a>(doc: &'a Document, config: &ExtractConfig, score_config: &ScoreConfig) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = Vec::new();
    let max_elements = if config.max_elements == 0 { usize::MAX } else { config.max_elements };
    let mut scanned = 0usize;

    'tags: for tag in CANDIDATE_TAGS {
        for element in doc.select(tag).unwrap_or_default() {
            if scanned >= max_elements {
                break 'tags;
            }
            scanned += 1;

            let tag_name = element.tag_name();
            let text_len = element.text().trim().chars().count();
            if !matches!(tag_name.as_str(), "article" | "section" | "main") && text_len < config.char_threshold / 10 {
                continue;
            }

            let own_score = calculate_score(&element, score_config).final_score;
            add_score(&mut candidates, element.clone(), 0.0, score_config);

            if let Some(parent) = element.parent() {
                add_score(&mut candidates, parent.clone(), own_score / 2.0, score_config);
                if let Some(grandparent) = parent.parent() {
                    add_score(&mut candidates, grandparent, own_score / 3.0, score_config);
                }
            }
        }
    }

    candidates
}

/// Credit `bonus` to an element, seeding it with its own score on first sight.
fn add_score<'a>(candidates: &mut Vec<Candidate<'a>>, element: Element<'a>, bonus: f64, score_config: &ScoreConfig) {
    if matches!(element.tag_name().as_str(), "html" | "body") {
        return;
    }

    match candidates.iter_mut().find(|c| c.element == element) {
        Some(existing) => existing.score += bonus,
        None => {
            let score = calculate_score(&element, score_config).final_score + bonus;
            candidates.push(Candidate { element, score });
        }
    }
}

/// Highest score wins; ties go to semantic containers, then to longer text.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> std::cmp::Ordering {
    a.score
        .partial_cmp(&b.score)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| candidate_priority(&a.element.tag_name()).cmp(&candidate_priority(&b.element.tag_name())))
        .then_with(|| a.element.text().chars().count().cmp(&b.element.text().chars().count()))
}

fn candidate_priority(tag_name: &str) -> u8 {
    match tag_name {
        "article" | "main" | "section" => 3,
        "div" => 2,
        _ => 1,
    }
}

/// Siblings of the top candidate that score well enough, or paragraphs with
/// enough prose and few links.
fn select_siblings<'a>(top: &Candidate<'a>, candidates: &[Candidate<'a>], config: &ExtractConfig) -> Vec<Element<'a>> {
    let Some(parent) = top.element.parent() else {
        return Vec::new();
    };

    let threshold = (top.score * config.sibling_threshold).max(10.0);

    parent
        .children()
        .into_iter()
        .filter(|sibling| *sibling != top.element)
        .filter(|sibling| {
            if let Some(candidate) = candidates.iter().find(|c| c.element == *sibling)
                && candidate.score >= threshold
            {
                return true;
            }

            sibling.tag_name() == "p" && sibling.text().trim().chars().count() > 80 && link_density(sibling) < 0.25
        })
        .collect()
}

/// Extract the main readable text from a preprocessed document.
///
/// 1. Scores candidate containers and propagates scores to ancestors
/// 2. Picks the top candidate and merges qualifying siblings in document order
/// 3. Falls back to the whole `<body>` when nothing clears the score threshold
///
/// Returns [`PostcraftError::NoContent`] when the result has no text at all.
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let score_config = ScoreConfig::default();
    let candidates = score_candidates(doc, config, &score_config);

    let top = candidates.iter().max_by(|a, b| compare_candidates(a, b));

    let extracted = match top {
        Some(top) if top.score >= config.min_score_threshold => {
            let siblings = select_siblings(top, &candidates, config);
            tracing::debug!(score = top.score, tag = %top.element.tag_name(), siblings = siblings.len(), "selected top candidate");

            let text = match top.element.parent() {
                Some(parent) if !siblings.is_empty() => parent
                    .children()
                    .iter()
                    .filter(|child| **child == top.element || siblings.contains(child))
                    .map(Element::block_text)
                    .filter(|block| !block.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n\n"),
                _ => top.element.block_text(),
            };

            ExtractedContent { text, top_score: top.score, element_count: 1 + siblings.len() }
        }
        _ => {
            let top_score = top.map(|c| c.score).unwrap_or_default();
            tracing::debug!(score = top_score, "no candidate cleared the threshold, using document body");

            let text = doc.body().map(|body| body.block_text()).unwrap_or_default();
            ExtractedContent { text, top_score, element_count: 1 }
        }
    };

    if extracted.text.trim().is_empty() {
        return Err(PostcraftError::NoContent);
    }

    Ok(extracted)
}
