use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Positive patterns that suggest an element contains main content
static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").unwrap()
});

/// Negative patterns that suggest an element does NOT contain main content
static NEGATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|promo|share)",
    )
    .unwrap()
});

/// Configuration for content scoring
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Maximum content density score from character count
    pub max_char_density_score: f64,
    /// Maximum content density score from comma count
    pub max_comma_density_score: f64,
    /// Characters per point for content density scoring
    pub chars_per_point: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            max_char_density_score: 3.0,
            max_comma_density_score: 3.0,
            chars_per_point: 100,
        }
    }
}

/// Breakdown of an element's score
#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub tag_name: String,
    pub base_score: f64,
    pub class_weight: f64,
    pub content_density: f64,
    /// Link density (0.0 to 1.0)
    pub link_density: f64,
    pub final_score: f64,
}

/// Base score by tag: containers that usually wrap articles score high,
/// lists, headings and navigation chrome score low.
pub fn base_tag_score(element: &Element<'_>) -> f64 {
    match element.tag_name().as_str() {
        "article" => 10.0,
        "main" | "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "pre" => 0.0,
        "form" => -3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight: `positive_weight` when the id or a class looks like content,
/// `negative_weight` when it looks like chrome, zero otherwise.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    if let Some(id) = element.attr("id") {
        if POSITIVE_PATTERN.is_match(id) {
            return config.positive_weight;
        }
        if NEGATIVE_PATTERN.is_match(id) {
            return config.negative_weight;
        }
    }

    if let Some(class) = element.attr("class") {
        for class_name in class.split_whitespace() {
            if POSITIVE_PATTERN.is_match(class_name) {
                return config.positive_weight;
            }
            if NEGATIVE_PATTERN.is_match(class_name) {
                return config.negative_weight;
            }
        }
    }

    0.0
}

/// Content density: one point per `chars_per_point` characters plus one per
/// comma, each capped.
pub fn content_density_score(text: &str, config: &ScoreConfig) -> f64 {
    let char_score = ((text.chars().count() / config.chars_per_point) as f64).min(config.max_char_density_score);
    let comma_score = (text.matches(',').count() as f64).min(config.max_comma_density_score);

    char_score + comma_score
}

/// Ratio of link text characters to total text characters.
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();

    if text_length == 0 {
        return 0.0;
    }

    let link_text_length = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum::<usize>();

    link_text_length as f64 / text_length as f64
}

/// Calculate the final score for an element
///
/// `(base + class weight + density) * (1 - link density)`, with the link
/// penalty halved for content-looking or text-heavy elements.
pub fn calculate_score(element: &Element<'_>, config: &ScoreConfig) -> ScoreResult {
    let tag_name = element.tag_name();
    let text = element.text();

    let base_score = base_tag_score(element);
    let class_weight = class_id_weight(element, config);
    let content_density = content_density_score(&text, config);
    let ld = link_density(element);

    let is_content_rich = text.chars().count() > 500;
    let link_penalty = if class_weight > 0.0 || is_content_rich { 1.0 - (ld * 0.5) } else { 1.0 - ld };

    let final_score = (base_score + class_weight + content_density) * link_penalty;

    ScoreResult { tag_name, base_score, class_weight, content_density, link_density: ld, final_score }
}
