use std::sync::LazyLock;

use regex::Regex;

static COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static UNLIKELY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|social|newsletter|cookie)",
    )
    .unwrap()
});

static POSITIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").unwrap()
});

static HIDDEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").unwrap());

static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const SCRIPT_TAGS: &[&str] = &["script", "style", "noscript", "template"];
const EMBED_TAGS: &[&str] = &["iframe", "svg", "canvas", "object", "embed", "video", "audio"];
const TABLE_TAGS: &[&str] = &["table"];
const BOILERPLATE_TAGS: &[&str] = &["nav", "aside", "footer", "button", "select", "input", "textarea"];

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script, style, noscript and template tags
    pub remove_scripts: bool,
    /// Whether to remove iframes, svg, canvas and media embeds
    pub remove_embeds: bool,
    /// Whether to drop tabular data
    pub remove_tables: bool,
    /// Whether to drop navigation, asides, footers and form controls.
    /// A `<form>` itself is kept since some sites wrap the whole page in one.
    pub remove_boilerplate: bool,
    /// Whether to remove HTML comments
    pub remove_comments: bool,
    /// Whether to remove elements whose class/id looks like page chrome
    pub remove_unlikely: bool,
    /// Whether to keep positive candidates even if they match unlikely patterns
    pub keep_positive: bool,
    /// Whether to remove hidden elements
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_scripts: true,
            remove_embeds: true,
            remove_tables: true,
            remove_boilerplate: true,
            remove_comments: true,
            remove_unlikely: true,
            keep_positive: true,
            remove_hidden: true,
        }
    }
}

/// Preprocess HTML by removing unwanted elements and normalizing the document
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = html.to_string();

    let mut tags: Vec<&str> = Vec::new();
    if config.remove_scripts {
        tags.extend_from_slice(SCRIPT_TAGS);
    }
    if config.remove_embeds {
        tags.extend_from_slice(EMBED_TAGS);
    }
    if config.remove_tables {
        tags.extend_from_slice(TABLE_TAGS);
    }
    if config.remove_boilerplate {
        tags.extend_from_slice(BOILERPLATE_TAGS);
    }
    if !tags.is_empty() {
        processed = remove_tags(&processed, &tags);
    }

    if config.remove_comments {
        processed = remove_comments(&processed);
    }

    if config.remove_unlikely {
        processed = remove_unlikely_candidates(&processed, config.keep_positive);
    }

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    normalize_whitespace(&processed)
}

/// Remove the given tags together with their content
fn remove_tags(html: &str, tags: &[&str]) -> String {
    let handlers = tags
        .iter()
        .map(|tag| {
            let selector: &str = tag;
            lol_html::element!(selector, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    rewrite(html, lol_html::Settings { element_content_handlers: handlers, ..Default::default() })
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    COMMENT_PATTERN.replace_all(html, "").to_string()
}

/// Remove elements whose class and id, taken together, match unlikely candidate
/// patterns. With `keep_positive`, a content-looking word anywhere in them wins.
fn remove_unlikely_candidates(html: &str, keep_positive: bool) -> String {
    let handlers = vec![lol_html::element!("*", move |el| {
        if matches!(el.tag_name().as_str(), "html" | "body" | "article" | "main") {
            return Ok(());
        }

        let class = el.get_attribute("class").unwrap_or_default();
        let id = el.get_attribute("id").unwrap_or_default();
        let match_string = format!("{} {}", class, id);

        if UNLIKELY_PATTERN.is_match(&match_string) && (!keep_positive || !POSITIVE_PATTERN.is_match(&match_string)) {
            el.remove();
        }

        Ok(())
    })];

    rewrite(html, lol_html::Settings { element_content_handlers: handlers, ..Default::default() })
}

/// Remove elements with display:none or visibility:hidden styles
fn remove_hidden_elements(html: &str) -> String {
    let handlers = vec![lol_html::element!("*", |el| {
        if let Some(style) = el.get_attribute("style")
            && HIDDEN_PATTERN.is_match(&style)
        {
            el.remove();
            return Ok(());
        }
        if el.has_attribute("hidden") || el.get_attribute("aria-hidden").as_deref() == Some("true") {
            el.remove();
        }
        Ok(())
    })];

    rewrite(html, lol_html::Settings { element_content_handlers: handlers, ..Default::default() })
}

/// Run a streaming rewrite, returning the input untouched if lol_html rejects it
fn rewrite(html: &str, settings: lol_html::Settings<'_, '_>) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        settings,
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { output }
}

/// Normalize whitespace in HTML
fn normalize_whitespace(html: &str) -> String {
    WHITESPACE_PATTERN.replace_all(html, " ").to_string()
}
