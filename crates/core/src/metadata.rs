use serde_json::Value;

use crate::Document;

/// Bibliographic metadata found in a document. Every field is optional;
/// blank values are reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub site_name: Option<String>,
    pub description: Option<String>,
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. Meta `title` / `DC.title`
    /// 5. `<title>` element
    /// 6. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(headline) = self.json_ld_string("headline") {
            return Some(headline);
        }

        ["og:title", "twitter:title", "title", "DC.title"]
            .iter()
            .find_map(|name| self.get_meta_content(name))
            .or_else(|| self.title())
            .or_else(|| self.first_text("h1"))
    }

    /// Extract author with priority fallback:
    /// 1. JSON-LD `author` (string, object or array)
    /// 2. Meta `author` / `DC.creator`
    /// 3. `[rel="author"]` link text
    /// 4. `[itemprop="author"]` content
    /// 5. Short text in elements whose class or id mentions a byline
    pub fn extract_author(&self) -> Option<String> {
        let json_ld = self.extract_json_ld();
        if let Some(author) = json_ld.as_ref().and_then(|ld| ld.get("author"))
            && let Some(name) = author_from_json_ld(author)
        {
            return Some(name);
        }

        if let Some(author) = ["author", "DC.creator"].iter().find_map(|name| self.get_meta_content(name)) {
            return Some(author);
        }

        if let Some(author) = self.first_text("[rel=\"author\"]").or_else(|| self.first_text("[itemprop=\"author\"]")) {
            return Some(author);
        }

        for pattern in ["author", "byline", "by-author", "writer"] {
            for selector in [format!("[class*=\"{pattern}\"]"), format!("[id*=\"{pattern}\"]")] {
                let found = self.select(&selector).unwrap_or_default().iter().take(3).find_map(|el| {
                    let text = el.text();
                    let text = text.trim();
                    (!text.is_empty() && text.len() < 100).then(|| text.to_string())
                });

                if found.is_some() {
                    return found;
                }
            }
        }

        None
    }

    /// Extract publication date with priority fallback:
    /// 1. JSON-LD `datePublished`
    /// 2. Meta `article:published_time`
    /// 3. `<time datetime="">` element
    /// 4. Meta `date` / `DC.date`
    pub fn extract_date(&self) -> Option<String> {
        if let Some(date) = self.json_ld_string("datePublished") {
            return Some(date);
        }

        if let Some(date) = self.get_meta_content("article:published_time") {
            return Some(date);
        }

        if let Some(datetime) = self
            .select("time[datetime]")
            .ok()
            .and_then(|els| els.first().and_then(|el| el.attr("datetime")))
            .and_then(non_empty)
        {
            return Some(datetime);
        }

        ["date", "DC.date"].iter().find_map(|name| self.get_meta_content(name))
    }

    /// JSON-LD `description`, then `og:description`, then meta `description`.
    pub fn extract_description(&self) -> Option<String> {
        self.json_ld_string("description")
            .or_else(|| self.get_meta_content("og:description"))
            .or_else(|| self.get_meta_content("description"))
    }

    /// JSON-LD `publisher.name`, then `og:site_name`.
    pub fn extract_site_name(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(name) = json_ld.get("publisher").and_then(|p| p.get("name")).and_then(Value::as_str)
            && let Some(name) = non_empty(name)
        {
            return Some(name);
        }

        self.get_meta_content("og:site_name")
    }

    /// Extract all metadata at once
    pub fn extract_metadata(&self) -> Metadata {
        Metadata {
            title: self.extract_title(),
            author: self.extract_author(),
            date: self.extract_date(),
            site_name: self.extract_site_name(),
            description: self.extract_description(),
        }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        ["name", "property"].iter().find_map(|kind| {
            let selector = format!("meta[{kind}=\"{attr}\"]");
            self.select(&selector)
                .ok()?
                .first()
                .and_then(|el| el.attr("content"))
                .and_then(non_empty)
        })
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector).ok()?.first().and_then(|el| non_empty(&el.text()))
    }

    fn json_ld_string(&self, key: &str) -> Option<String> {
        self.extract_json_ld()?.get(key)?.as_str().and_then(non_empty)
    }

    /// Extract the article node from every JSON-LD script on the page.
    ///
    /// Top-level arrays and `@graph` wrappers are flattened. An article-typed
    /// node wins, then any node with a `headline`, then the first node found.
    fn extract_json_ld(&self) -> Option<Value> {
        let elements = self.select("script[type=\"application/ld+json\"]").ok()?;

        let mut nodes = Vec::new();
        for el in &elements {
            if let Ok(value) = serde_json::from_str::<Value>(el.text().trim()) {
                flatten_json_ld(value, &mut nodes);
            }
        }

        let article = nodes.iter().position(is_article_node);
        let headline = || nodes.iter().position(|node| node.get("headline").is_some());
        let index = article.or_else(headline).or((!nodes.is_empty()).then_some(0))?;

        Some(nodes.swap_remove(index))
    }
}

const ARTICLE_TYPES: &[&str] =
    &["Article", "NewsArticle", "BlogPosting", "ReportageNewsArticle", "TechArticle", "ScholarlyArticle"];

fn flatten_json_ld(value: Value, nodes: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.into_iter().for_each(|item| flatten_json_ld(item, nodes)),
        Value::Object(mut obj) => match obj.remove("@graph") {
            Some(graph) => flatten_json_ld(graph, nodes),
            None => nodes.push(Value::Object(obj)),
        },
        _ => {}
    }
}

/// `@type` may be a single name or a list of names.
fn is_article_node(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => ARTICLE_TYPES.contains(&kind.as_str()),
        Some(Value::Array(kinds)) => kinds.iter().filter_map(Value::as_str).any(|kind| ARTICLE_TYPES.contains(&kind)),
        _ => false,
    }
}

/// Handles string, object and array forms of the JSON-LD author field
fn author_from_json_ld(author: &Value) -> Option<String> {
    match author {
        Value::String(name) => non_empty(name),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).and_then(non_empty),
        Value::Array(arr) => arr.first().and_then(author_from_json_ld),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
