//! Page context source: fetch a URL and extract its readable text.

use async_trait::async_trait;
use pagesage_application::ports::context_source::{ContextError, ContextSource};
use pagesage_domain::core::string::truncate_head;
use pagesage_domain::Context;
use tracing::debug;

/// Maximum response body size (5 MB)
const MAX_BODY_SIZE: usize = 5 * 1024 * 1024;

/// Default max extracted text size (50 KB)
const DEFAULT_MAX_TEXT: usize = 50 * 1024;

/// Retrieves context by fetching a web page and extracting the readable
/// text from it.
///
/// HTML bodies are reduced to their text content, preferring the main
/// content container over page chrome. Non-HTML bodies (plain text, JSON)
/// are used as-is. Extracted text is capped at a byte budget.
pub struct PageContextSource {
    client: reqwest::Client,
    url: String,
    max_bytes: usize,
}

impl PageContextSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            max_bytes: DEFAULT_MAX_TEXT,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[async_trait]
impl ContextSource for PageContextSource {
    async fn get_context(&self) -> Result<Context, ContextError> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", "PageSage/0.1 (Context Retrieval)")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContextError::Timeout
                } else {
                    ContextError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContextError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content_length = response.content_length().unwrap_or(0);
        if content_length > MAX_BODY_SIZE as u64 {
            return Err(ContextError::TooLarge {
                size: content_length as usize,
                max: MAX_BODY_SIZE,
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| ContextError::Unavailable(e.to_string()))?;
        if body.len() > MAX_BODY_SIZE {
            return Err(ContextError::TooLarge {
                size: body.len(),
                max: MAX_BODY_SIZE,
            });
        }

        let body_str = String::from_utf8_lossy(&body);

        let text = if content_type.contains("text/html")
            || content_type.contains("application/xhtml")
        {
            html_to_text(&body_str)
        } else {
            // Plain text, JSON, etc. carry their own readable content
            body_str.to_string()
        };

        debug!(
            "Fetched {}: {} body bytes, {} text bytes",
            self.url,
            body.len(),
            text.len()
        );

        Ok(Context::new(truncate_head(&text, self.max_bytes)))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Extract readable text from HTML, stripping tags, scripts, and styles.
///
/// Prefers the main content container (`main`, `article`, `[role="main"]`)
/// when one exists, falling back to `<body>` and then the whole document.
pub fn html_to_text(html: &str) -> String {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);

    // Tags whose entire subtree should be ignored
    let skip_tags = ["script", "style", "noscript", "svg"];

    // Readability heuristics: a dedicated content container beats the
    // whole body with its navigation chrome
    for sel_str in ["main", "article", r#"[role="main"]"#] {
        let sel = Selector::parse(sel_str).unwrap();
        if let Some(el) = document.select(&sel).next() {
            let parts = collect_element_text(el, &skip_tags);
            return clean_whitespace(&parts.join(" "));
        }
    }

    // Try <body>, fall back to the whole document
    let body_selector = Selector::parse("body").unwrap();
    let parts = if let Some(body) = document.select(&body_selector).next() {
        collect_element_text(body, &skip_tags)
    } else {
        collect_element_text(document.root_element(), &skip_tags)
    };

    clean_whitespace(&parts.join(" "))
}

/// Recursively collect text from an element, skipping elements matching skip_tags
fn collect_element_text(element: scraper::ElementRef, skip_tags: &[&str]) -> Vec<String> {
    let tag_name = element.value().name();
    if skip_tags.contains(&tag_name) {
        return Vec::new();
    }

    let mut parts = Vec::new();

    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_el, skip_tags));
                }
            }
            _ => {}
        }
    }

    parts
}

/// Clean up excessive whitespace
fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
        }
    }

    result.trim().to_string()
}
