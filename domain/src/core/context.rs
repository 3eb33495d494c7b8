//! Context value object

use serde::{Deserialize, Serialize};

/// Text content retrieved from the environment to ground a query
/// (Value Object).
///
/// Absence of content is represented by the empty context, never by an
/// error: a pipeline run with nothing to ground on still proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    content: String,
}

impl Context {
    /// Create a new context. Empty content is allowed.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// The empty context — the representation of "no content available".
    pub fn empty() -> Self {
        Self {
            content: String::new(),
        }
    }

    /// Get the context content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Size of the content in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Context::new(s)
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Context::new(s)
    }
}
