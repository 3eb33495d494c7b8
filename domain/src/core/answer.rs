//! Answer value object

use serde::{Deserialize, Serialize};

/// Text returned by the answer-producing collaborator (Value Object).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    content: String,
}

impl Answer {
    /// Create a new answer. Empty content is allowed.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Get the answer content
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

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::new(s)
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_creation() {
        let a = Answer::new("Dark mode is under Settings > Appearance.");
        assert_eq!(a.content(), "Dark mode is under Settings > Appearance.");
    }

    #[test]
    fn test_empty_answer_is_valid() {
        let a = Answer::new("");
        assert!(a.is_empty());
    }

    #[test]
    fn test_display() {
        let a = Answer::new("42");
        assert_eq!(a.to_string(), "42");
    }
}
