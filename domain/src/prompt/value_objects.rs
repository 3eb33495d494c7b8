//! Prompt value object

use serde::{Deserialize, Serialize};

/// The combined text sent to the answer backend (Value Object).
///
/// A prompt is derived deterministically from a (Context, Query) pair by
/// [`PromptBuilder`](super::builder::PromptBuilder). The `truncated` flag
/// records whether the built text was cut down to the prompt budget, so
/// the orchestrator can log the loss without re-deriving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    content: String,
    truncated: bool,
}

impl Prompt {
    /// Create a prompt that fit its budget unmodified.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            truncated: false,
        }
    }

    /// Create a prompt whose text was truncated to fit the budget.
    pub fn new_truncated(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            truncated: true,
        }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }

    /// Whether the text was cut down to the prompt budget.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Size of the content in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_creation() {
        let p = Prompt::new("what is this?");
        assert_eq!(p.content(), "what is this?");
        assert!(!p.was_truncated());
    }

    #[test]
    fn test_truncated_prompt() {
        let p = Prompt::new_truncated("tail of a long prompt");
        assert!(p.was_truncated());
    }

    #[test]
    fn test_empty_prompt_is_valid() {
        let p = Prompt::new("");
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }
}
