//! Deterministic prompt construction with a byte budget.

use super::template::PromptTemplate;
use super::value_objects::Prompt;
use crate::core::context::Context;
use crate::core::query::Query;
use crate::core::string::truncate_tail;
use serde::{Deserialize, Serialize};

/// Default prompt budget in bytes.
pub const DEFAULT_MAX_PROMPT_BYTES: usize = 5000;

/// How a (Context, Query) pair becomes a Prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptPolicy {
    /// Prompt equals the query verbatim; context is ignored.
    Passthrough,
    /// Query and context are combined under the grounding template.
    #[default]
    Grounded,
}

impl std::fmt::Display for PromptPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptPolicy::Passthrough => write!(f, "passthrough"),
            PromptPolicy::Grounded => write!(f, "grounded"),
        }
    }
}

/// Builds prompts from (Context, Query) pairs.
///
/// A pure function of its inputs: equal inputs always yield equal prompts,
/// and every input — including empty context and empty query — yields a
/// prompt rather than an error. Text over the byte budget is cut down to
/// its tail, so the query section survives truncation.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    policy: PromptPolicy,
    max_bytes: usize,
}

impl PromptBuilder {
    pub fn new(policy: PromptPolicy) -> Self {
        Self {
            policy,
            max_bytes: DEFAULT_MAX_PROMPT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn policy(&self) -> PromptPolicy {
        self.policy
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Build the prompt for a context/query pair.
    pub fn build(&self, context: &Context, query: &Query) -> Prompt {
        let text = match self.policy {
            PromptPolicy::Passthrough => PromptTemplate::passthrough(query.content()),
            PromptPolicy::Grounded => {
                PromptTemplate::grounded(context.content(), query.content())
            }
        };

        if text.len() > self.max_bytes {
            Prompt::new_truncated(truncate_tail(&text, self.max_bytes).to_string())
        } else {
            Prompt::new(text)
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptPolicy::default())
    }
}
