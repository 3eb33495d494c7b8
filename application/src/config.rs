//! Query parameters — pipeline behavior control.
//!
//! [`QueryParams`] groups the static parameters that control a single
//! pipeline run in [`RunQueryUseCase`](crate::use_cases::run_query::RunQueryUseCase).
//! These are application-layer concerns, not domain policy.

use pagesage_domain::{PromptPolicy, DEFAULT_MAX_PROMPT_BYTES};
use serde::{Deserialize, Serialize};

/// Pipeline behavior parameters.
///
/// Controls how the prompt is assembled from the retrieved context and
/// the user's query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// How the prompt is derived from (context, query).
    pub prompt_policy: PromptPolicy,
    /// Maximum prompt size in bytes; longer prompts keep their tail.
    pub max_prompt_bytes: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            prompt_policy: PromptPolicy::default(),
            max_prompt_bytes: DEFAULT_MAX_PROMPT_BYTES,
        }
    }
}

impl QueryParams {
    // ==================== Builder Methods ====================

    pub fn with_prompt_policy(mut self, policy: PromptPolicy) -> Self {
        self.prompt_policy = policy;
        self
    }

    pub fn with_max_prompt_bytes(mut self, max: usize) -> Self {
        self.max_prompt_bytes = max;
        self
    }
}
