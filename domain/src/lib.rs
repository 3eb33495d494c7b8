//! Domain layer for pagesage
//!
//! This crate contains the core value objects and prompt policy for the
//! query pipeline. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Query pipeline
//!
//! Answering flows through three stages, each an immutable value handoff:
//!
//! - **Query** — raw user-entered search text (may be empty)
//! - **Context** — text retrieved from the environment to ground the query
//! - **Prompt** — the combined text sent to the answer backend
//! - **Answer** — the text returned to the caller
//!
//! ## Prompt policy
//!
//! - **Passthrough**: the prompt is the query verbatim, context ignored
//! - **Grounded**: the query is embedded with the context under an
//!   instruction template that forbids answering beyond the context

pub mod core;
pub mod prompt;
pub mod stream;

// Re-export commonly used types
pub use self::core::{answer::Answer, context::Context, query::Query};
pub use prompt::{
    builder::{PromptBuilder, PromptPolicy, DEFAULT_MAX_PROMPT_BYTES},
    template::PromptTemplate,
    value_objects::Prompt,
};
pub use stream::AnswerEvent;
