//! Prompt assembly: value object, templates, and the deterministic builder.

pub mod builder;
pub mod template;
pub mod value_objects;

pub use builder::{PromptBuilder, PromptPolicy, DEFAULT_MAX_PROMPT_BYTES};
pub use template::PromptTemplate;
pub use value_objects::Prompt;
