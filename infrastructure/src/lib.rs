//! Infrastructure layer for pagesage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod backend;
pub mod config;
pub mod context;
pub mod logging;

// Re-export commonly used types
pub use backend::{echo::EchoAnswerService, http::HttpAnswerService};
pub use config::{
    BackendConfig, ConfigLoader, ConfigValidationError, ContextConfig, FileConfig, LogConfig,
    PromptConfig,
};
pub use context::{fixed::StaticContextSource, page::PageContextSource};
pub use logging::JsonlQueryLogger;
