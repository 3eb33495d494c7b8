//! Application layer for pagesage
//!
//! This crate contains the query pipeline use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::QueryParams;
pub use ports::{
    answer_service::{AnswerError, AnswerService, StreamHandle},
    context_source::{ContextError, ContextSource, NoContextSource},
    progress::{NoQueryProgress, QueryProgress},
    query_logger::{NoQueryLogger, QueryEvent, QueryLogger},
};
pub use use_cases::run_query::{RunQueryError, RunQueryInput, RunQueryUseCase};
