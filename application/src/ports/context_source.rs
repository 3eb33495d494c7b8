//! Context source port
//!
//! Defines the interface for retrieving the text content the environment
//! currently exposes. The content source is an injected capability, never
//! an implicit global: adapters live in the infrastructure layer and
//! fixture sources stand in during tests.

use async_trait::async_trait;
use pagesage_domain::Context;
use thiserror::Error;

/// Errors that can occur during context retrieval.
///
/// These never reach the pipeline's caller: the orchestrator degrades a
/// failed retrieval to the empty context and logs the loss.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Context unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Content too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Timeout")]
    Timeout,
}

/// Source of the text content a query should be grounded in.
///
/// This port defines how the application layer obtains context.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Retrieve the current context.
    async fn get_context(&self) -> Result<Context, ContextError>;

    /// Human-readable description of where context comes from, for logs.
    fn describe(&self) -> String;
}

/// Source that never has content — every retrieval yields the empty
/// context. The default when no content source is configured.
pub struct NoContextSource;

#[async_trait]
impl ContextSource for NoContextSource {
    async fn get_context(&self) -> Result<Context, ContextError> {
        Ok(Context::empty())
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}
