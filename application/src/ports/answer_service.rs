//! Answer service port
//!
//! Defines the interface for the answer-producing collaborator. This is
//! the pipeline's external call boundary: implementations may go over the
//! network, and their failures surface to the caller (unlike context
//! retrieval, which degrades).

use async_trait::async_trait;
use pagesage_domain::{Answer, AnswerEvent, Prompt};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur while obtaining an answer.
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Handle for receiving streaming events from an answer request.
///
/// Wraps an `mpsc::Receiver<AnswerEvent>` and provides convenience
/// methods for consuming the stream.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<AnswerEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<AnswerEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single answer.
    ///
    /// Useful when streaming happens at the transport level but only the
    /// final text matters.
    pub async fn collect_answer(mut self) -> Result<Answer, AnswerError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                AnswerEvent::Delta(chunk) => full_text.push_str(&chunk),
                AnswerEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(Answer::new(text));
                    }
                    return Ok(Answer::new(full_text));
                }
                AnswerEvent::Error(e) => {
                    return Err(AnswerError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(Answer::new(full_text))
    }
}

/// The answer-producing collaborator.
///
/// This port defines how the application layer obtains an answer for a
/// prompt. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Obtain an answer for a prompt.
    async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError>;

    /// Obtain an answer as a stream of events.
    ///
    /// Default implementation calls `answer()` and wraps the result in a
    /// single `Completed` event, so non-streaming implementations work
    /// without changes.
    async fn answer_streaming(&self, prompt: &Prompt) -> Result<StreamHandle, AnswerError> {
        let result = self.answer(prompt).await?;
        let (tx, rx) = mpsc::channel(1);
        // Send Completed event — if the receiver is dropped, that's fine
        let _ = tx.send(AnswerEvent::Completed(result.into_content())).await;
        Ok(StreamHandle::new(rx))
    }
}
