//! Streaming events for answer delivery.
//!
//! [`AnswerEvent`] represents individual events in a streaming answer,
//! enabling real-time display of backend output as it arrives.

/// An event in a streaming answer.
///
/// Used to bridge infrastructure-level streaming (e.g., SSE chunks from
/// the answer backend) to the application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// A text chunk from the backend.
    Delta(String),
    /// The complete answer text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}

impl AnswerEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            AnswerEvent::Delta(s) | AnswerEvent::Completed(s) => Some(s),
            AnswerEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnswerEvent::Completed(_) | AnswerEvent::Error(_))
    }
}
