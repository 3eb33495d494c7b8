//! Port for structured query logging.
//!
//! Defines the [`QueryLogger`] trait for recording pipeline events
//! (queries, prompt sizes, answers) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! query/answer record in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured query event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields; the adapter stamps the timestamp.
pub struct QueryEvent {
    /// Event type identifier (e.g., "query_received", "answer_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl QueryEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging query events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible
/// to avoid disrupting the pipeline — logging failures are silently
/// ignored.
pub trait QueryLogger: Send + Sync {
    /// Record a query event.
    fn log(&self, event: QueryEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoQueryLogger;

impl QueryLogger for NoQueryLogger {
    fn log(&self, _event: QueryEvent) {}
}
