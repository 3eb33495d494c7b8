//! Progress notification port for pipeline runs.

/// Callbacks for observing a pipeline run.
///
/// Implementations render spinners, stream chunks to a terminal, and so
/// on. All methods have empty defaults so implementors override only what
/// they display.
pub trait QueryProgress: Send + Sync {
    /// Context retrieval is starting.
    fn on_context_start(&self, _source: &str) {}

    /// Context retrieval finished with `bytes` of content.
    fn on_context_ready(&self, _bytes: usize) {}

    /// The answer request was sent.
    fn on_answer_start(&self) {}

    /// A chunk of answer text arrived.
    fn on_answer_chunk(&self, _chunk: &str) {}

    /// The answer is complete.
    fn on_answer_end(&self) {}
}

/// No-op progress for tests and quiet mode.
pub struct NoQueryProgress;

impl QueryProgress for NoQueryProgress {}
