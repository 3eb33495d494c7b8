//! Output formatter trait

/// View of a completed pipeline run, ready for display.
#[derive(Debug, Clone)]
pub struct QueryReport {
    /// The user's query.
    pub query: String,
    /// Where context came from ("none" when no source was configured).
    pub source: String,
    /// The answer text.
    pub answer: String,
    /// Wall-clock duration of the run.
    pub elapsed_ms: u128,
}

/// Trait for formatting query results
pub trait OutputFormatter {
    /// Format the complete result
    fn format(&self, report: &QueryReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &QueryReport) -> String;

    /// Format the answer only (concise output)
    fn format_answer_only(&self, report: &QueryReport) -> String;
}
