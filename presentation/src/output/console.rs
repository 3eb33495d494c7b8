//! Console output formatting

use super::formatter::{OutputFormatter, QueryReport};
use colored::Colorize;

/// Formats query results for terminal display
pub struct ConsoleFormatter;

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &QueryReport) -> String {
        let mut out = String::new();

        out.push_str(&format!("{} {}\n", "Query:".bold().cyan(), report.query));
        out.push_str(&format!("{} {}\n", "Source:".bold().cyan(), report.source));
        out.push('\n');
        out.push_str(&format!("{}\n", "Answer:".bold().green()));
        out.push_str(&report.answer);
        out.push('\n');
        out.push_str(&format!("\n{}", format!("({} ms)", report.elapsed_ms).dimmed()));

        out
    }

    fn format_json(&self, report: &QueryReport) -> String {
        let value = serde_json::json!({
            "query": report.query,
            "source": report.source,
            "answer": report.answer,
            "elapsed_ms": report.elapsed_ms,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_answer_only(&self, report: &QueryReport) -> String {
        report.answer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> QueryReport {
        QueryReport {
            query: "when does it close?".to_string(),
            source: "https://example.com/hours".to_string(),
            answer: "At 6pm.".to_string(),
            elapsed_ms: 128,
        }
    }

    #[test]
    fn test_full_format_includes_all_fields() {
        let out = ConsoleFormatter.format(&report());
        assert!(out.contains("when does it close?"));
        assert!(out.contains("https://example.com/hours"));
        assert!(out.contains("At 6pm."));
        assert!(out.contains("128 ms"));
    }

    #[test]
    fn test_answer_only_is_just_the_answer() {
        let out = ConsoleFormatter.format_answer_only(&report());
        assert_eq!(out, "At 6pm.");
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let out = ConsoleFormatter.format_json(&report());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["answer"], "At 6pm.");
        assert_eq!(value["elapsed_ms"], 128);
    }
}
