//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for query results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Only the answer text
    Answer,
    /// Query, context source, and answer
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for pagesage
#[derive(Parser, Debug)]
#[command(name = "pagesage")]
#[command(version, about = "Ask questions about a web page, answered from its content")]
#[command(long_about = r#"
Pagesage answers a query grounded in the text of a page.

The pipeline has three stages:
1. Context: fetch the page and extract its readable text
2. Prompt: combine the context and your query under a grounding template
3. Answer: send the prompt to the answer backend and return its output

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./pagesage.toml     Project-level config
3. ~/.config/pagesage/config.toml   Global config

Example:
  pagesage --url https://example.com/help "How do I reset my password?"
  pagesage --context-file notes.txt "What were the action items?"
  pagesage --chat --url https://example.com/docs
  pagesage --offline "hello"
"#)]
pub struct Cli {
    /// The query to answer (not required in chat mode)
    pub query: Option<String>,

    /// Start interactive chat mode
    #[arg(long)]
    pub chat: bool,

    /// Page to ground answers in
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// File whose contents serve as the context
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub context_file: Option<PathBuf>,

    /// Answer backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Model the backend should answer with (overrides config)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Use the offline echo backend instead of HTTP
    #[arg(long)]
    pub offline: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_single_query() {
        let cli = Cli::parse_from(["pagesage", "--url", "https://example.com", "what is this?"]);
        assert_eq!(cli.query.as_deref(), Some("what is this?"));
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));
        assert!(!cli.chat);
    }

    #[test]
    fn test_url_conflicts_with_context_file() {
        let result = Cli::try_parse_from([
            "pagesage",
            "--url",
            "https://example.com",
            "--context-file",
            "notes.txt",
            "q",
        ]);
        assert!(result.is_err());
    }
}
