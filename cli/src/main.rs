//! CLI entrypoint for pagesage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use pagesage_application::{
    AnswerService, ContextSource, NoContextSource, NoQueryLogger, NoQueryProgress, QueryLogger,
    QueryParams, RunQueryInput, RunQueryUseCase,
};
use pagesage_domain::PromptPolicy;
use pagesage_infrastructure::{
    ConfigLoader, EchoAnswerService, HttpAnswerService, JsonlQueryLogger, PageContextSource,
    StaticContextSource,
};
use pagesage_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter, QueryReport,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting pagesage");

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    // CLI flags override config file values
    if let Some(backend) = &cli.backend {
        config.backend.base_url = backend.clone();
    }
    if let Some(model) = &cli.model {
        config.backend.model = Some(model.clone());
    }
    if let Some(url) = &cli.url {
        config.context.url = Some(url.clone());
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let timeout = Duration::from_secs(config.backend.timeout_secs);
    let has_context = cli.context_file.is_some() || config.context.url.is_some();

    // === Dependency Injection ===
    // Context source: file fixture, page retrieval, or none
    let context_source: Arc<dyn ContextSource> = if let Some(path) = &cli.context_file {
        Arc::new(
            StaticContextSource::from_file(path)
                .with_context(|| format!("Failed to read context file {}", path.display()))?,
        )
    } else if let Some(url) = &config.context.url {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Arc::new(PageContextSource::new(client, url.clone()).with_max_bytes(config.context.max_bytes))
    } else {
        Arc::new(NoContextSource)
    };

    // Grounding needs something to ground in
    let policy = if has_context {
        config.prompt.policy
    } else {
        PromptPolicy::Passthrough
    };

    // Answer backend: HTTP, or the offline echo
    let answer_service: Arc<dyn AnswerService> = if cli.offline {
        Arc::new(EchoAnswerService)
    } else {
        Arc::new(
            HttpAnswerService::new(config.backend.base_url.clone(), timeout)?
                .with_model(config.backend.model.clone()),
        )
    };

    // Structured query log
    let query_logger: Arc<dyn QueryLogger> = match &config.log.query_log {
        Some(path) => match JsonlQueryLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoQueryLogger),
        },
        None => Arc::new(NoQueryLogger),
    };

    let params = QueryParams::default()
        .with_prompt_policy(policy)
        .with_max_prompt_bytes(config.prompt.max_bytes);

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(context_source, answer_service, params)
            .with_query_logger(query_logger);

        repl.run().await?;
        return Ok(());
    }

    // Single query mode - query is required
    let query = match cli.query {
        Some(q) => q,
        None => bail!("Query is required. Use --chat for interactive mode."),
    };

    let source = context_source.describe();
    let use_case =
        RunQueryUseCase::new(context_source, answer_service).with_query_logger(query_logger);
    let input = RunQueryInput::new(query.clone(), params);

    // Execute with or without progress reporting
    let started = Instant::now();
    let answer = if cli.quiet {
        use_case.execute(input, &NoQueryProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute(input, &progress).await?
    };
    let elapsed_ms = started.elapsed().as_millis();

    // Output the result
    let report = QueryReport {
        query,
        source,
        answer: answer.into_content(),
        elapsed_ms,
    };
    let output = match cli.output {
        OutputFormat::Answer => ConsoleFormatter.format_answer_only(&report),
        OutputFormat::Full => ConsoleFormatter.format(&report),
        OutputFormat::Json => ConsoleFormatter.format_json(&report),
    };

    println!("{}", output);

    Ok(())
}
