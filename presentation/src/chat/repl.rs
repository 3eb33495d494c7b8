//! REPL (Read-Eval-Print Loop) for interactive querying

use crate::progress::reporter::SimpleProgress;
use pagesage_application::{
    AnswerService, ContextSource, NoQueryLogger, QueryLogger, QueryParams, RunQueryInput,
    RunQueryUseCase,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Interactive query REPL
///
/// Each line is a query run through the pipeline. Ctrl-C while an answer
/// is in flight cancels that query and discards its result; the next line
/// starts fresh.
pub struct ChatRepl {
    context_source: Arc<dyn ContextSource>,
    answer_service: Arc<dyn AnswerService>,
    query_logger: Arc<dyn QueryLogger>,
    params: QueryParams,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(
        context_source: Arc<dyn ContextSource>,
        answer_service: Arc<dyn AnswerService>,
        params: QueryParams,
    ) -> Self {
        Self {
            context_source,
            answer_service,
            query_logger: Arc::new(NoQueryLogger),
            params,
        }
    }

    /// Attach a structured query logger.
    pub fn with_query_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.query_logger = logger;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("pagesage").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    // Run the pipeline
                    self.process_query(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn process_query(&self, line: &str) {
        let token = CancellationToken::new();
        let use_case = RunQueryUseCase::new(
            self.context_source.clone(),
            self.answer_service.clone(),
        )
        .with_query_logger(self.query_logger.clone())
        .with_cancellation_token(token.clone());

        let progress = SimpleProgress::new();
        let input = RunQueryInput::new(line, self.params.clone());

        let run = use_case.execute(input, &progress);
        tokio::pin!(run);

        let result = loop {
            tokio::select! {
                res = &mut run => break res,
                _ = tokio::signal::ctrl_c() => {
                    // Discard the in-flight answer; keep the REPL alive
                    token.cancel();
                }
            }
        };

        match result {
            Ok(answer) => {
                if progress.chunks_printed() {
                    // The answer already streamed to the terminal
                    println!();
                } else {
                    println!("{}", answer.content());
                }
            }
            Err(e) if e.is_cancelled() => {
                println!("(query cancelled)");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│             Pagesage - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Context source: {}", self.context_source.describe());
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /source   - Show the context source");
        println!("  /quit     - Exit chat");
        println!();
        println!("Ctrl-C cancels an in-flight query.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /source          - Show the context source");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/source" => {
                println!();
                println!("Context source: {}", self.context_source.describe());
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}. Try /help", cmd);
                false
            }
        }
    }
}
