//! Run Query use case.
//!
//! Executes one pass of the query pipeline:
//!
//! ```text
//! answer = AnswerService.answer(PromptBuilder.build(ContextSource.get_context(), query))
//! ```
//!
//! A single linear composition, executed once per invocation, with no
//! state carried between runs. Context retrieval failures degrade to the
//! empty context; answer failures surface to the caller.

use crate::config::QueryParams;
use crate::ports::answer_service::{AnswerError, AnswerService};
use crate::ports::context_source::ContextSource;
use crate::ports::progress::QueryProgress;
use crate::ports::query_logger::{NoQueryLogger, QueryEvent, QueryLogger};
use pagesage_domain::core::string::truncate;
use pagesage_domain::{Answer, AnswerEvent, Context, PromptBuilder, Query};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a pipeline run.
#[derive(Error, Debug)]
pub enum RunQueryError {
    #[error("Answer error: {0}")]
    Answer(#[from] AnswerError),

    #[error("Query cancelled")]
    Cancelled,
}

impl RunQueryError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunQueryError::Cancelled)
    }
}

/// Input for the [`RunQueryUseCase`].
#[derive(Debug, Clone)]
pub struct RunQueryInput {
    /// The user's query.
    pub query: Query,
    /// Pipeline parameters — prompt policy and budget.
    pub params: QueryParams,
}

impl RunQueryInput {
    pub fn new(query: impl Into<Query>, params: QueryParams) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }
}

/// Use case for running the query pipeline.
///
/// Flow:
/// 1. Retrieve context (degrade to empty on failure)
/// 2. Build the prompt under the configured policy and budget
/// 3. Stream the answer, forwarding chunks to progress
/// 4. Return the collected [`Answer`]
///
/// An optional [`CancellationToken`] is checked between stages and raced
/// against the answer stream: once cancelled, the in-flight result is
/// discarded and [`RunQueryError::Cancelled`] returned, so a stale answer
/// can never be surfaced after a newer query supersedes it.
pub struct RunQueryUseCase {
    context_source: Arc<dyn ContextSource>,
    answer_service: Arc<dyn AnswerService>,
    query_logger: Arc<dyn QueryLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunQueryUseCase {
    pub fn new(
        context_source: Arc<dyn ContextSource>,
        answer_service: Arc<dyn AnswerService>,
    ) -> Self {
        Self {
            context_source,
            answer_service,
            query_logger: Arc::new(NoQueryLogger),
            cancellation_token: None,
        }
    }

    /// Attach a structured query logger.
    pub fn with_query_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.query_logger = logger;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    fn check_cancelled(&self) -> Result<(), RunQueryError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(RunQueryError::Cancelled);
        }
        Ok(())
    }

    /// Execute the pipeline with progress callbacks.
    pub async fn execute(
        &self,
        input: RunQueryInput,
        progress: &dyn QueryProgress,
    ) -> Result<Answer, RunQueryError> {
        info!(
            "Running query: \"{}\"",
            truncate(input.query.content(), 100)
        );
        self.query_logger.log(QueryEvent::new(
            "query_received",
            serde_json::json!({
                "query": input.query.content(),
                "source": self.context_source.describe(),
                "policy": input.params.prompt_policy.to_string(),
            }),
        ));

        self.check_cancelled()?;

        // ========== Stage 1: Context retrieval ==========
        progress.on_context_start(&self.context_source.describe());
        let context = match self.context_source.get_context().await {
            Ok(context) => context,
            Err(e) => {
                // Absence of content is the empty context, not an error
                warn!("Context retrieval failed, proceeding without: {}", e);
                Context::empty()
            }
        };
        progress.on_context_ready(context.len());
        debug!("Context: {} bytes", context.len());

        self.check_cancelled()?;

        // ========== Stage 2: Prompt assembly ==========
        let builder =
            PromptBuilder::new(input.params.prompt_policy).with_max_bytes(input.params.max_prompt_bytes);
        let prompt = builder.build(&context, &input.query);
        if prompt.was_truncated() {
            warn!(
                "Prompt over budget, truncated to last {} bytes",
                input.params.max_prompt_bytes
            );
        }

        // ========== Stage 3: Answer retrieval ==========
        progress.on_answer_start();
        let mut handle = self.answer_service.answer_streaming(&prompt).await?;

        let mut full_text = String::new();
        let answer = loop {
            let event = if let Some(token) = &self.cancellation_token {
                tokio::select! {
                    _ = token.cancelled() => {
                        // Discard whatever the backend eventually returns
                        info!("Query cancelled mid-stream, discarding result");
                        return Err(RunQueryError::Cancelled);
                    }
                    event = handle.receiver.recv() => event,
                }
            } else {
                handle.receiver.recv().await
            };

            match event {
                Some(AnswerEvent::Delta(chunk)) => {
                    progress.on_answer_chunk(&chunk);
                    full_text.push_str(&chunk);
                }
                Some(AnswerEvent::Completed(text)) => {
                    if full_text.is_empty() {
                        break Answer::new(text);
                    }
                    break Answer::new(full_text);
                }
                Some(AnswerEvent::Error(e)) => {
                    return Err(RunQueryError::Answer(AnswerError::RequestFailed(e)));
                }
                // Channel closed without Completed — return what we have
                None => break Answer::new(full_text),
            }
        };
        progress.on_answer_end();

        info!("Answer received: {} bytes", answer.len());
        self.query_logger.log(QueryEvent::new(
            "answer_completed",
            serde_json::json!({
                "prompt_bytes": prompt.len(),
                "prompt_truncated": prompt.was_truncated(),
                "bytes": answer.len(),
                "text": answer.content(),
            }),
        ));

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::answer_service::StreamHandle;
    use crate::ports::context_source::{ContextError, NoContextSource};
    use crate::ports::progress::NoQueryProgress;
    use async_trait::async_trait;
    use pagesage_domain::{Prompt, PromptPolicy};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // ==================== Test Mocks ====================

    /// Echoes the prompt back, prefixed — the original stub backend.
    struct EchoService;

    #[async_trait]
    impl AnswerService for EchoService {
        async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError> {
            Ok(Answer::new(format!("Your query was: {}", prompt.content())))
        }
    }

    struct FailingContextSource;

    #[async_trait]
    impl ContextSource for FailingContextSource {
        async fn get_context(&self) -> Result<Context, ContextError> {
            Err(ContextError::Unavailable("fixture is down".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    struct FixedContextSource {
        content: String,
    }

    #[async_trait]
    impl ContextSource for FixedContextSource {
        async fn get_context(&self) -> Result<Context, ContextError> {
            Ok(Context::new(self.content.clone()))
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    /// Captures the prompt it was given, then echoes.
    struct PromptCapturingService {
        prompts: Mutex<Vec<Prompt>>,
    }

    impl PromptCapturingService {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnswerService for PromptCapturingService {
        async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            Ok(Answer::new("ok"))
        }
    }

    /// Streams deltas, then completes.
    struct StreamingService {
        chunks: Vec<String>,
    }

    #[async_trait]
    impl AnswerService for StreamingService {
        async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError> {
            self.answer_streaming(prompt).await?.collect_answer().await
        }

        async fn answer_streaming(&self, _prompt: &Prompt) -> Result<StreamHandle, AnswerError> {
            let (tx, rx) = mpsc::channel(8);
            let chunks = self.chunks.clone();
            tokio::spawn(async move {
                let mut full = String::new();
                for chunk in chunks {
                    full.push_str(&chunk);
                    if tx.send(AnswerEvent::Delta(chunk)).await.is_err() {
                        return;
                    }
                }
                let _ = tx.send(AnswerEvent::Completed(full)).await;
            });
            Ok(StreamHandle::new(rx))
        }
    }

    /// Never completes — for cancellation tests.
    struct HangingService;

    #[async_trait]
    impl AnswerService for HangingService {
        async fn answer(&self, _prompt: &Prompt) -> Result<Answer, AnswerError> {
            futures_pending().await;
            unreachable!()
        }

        async fn answer_streaming(&self, _prompt: &Prompt) -> Result<StreamHandle, AnswerError> {
            // Keep the sender alive so the receiver never sees a close
            let (tx, rx) = mpsc::channel(1);
            tokio::spawn(async move {
                let _tx = tx;
                futures_pending().await;
            });
            Ok(StreamHandle::new(rx))
        }
    }

    async fn futures_pending() {
        std::future::pending::<()>().await
    }

    fn passthrough_params() -> QueryParams {
        QueryParams::default().with_prompt_policy(PromptPolicy::Passthrough)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_end_to_end_echo() {
        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), Arc::new(EchoService));
        let input = RunQueryInput::new("hello", passthrough_params());

        let answer = use_case.execute(input, &NoQueryProgress).await.unwrap();
        assert_eq!(answer.content(), "Your query was: hello");
    }

    #[tokio::test]
    async fn test_end_to_end_empty_query() {
        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), Arc::new(EchoService));
        let input = RunQueryInput::new("", passthrough_params());

        let answer = use_case.execute(input, &NoQueryProgress).await.unwrap();
        assert_eq!(answer.content(), "Your query was: ");
    }

    #[tokio::test]
    async fn test_idempotent_for_equal_inputs() {
        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), Arc::new(EchoService));

        let first = use_case
            .execute(RunQueryInput::new("same", passthrough_params()), &NoQueryProgress)
            .await
            .unwrap();
        let second = use_case
            .execute(RunQueryInput::new("same", passthrough_params()), &NoQueryProgress)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_context_failure_degrades_to_empty() {
        let service = Arc::new(PromptCapturingService::new());
        let use_case = RunQueryUseCase::new(Arc::new(FailingContextSource), service.clone());
        let input = RunQueryInput::new("q", passthrough_params());

        let answer = use_case.execute(input, &NoQueryProgress).await.unwrap();
        assert_eq!(answer.content(), "ok");

        // The pipeline proceeded with the query alone
        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].content(), "q");
    }

    #[tokio::test]
    async fn test_grounded_prompt_reaches_backend() {
        let service = Arc::new(PromptCapturingService::new());
        let source = Arc::new(FixedContextSource {
            content: "The door code is 4412.".to_string(),
        });
        let use_case = RunQueryUseCase::new(source, service.clone());
        let input = RunQueryInput::new(
            "What is the door code?",
            QueryParams::default().with_prompt_policy(PromptPolicy::Grounded),
        );

        use_case.execute(input, &NoQueryProgress).await.unwrap();

        let prompts = service.prompts.lock().unwrap();
        assert!(prompts[0].content().contains("The door code is 4412."));
        assert!(prompts[0].content().contains("QUERY: What is the door code?"));
    }

    #[tokio::test]
    async fn test_prompt_budget_applied() {
        let service = Arc::new(PromptCapturingService::new());
        let source = Arc::new(FixedContextSource {
            content: "x".repeat(10_000),
        });
        let use_case = RunQueryUseCase::new(source, service.clone());
        let input = RunQueryInput::new(
            "small question",
            QueryParams::default().with_max_prompt_bytes(300),
        );

        use_case.execute(input, &NoQueryProgress).await.unwrap();

        let prompts = service.prompts.lock().unwrap();
        assert!(prompts[0].was_truncated());
        assert_eq!(prompts[0].len(), 300);
        assert!(prompts[0].content().ends_with("QUERY: small question"));
    }

    #[tokio::test]
    async fn test_streaming_chunks_are_collected() {
        let service = Arc::new(StreamingService {
            chunks: vec!["The ".to_string(), "answer.".to_string()],
        });
        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), service);
        let input = RunQueryInput::new("q", passthrough_params());

        let answer = use_case.execute(input, &NoQueryProgress).await.unwrap();
        assert_eq!(answer.content(), "The answer.");
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), Arc::new(EchoService))
            .with_cancellation_token(token);
        let input = RunQueryInput::new("q", passthrough_params());

        let result = use_case.execute(input, &NoQueryProgress).await;
        assert!(matches!(result, Err(RunQueryError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancellation_discards_in_flight_answer() {
        let token = CancellationToken::new();
        let use_case = RunQueryUseCase::new(Arc::new(NoContextSource), Arc::new(HangingService))
            .with_cancellation_token(token.clone());
        let input = RunQueryInput::new("q", passthrough_params());

        let cancel = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            cancel.cancel();
        });

        let result = use_case.execute(input, &NoQueryProgress).await;
        assert!(matches!(result, Err(RunQueryError::Cancelled)));
    }
}
