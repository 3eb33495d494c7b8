//! Echo answer service: the offline stand-in for a real backend.

use async_trait::async_trait;
use pagesage_application::ports::answer_service::{AnswerError, AnswerService};
use pagesage_domain::{Answer, Prompt};

/// Answer service that echoes the prompt back.
///
/// Always succeeds, never goes over the network. Used for offline mode
/// and as a deterministic backend in tests.
pub struct EchoAnswerService;

#[async_trait]
impl AnswerService for EchoAnswerService {
    async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError> {
        Ok(Answer::new(format!("Your query was: {}", prompt.content())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_prefixes_prompt() {
        let service = EchoAnswerService;
        let answer = service.answer(&Prompt::new("hello")).await.unwrap();
        assert_eq!(answer.content(), "Your query was: hello");
    }

    #[tokio::test]
    async fn test_echo_empty_prompt() {
        let service = EchoAnswerService;
        let answer = service.answer(&Prompt::new("")).await.unwrap();
        assert_eq!(answer.content(), "Your query was: ");
    }

    #[tokio::test]
    async fn test_echo_is_deterministic() {
        let service = EchoAnswerService;
        let prompt = Prompt::new("same prompt");
        let first = service.answer(&prompt).await.unwrap();
        let second = service.answer(&prompt).await.unwrap();
        assert_eq!(first, second);
    }
}
