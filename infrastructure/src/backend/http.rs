//! HTTP answer service: the wire boundary to the answer backend.
//!
//! Speaks the backend's JSON protocol: a POST with the prebuilt prompt,
//! answered either as a single `{"output": ...}` object or as an SSE
//! `text/event-stream` of `data:` chunks.

use async_trait::async_trait;
use futures::StreamExt;
use pagesage_application::ports::answer_service::{AnswerError, AnswerService, StreamHandle};
use pagesage_domain::{Answer, AnswerEvent, Prompt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Non-streaming answer endpoint.
const ANSWER_PATH: &str = "/api/answer";

/// Streaming answer endpoint (SSE).
const ANSWER_STREAM_PATH: &str = "/api/answer-stream";

/// Request body for both endpoints.
#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Response body of the non-streaming endpoint.
#[derive(Debug, Deserialize)]
struct AnswerResponse {
    output: String,
}

/// Answer service backed by an HTTP backend.
pub struct HttpAnswerService {
    client: reqwest::Client,
    base_url: String,
    model: Option<String>,
}

impl HttpAnswerService {
    /// Create a service for the given backend base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: None,
        })
    }

    /// Select the model the backend should answer with.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> AnswerRequest<'a> {
        AnswerRequest {
            prompt: prompt.content(),
            model: self.model.as_deref(),
        }
    }

    fn map_send_error(e: reqwest::Error) -> AnswerError {
        if e.is_timeout() {
            AnswerError::Timeout
        } else if e.is_connect() {
            AnswerError::Unreachable(e.to_string())
        } else {
            AnswerError::RequestFailed(e.to_string())
        }
    }

    fn check_status(response: &reqwest::Response) -> Result<(), AnswerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(AnswerError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn answer(&self, prompt: &Prompt) -> Result<Answer, AnswerError> {
        let url = self.endpoint(ANSWER_PATH);
        debug!("POST {} ({} prompt bytes)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(&response)?;

        let body: AnswerResponse = response
            .json()
            .await
            .map_err(|e| AnswerError::InvalidResponse(e.to_string()))?;

        Ok(Answer::new(body.output))
    }

    async fn answer_streaming(&self, prompt: &Prompt) -> Result<StreamHandle, AnswerError> {
        let url = self.endpoint(ANSWER_STREAM_PATH);
        debug!("POST {} ({} prompt bytes, streaming)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(&response)?;

        let (tx, rx) = mpsc::channel(32);
        let mut body = response.bytes_stream();

        tokio::spawn(async move {
            let mut sse = SseBuffer::new();
            let mut full_text = String::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(AnswerEvent::Error(e.to_string())).await;
                        return;
                    }
                };

                for data in sse.push(&bytes) {
                    if data == SSE_DONE {
                        let _ = tx.send(AnswerEvent::Completed(full_text)).await;
                        return;
                    }
                    full_text.push_str(&data);
                    if tx.send(AnswerEvent::Delta(data)).await.is_err() {
                        // Receiver gone — the caller moved on
                        return;
                    }
                }
            }

            let _ = tx.send(AnswerEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}

/// Terminal sentinel some backends emit as the last SSE record.
const SSE_DONE: &str = "[DONE]";

/// Incremental SSE parser.
///
/// Accumulates raw bytes and yields the payload of each complete `data:`
/// line. Buffering at the byte level keeps multi-byte characters intact
/// when they straddle network chunk boundaries.
struct SseBuffer {
    buf: Vec<u8>,
}

impl SseBuffer {
    fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed bytes in; get the `data:` payloads of completed lines out.
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(data) = line.strip_prefix("data:") {
                payloads.push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
            // Other fields (event:, id:, retry:) and blank separators are
            // not meaningful to this protocol
        }
        payloads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_prompt_only_without_model() {
        let req = AnswerRequest {
            prompt: "what is this?",
            model: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"prompt": "what is this?"}));
    }

    #[test]
    fn test_request_serializes_model_when_set() {
        let req = AnswerRequest {
            prompt: "q",
            model: Some("gpt-4o-mini"),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
    }

    #[test]
    fn test_response_deserializes_output() {
        let body: AnswerResponse = serde_json::from_str(r#"{"output": "an answer"}"#).unwrap();
        assert_eq!(body.output, "an answer");
    }

    #[test]
    fn test_response_rejects_missing_output() {
        assert!(serde_json::from_str::<AnswerResponse>(r#"{"result": "x"}"#).is_err());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let service =
            HttpAnswerService::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            service.endpoint(ANSWER_PATH),
            "http://localhost:8000/api/answer"
        );
    }

    #[test]
    fn test_sse_buffer_extracts_data_lines() {
        let mut sse = SseBuffer::new();
        let payloads = sse.push(b"data: hello\n\ndata: world\n");
        assert_eq!(payloads, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_sse_buffer_handles_split_lines() {
        let mut sse = SseBuffer::new();
        assert!(sse.push(b"data: par").is_empty());
        let payloads = sse.push(b"tial\n");
        assert_eq!(payloads, vec!["partial".to_string()]);
    }

    #[test]
    fn test_sse_buffer_handles_multibyte_split_across_chunks() {
        let mut sse = SseBuffer::new();
        let full = "data: こんにちは\n".as_bytes();
        // Split in the middle of a 3-byte character
        assert!(sse.push(&full[..10]).is_empty());
        let payloads = sse.push(&full[10..]);
        assert_eq!(payloads, vec!["こんにちは".to_string()]);
    }

    #[test]
    fn test_sse_buffer_ignores_non_data_fields() {
        let mut sse = SseBuffer::new();
        let payloads = sse.push(b"event: message\nid: 3\ndata: chunk\nretry: 100\n");
        assert_eq!(payloads, vec!["chunk".to_string()]);
    }

    #[test]
    fn test_sse_buffer_crlf_lines() {
        let mut sse = SseBuffer::new();
        let payloads = sse.push(b"data: one\r\ndata: two\r\n");
        assert_eq!(payloads, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_sse_done_sentinel_passes_through() {
        let mut sse = SseBuffer::new();
        let payloads = sse.push(b"data: [DONE]\n");
        assert_eq!(payloads, vec![SSE_DONE.to_string()]);
    }
}
