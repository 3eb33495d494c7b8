//! Configuration file schema.
//!
//! Maps the `pagesage.toml` sections onto typed config structs. Every
//! field has a default so a missing file or a partial file still yields a
//! working configuration.

use pagesage_domain::{PromptPolicy, DEFAULT_MAX_PROMPT_BYTES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from configuration validation.
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("backend.base_url must be an http(s) URL, got: {0}")]
    InvalidBaseUrl(String),

    #[error("prompt.max_bytes must be greater than zero")]
    ZeroPromptBudget,

    #[error("context.max_bytes must be greater than zero")]
    ZeroContextBudget,
}

/// `[backend]` section — the answer backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the answer backend.
    pub base_url: String,
    /// Model the backend should answer with, if it supports selection.
    pub model: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            model: None,
            timeout_secs: 30,
        }
    }
}

/// `[context]` section — where context comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Page to retrieve context from. None means no context source.
    pub url: Option<String>,
    /// Cap on extracted context text, in bytes.
    pub max_bytes: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_bytes: 50 * 1024,
        }
    }
}

/// `[prompt]` section — prompt assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// `"grounded"` or `"passthrough"`.
    pub policy: PromptPolicy,
    /// Prompt budget in bytes; longer prompts keep their tail.
    pub max_bytes: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            policy: PromptPolicy::default(),
            max_bytes: DEFAULT_MAX_PROMPT_BYTES,
        }
    }
}

/// `[log]` section — structured query logging.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// JSONL file receiving one record per query event. None disables it.
    pub query_log: Option<PathBuf>,
}

/// The full configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub backend: BackendConfig,
    pub context: ContextConfig,
    pub prompt: PromptConfig,
    pub log: LogConfig,
}

impl FileConfig {
    /// Validate cross-field constraints after merging all sources.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigValidationError::InvalidBaseUrl(
                self.backend.base_url.clone(),
            ));
        }
        if self.prompt.max_bytes == 0 {
            return Err(ConfigValidationError::ZeroPromptBudget);
        }
        if self.context.max_bytes == 0 {
            return Err(ConfigValidationError::ZeroContextBudget);
        }
        Ok(())
    }
}
