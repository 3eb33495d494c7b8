//! Static context source: injected fixed content.

use async_trait::async_trait;
use pagesage_application::ports::context_source::{ContextError, ContextSource};
use pagesage_domain::Context;
use std::path::Path;

/// Context source backed by a fixed piece of text.
///
/// The content is injected at construction, which makes this the fixture
/// adapter for tests and the adapter behind `--context-file`.
pub struct StaticContextSource {
    content: String,
    label: String,
}

impl StaticContextSource {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: "static".to_string(),
        }
    }

    /// Read the content from a file, labeling the source with its path.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            content,
            label: path.display().to_string(),
        })
    }
}

#[async_trait]
impl ContextSource for StaticContextSource {
    async fn get_context(&self) -> Result<Context, ContextError> {
        Ok(Context::new(self.content.clone()))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
