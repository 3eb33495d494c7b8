//! Configuration: file schema and multi-source loading.

pub mod file_config;
pub mod loader;

pub use file_config::{
    BackendConfig, ConfigValidationError, ContextConfig, FileConfig, LogConfig, PromptConfig,
};
pub use loader::ConfigLoader;
