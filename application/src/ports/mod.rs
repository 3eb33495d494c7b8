//! Port definitions — interfaces implemented by infrastructure adapters.

pub mod answer_service;
pub mod context_source;
pub mod progress;
pub mod query_logger;
