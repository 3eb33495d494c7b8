//! Answer service adapters.

pub mod echo;
pub mod http;

pub use echo::EchoAnswerService;
pub use http::HttpAnswerService;
