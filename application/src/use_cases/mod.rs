//! Use cases — application workflows composed from ports.

pub mod run_query;
