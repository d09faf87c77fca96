pub mod config;
pub mod cors;
pub mod errors;
pub mod tracing;
