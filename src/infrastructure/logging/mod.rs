//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty, compact or JSON formatting on stderr
//! - Optional rotating JSON log files

pub mod logger;

pub use logger::LoggerImpl;
