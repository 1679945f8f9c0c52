//! Carlot Observability Module
//!
//! Provides:
//! - `tracing` subscriber setup, compact or JSON, with optional daily log files
//! - HTTP request/response logging with a per-request id
//!
//! # Examples
//!
//! ```no_run
//! use carlot_observability::{LoggingConfig, init_logging};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LoggingConfig::from_env())?;
//!     Ok(())
//! }
//! ```

pub mod logging;

pub use logging::{LogFormat, LoggingConfig, REQUEST_ID_HEADER, init_logging, logging_middleware};
