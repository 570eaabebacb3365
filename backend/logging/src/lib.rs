//! Structured logging setup for ChronoForge binaries.
//!
//! Library crates only emit `tracing` events; this crate installs the
//! subscriber that writes them.

pub mod logger;

pub use logger::{init_console_logger, init_logger, LOG_FILE_PREFIX};
