//! Structured logging for heliswap-core
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Colored console output on stderr
//!
//! ## Usage
//!
//! ```rust
//! use heliswap_core::logger::{self, LogTag};
//!
//! logger::error(LogTag::MirrorNode, "Connection failed");
//! logger::warning(LogTag::Pools, "Pool figure could not be parsed");
//! logger::info(LogTag::Pricing, "Resolved 12 token prices");
//! logger::debug(LogTag::Search, "Query classified as ledger id"); // Only with --debug-search
//! ```
//!
//! ## Initialization
//!
//! Binaries call `logger::init()` once at startup; library code never does.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, is_logger_flag, set_logger_config,
    update_logger_config, LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger from command-line arguments
///
/// Logger flags are consumed; the remaining arguments (program name first)
/// are returned for the tool's own parser.
pub fn init() -> Vec<String> {
    config::init_from_args()
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Still shown with --quiet; hidden only by --only-<tag> filters that exclude the tag.
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Only shown when the --debug-<tag> flag for this tag is provided.
///
/// # Example
/// ```rust
/// use heliswap_core::logger::{self, LogTag};
///
/// // Only shown with --debug-mirror-node
/// logger::debug(LogTag::MirrorNode, "GET /api/v1/tokens/0.0.1234");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Check whether a message at `level` for `tag` would be emitted
///
/// Useful to skip building expensive debug strings.
pub fn enabled(tag: &LogTag, level: LogLevel) -> bool {
    core::should_log(tag, level)
}
