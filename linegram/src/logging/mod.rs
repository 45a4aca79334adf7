//! Global logging module for linegram
//!
//! Provides thread-safe global logging with coded events and a clean macro
//! interface. Nothing is emitted until `init_global_logging` (or the
//! `_with_service` variant) has been called.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod config;
pub mod events;
pub mod service;

use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    // Every family must be registered before anything is logged against it
    let probe_codes = [
        codes::system::INTERNAL_ERROR,
        codes::stream::STREAM_EXHAUSTED,
        codes::values::TYPE_MISMATCH,
        codes::parser::UNBOUND_RULE,
        codes::grammar::MISSING_PARSER,
    ];
    for code in probe_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<crate::utils::Position>,
    context: Vec<(&str, &str)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, message);
    if let Some(p) = position {
        event = event.with_position(p);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::success(code, message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::info(message);
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    if let Some(logger) = try_get_global_logger() {
        diagnostics.push_str(&format!("Active level: {}\n", logger.min_level().as_str()));
    }
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}
