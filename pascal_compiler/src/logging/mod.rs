//! Global logging module for the Pascal front end
//!
//! Provides thread-safe global logging, a per-thread scoped logger override,
//! and the macro interface used by the parser.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::config::RuntimeConfig;
use crate::utils::Position;
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SCOPED_LOGGER: RefCell<Option<Arc<LoggingService>>> = RefCell::new(None);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    let test_codes = [
        codes::syntax::UNEXPECTED_TOKEN,
        codes::neutralizer::TOKEN_REPAIRED,
        codes::success::SYNTAX_ANALYSIS_COMPLETE,
    ];
    for code in test_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize global logging with the `[logging]` section of a runtime config
pub fn init_global_logging_with_config(runtime: &RuntimeConfig) -> Result<(), String> {
    config::init_runtime_preferences(runtime.logging.clone())?;
    init_global_logging()
}

/// Initialize with custom service
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
// SCOPED LOGGER
// ============================================================================

/// Run `f` with `service` receiving every event logged on this thread
pub fn with_scoped_logger<F, R>(service: Arc<LoggingService>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = SCOPED_LOGGER.with(|slot| slot.borrow_mut().replace(service));
    let _restore = ScopeGuard { previous };
    f()
}

/// Puts the enclosing scope's logger back, also when unwinding
struct ScopeGuard {
    previous: Option<Arc<LoggingService>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        let _ = SCOPED_LOGGER.try_with(|slot| *slot.borrow_mut() = previous);
    }
}

fn dispatch(event: LogEvent) {
    let scoped = SCOPED_LOGGER.with(|slot| slot.borrow().clone());
    match scoped {
        Some(service) => service.log_event(event),
        None => {
            if let Some(logger) = try_get_global_logger() {
                logger.log_event(event);
            }
        }
    }
}

/// Whether any active logger accepts debug events
pub fn debug_enabled() -> bool {
    let scoped = SCOPED_LOGGER.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|service| service.should_log(LogLevel::Debug))
    });
    scoped.unwrap_or_else(|| {
        try_get_global_logger()
            .map(|service| service.should_log(LogLevel::Debug))
            .unwrap_or(false)
    })
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn with_details(
    mut event: LogEvent,
    position: Option<Position>,
    context: Vec<(&str, &str)>,
) -> LogEvent {
    if let Some(position) = position {
        event = event.with_position(position);
    }
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    position: Option<Position>,
    context: Vec<(&str, &str)>,
) {
    dispatch(with_details(LogEvent::error(code, message), position, context));
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(
    code: Code,
    message: &str,
    position: Option<Position>,
    context: Vec<(&str, &str)>,
) {
    dispatch(with_details(
        LogEvent::warning_with_code(code, message),
        position,
        context,
    ));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_details(LogEvent::success(code, message), None, context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_details(LogEvent::info(message), None, context));
}

/// Log debug with context (used by log_debug! macro)
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_details(LogEvent::debug(message), None, context));
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push_str(&format!("Debug enabled: {}\n", debug_enabled()));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}
