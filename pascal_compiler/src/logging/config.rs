//! Configuration module for logging
//!
//! Compile-time limits come from the build profile; the minimum level and
//! output format are runtime preferences.

use crate::config::compile_time::logging::{
    EVENT_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH, MAX_WARNINGS_PER_ANALYSIS,
};
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences (first call wins)
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
pub fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Get minimum log level
pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Maximum message length kept in a log event
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Events retained by the in-memory logger
pub fn get_event_buffer_size() -> usize {
    EVENT_BUFFER_SIZE
}

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    if MAX_WARNINGS_PER_ANALYSIS == 0 {
        return Err("Warning limit must be greater than zero".to_string());
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         - Max message length: {}\n\
         - Max warnings per analysis: {}\n\
         - Event buffer size: {}\n\
         - Min log level: {:?}\n\
         - Structured logging: {}",
        MAX_LOG_MESSAGE_LENGTH,
        MAX_WARNINGS_PER_ANALYSIS,
        EVENT_BUFFER_SIZE,
        preferences.min_log_level,
        preferences.use_structured_logging,
    )
}
