//! Logging service implementation

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::config::runtime::LoggingPreferences;
use std::sync::{Arc, Mutex};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings
    pub fn with_config() -> Self {
        Self::from_preferences(&config::get_runtime_preferences())
    }

    /// Console or JSON output at the preferred minimum level
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let logger: Arc<dyn Logger> = if preferences.use_structured_logging {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };

        Self::new(logger, preferences.min_log_level.to_events_log_level())
    }

    /// Set minimum log level
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain text logger writing errors to stderr and everything else to stdout
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        match event.level {
            LogLevel::Error => eprintln!("{}", event.format()),
            _ => println!("{}", event.format()),
        }
    }
}

/// Structured logger for JSON output
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        match event.level {
            LogLevel::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.is_warning())
            .cloned()
            .collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.is_info() && e.code == code)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events.lock().unwrap();

        let max_events = config::get_event_buffer_size();
        if events.len() >= max_events {
            let remove_count = events.len() - max_events + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Create service based on runtime preferences
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_records_events() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Debug);

        service.log_event(LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "bad"));
        service.log_event(LogEvent::warning_with_code(
            codes::neutralizer::TOKEN_REPAIRED,
            "fixed",
        ));
        service.log_event(LogEvent::success(
            codes::success::SYNTAX_ANALYSIS_COMPLETE,
            "done",
        ));

        assert_eq!(memory.event_count(), 3);
        assert!(memory.has_error_with_code(codes::syntax::UNEXPECTED_TOKEN));
        assert!(memory.has_success_with_code(codes::success::SYNTAX_ANALYSIS_COMPLETE));
        assert_eq!(memory.get_warnings().len(), 1);

        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }

    #[test]
    fn test_level_filtering() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("hidden"));
        service.log_event(LogEvent::info("hidden"));
        service.log_event(LogEvent::warning("shown"));

        assert_eq!(memory.event_count(), 1);
        assert!(!service.should_log(LogLevel::Info));
        assert!(service.should_log(LogLevel::Error));
    }

    #[test]
    fn test_service_follows_preferences() {
        let preferences = LoggingPreferences {
            use_structured_logging: true,
            min_log_level: crate::config::runtime::LogLevel::Warning,
        };
        let service = LoggingService::from_preferences(&preferences);

        assert!(service.should_log(LogLevel::Error));
        assert!(service.should_log(LogLevel::Warning));
        assert!(!service.should_log(LogLevel::Info));
    }
}
