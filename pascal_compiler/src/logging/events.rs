//! Event system for front end logging

use super::codes::Code;
use crate::utils::Position;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<Position>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        let limit = super::config::get_max_log_message_length();
        let message = if message.chars().count() > limit {
            message.chars().take(limit).collect()
        } else {
            message.to_string()
        };

        Self {
            timestamp: Utc::now(),
            level,
            code,
            message,
            position: None,
            context: BTreeMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Create a new warning event (warnings may not have codes)
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    /// Create a new info event
    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Attach a source position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Check if this event requires halting
    pub fn requires_halt(&self) -> bool {
        super::codes::requires_halt(self.code.as_str())
    }

    /// Get severity from code
    pub fn severity(&self) -> &'static str {
        super::codes::get_severity(self.code.as_str()).as_str()
    }

    /// Get category from code
    pub fn category(&self) -> &'static str {
        super::codes::get_category(self.code.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        let position_str = self
            .position
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();

        let context_str = if self.context.is_empty() {
            String::new()
        } else {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            format!(" ({})", pairs.join(", "))
        };

        format!(
            "[{}] {} - {}{}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            position_str,
            context_str
        )
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": super::codes::is_recoverable(self.code.as_str()),
                "requires_halt": self.requires_halt(),
                "description": super::codes::get_description(self.code.as_str()),
            });
        }

        if let Some(position) = &self.position {
            json["position"] = serde_json::to_value(position)?;
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "Unexpected token");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E050");
        assert_eq!(event.category(), "Syntax");
    }

    #[test]
    fn test_event_with_context_and_position() {
        let event = LogEvent::warning_with_code(codes::neutralizer::TOKEN_REPAIRED, "Repaired")
            .with_context("expected", "then")
            .with_context("actual", "the")
            .with_position(Position::new(3, 10, 13));

        let formatted = event.format();
        assert!(formatted.starts_with("[WARN] W060 - Repaired at 3:10-13"));
        assert!(formatted.contains("actual=the, expected=then"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::syntax::MAX_RECURSION_DEPTH, "Too deep")
            .with_position(Position::new(1, 1, 2));

        let json = event.format_json().unwrap();
        assert!(json.contains("\"level\":\"ERROR\""));
        assert!(json.contains("\"code\":\"E087\""));
        assert!(json.contains("\"requires_halt\":true"));
        assert!(json.contains("\"line\":1"));
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let limit = crate::logging::config::get_max_log_message_length();
        let message = "x".repeat(limit + 10);
        let event = LogEvent::info(&message);
        assert_eq!(event.message.len(), limit);
    }
}
