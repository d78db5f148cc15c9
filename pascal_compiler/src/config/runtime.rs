// RUNTIME PREFERENCES (User Experience)

use super::compile_time::neutralizer::{DEFAULT_MAX_EDIT_DISTANCE, MAX_EDIT_DISTANCE_LIMIT};
use crate::logging::{codes, Code};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Io { .. } => codes::system::CONFIGURATION_UNREADABLE,
            Self::Parse(_) | Self::InvalidValue { .. } => codes::system::INVALID_CONFIGURATION,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralizerPreferences {
    /// Whether near-miss keywords are repaired at all
    pub enabled: bool,

    /// Largest Levenshtein distance still considered a typo
    pub max_edit_distance: usize,
}

impl Default for NeutralizerPreferences {
    fn default() -> Self {
        Self {
            enabled: env::var("PASCAL_NEUTRALIZER_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            max_edit_distance: env::var("PASCAL_NEUTRALIZER_MAX_DISTANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_EDIT_DISTANCE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether repaired tokens are reported as warnings
    pub record_fixes: bool,

    /// Whether every rule entry is logged at debug level
    pub trace_rules: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            record_fixes: env::var("PASCAL_SYNTAX_RECORD_FIXES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            trace_rules: env::var("PASCAL_SYNTAX_TRACE_RULES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("PASCAL_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("PASCAL_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub neutralizer: NeutralizerPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections and keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check preferences against compile-time bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neutralizer.max_edit_distance > MAX_EDIT_DISTANCE_LIMIT {
            return Err(ConfigError::InvalidValue {
                key: "neutralizer.max_edit_distance",
                message: format!(
                    "{} exceeds the compiled limit of {}",
                    self.neutralizer.max_edit_distance, MAX_EDIT_DISTANCE_LIMIT
                ),
            });
        }
        Ok(())
    }

    /// Edit distance the neutralizer should use; zero when repairs are disabled
    pub fn effective_edit_distance(&self) -> usize {
        if self.neutralizer.enabled {
            self.neutralizer.max_edit_distance
        } else {
            0
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Neutralizer
    pub const NEUTRALIZER_ENABLED: &str = "PASCAL_NEUTRALIZER_ENABLED";
    pub const NEUTRALIZER_MAX_DISTANCE: &str = "PASCAL_NEUTRALIZER_MAX_DISTANCE";

    // Syntax
    pub const SYNTAX_RECORD_FIXES: &str = "PASCAL_SYNTAX_RECORD_FIXES";
    pub const SYNTAX_TRACE_RULES: &str = "PASCAL_SYNTAX_TRACE_RULES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "PASCAL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "PASCAL_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_toml_overrides() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [neutralizer]
            enabled = true
            max_edit_distance = 1

            [syntax]
            record_fixes = false
            trace_rules = true

            [logging]
            use_structured_logging = true
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.neutralizer.max_edit_distance, 1);
        assert!(!config.syntax.record_fixes);
        assert!(config.syntax.trace_rules);
        assert!(config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_distance_above_limit_rejected() {
        let source = format!(
            "[neutralizer]\nmax_edit_distance = {}\n",
            MAX_EDIT_DISTANCE_LIMIT + 1
        );
        let result = RuntimeConfig::from_toml_str(&source);
        assert_matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "neutralizer.max_edit_distance",
                ..
            })
        );
    }

    #[test]
    fn test_malformed_toml() {
        let error = RuntimeConfig::from_toml_str("[neutralizer\nenabled = yes").unwrap_err();
        assert_matches!(error, ConfigError::Parse(_));
        assert_eq!(error.error_code(), codes::system::INVALID_CONFIGURATION);
    }

    #[test]
    fn test_disabled_neutralizer_has_zero_distance() {
        let config =
            RuntimeConfig::from_toml_str("[neutralizer]\nenabled = false\nmax_edit_distance = 1")
                .unwrap();
        assert_eq!(config.effective_edit_distance(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pascal.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[syntax]\ntrace_rules = true").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert!(config.syntax.trace_rules);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::load(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
