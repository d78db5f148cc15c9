//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const INVALID_CONFIGURATION: Code = Code::new("ERR004");
    pub const CONFIGURATION_UNREADABLE: Code = Code::new("ERR005");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const EMPTY_TOKEN_STREAM: Code = Code::new("E041");
    pub const UNDEFINED_RULE: Code = Code::new("E043");
    pub const INVALID_GRAMMAR: Code = Code::new("E044");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const TOKEN_LIMIT_EXCEEDED: Code = Code::new("E052");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E086");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Neutralizer codes
pub mod neutralizer {
    use super::Code;

    pub const UNFIXABLE_TOKEN: Code = Code::new("E060");
    pub const TOKEN_REPAIRED: Code = Code::new("W060");
    pub const WARNING_LIMIT_REACHED: Code = Code::new("W061");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const GRAMMAR_CONSTRUCTED: Code = Code::new("I010");
    pub const SYNTAX_ANALYSIS_COMPLETE: Code = Code::new("I011");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

/// Metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Internal compiler error",
                "Report the failing input as a compiler bug",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or configuration initialization failed",
                "Check configuration and initialize logging once per process",
            ),
            ErrorMetadata::new(
                "ERR004",
                "System",
                Severity::High,
                false,
                true,
                "Invalid runtime configuration",
                "Fix the offending key in the configuration file or environment",
            ),
            ErrorMetadata::new(
                "ERR005",
                "System",
                Severity::High,
                false,
                true,
                "Configuration file could not be read",
                "Check that the configuration path exists and is readable",
            ),
            // Syntax
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                false,
                true,
                "Token stream ended before the program was complete",
                "Make sure the program is terminated with 'end.'",
            ),
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::High,
                false,
                true,
                "Empty token stream - nothing to analyze",
                "Provide at least a program header and end-of-stream token",
            ),
            ErrorMetadata::new(
                "E043",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Grammar rule referenced but never defined",
                "Define every declared rule before building the grammar",
            ),
            ErrorMetadata::new(
                "E044",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Grammar is structurally invalid",
                "Fix empty alternatives or repetitions that can match nothing",
            ),
            ErrorMetadata::new(
                "E050",
                "Syntax",
                Severity::Medium,
                true,
                false,
                "Unexpected token during parsing",
                "Check token sequence against the language grammar",
            ),
            ErrorMetadata::new(
                "E052",
                "Syntax",
                Severity::High,
                false,
                true,
                "Token count exceeds the compiled limit",
                "Split the program or raise max_token_count in the build profile",
            ),
            ErrorMetadata::new(
                "E086",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser error",
                "Report parser system bug",
            ),
            ErrorMetadata::new(
                "E087",
                "Syntax",
                Severity::High,
                false,
                true,
                "Maximum recursion depth exceeded",
                "Reduce nesting depth or simplify structure",
            ),
            // Neutralizer
            ErrorMetadata::new(
                "E060",
                "Neutralizer",
                Severity::Medium,
                true,
                false,
                "Token differs too much from the expected spelling",
                "Correct the token by hand",
            ),
            ErrorMetadata::new(
                "W060",
                "Neutralizer",
                Severity::Low,
                true,
                false,
                "Misspelled token repaired to the expected spelling",
                "Fix the spelling in the source to silence the warning",
            ),
            ErrorMetadata::new(
                "W061",
                "Neutralizer",
                Severity::Low,
                true,
                false,
                "Too many warnings; further warnings are dropped",
                "Fix the reported warnings first",
            ),
            // Success
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed successfully",
                "Continue with normal operations",
            ),
            ErrorMetadata::new(
                "I010",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Grammar graph constructed and validated",
                "Continue to syntax analysis",
            ),
            ErrorMetadata::new(
                "I011",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Syntax analysis completed successfully",
                "Hand the parse tree to the type checker",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
