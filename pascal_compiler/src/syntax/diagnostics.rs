//! Non-fatal findings collected during an analysis

use crate::config::compile_time::logging::MAX_WARNINGS_PER_ANALYSIS;
use crate::grammar::Repair;
use crate::logging::{codes, Code, LogLevel};
use crate::log_warning;
use crate::utils::Position;
use std::fmt;

/// Front-end stage a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Neutralizer,
    Syntax,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Neutralizer => "NEUTRALIZER",
            Stage::Syntax => "SYNTAX",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub severity: LogLevel,
    pub code: Code,
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(stage: Stage, code: Code, position: Position, message: impl Into<String>) -> Self {
        Self {
            stage,
            severity: LogLevel::Warning,
            code,
            position,
            message: message.into(),
        }
    }

    /// Warning for a token the neutralizer rewrote
    pub fn from_repair(repair: &Repair) -> Self {
        let mut message = format!(
            "'{}' was read as '{}'",
            repair.original.text(),
            repair.corrected.text()
        );
        if let Some(rule) = &repair.rule {
            message.push_str(&format!(" in {}", rule));
        }

        Self::warning(
            Stage::Neutralizer,
            codes::neutralizer::TOKEN_REPAIRED,
            repair.original.position(),
            message,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.stage.as_str(), self.position, self.message)
    }
}

/// Ordered diagnostics, capped per analysis.
///
/// Once the cap is hit one `WARNING_LIMIT_REACHED` entry is appended and
/// everything after it is counted but dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    dropped: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic; false when it was dropped because of the cap
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.entries.len() < MAX_WARNINGS_PER_ANALYSIS {
            self.entries.push(diagnostic);
            return true;
        }

        if self.dropped == 0 {
            log_warning!(codes::neutralizer::WARNING_LIMIT_REACHED, "Warning limit reached",
                "limit" => MAX_WARNINGS_PER_ANALYSIS
            );
            self.entries.push(Diagnostic::warning(
                Stage::Syntax,
                codes::neutralizer::WARNING_LIMIT_REACHED,
                diagnostic.position,
                format!("more than {} warnings, the rest are omitted", MAX_WARNINGS_PER_ANALYSIS),
            ));
        }
        self.dropped += 1;
        false
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics that did not fit under the cap
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Entries ordered by start position; equal positions keep insertion order
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            if a.position.before(&b.position) {
                std::cmp::Ordering::Less
            } else if b.position.before(&a.position) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
        sorted
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in self.sorted() {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenId};

    fn at(line: u32, column: u32, message: &str) -> Diagnostic {
        Diagnostic::warning(
            Stage::Syntax,
            codes::neutralizer::TOKEN_REPAIRED,
            Position::new(line, column, column + 4),
            message,
        )
    }

    #[test]
    fn test_display() {
        assert_eq!(at(3, 5, "odd").to_string(), "SYNTAX 3:5-9: odd");
    }

    #[test]
    fn test_sorted_is_stable() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(at(2, 1, "second"));
        diagnostics.push(at(1, 4, "first"));
        diagnostics.push(at(2, 1, "third"));

        let messages: Vec<&str> = diagnostics
            .sorted()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);

        let insertion: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(insertion, vec!["second", "first", "third"]);
    }

    #[test]
    fn test_cap_adds_single_limit_entry() {
        let mut diagnostics = Diagnostics::new();
        for i in 0..MAX_WARNINGS_PER_ANALYSIS {
            assert!(diagnostics.push(at(1, i as u32 + 1, "w")));
        }
        assert!(!diagnostics.push(at(9, 1, "over")));
        assert!(!diagnostics.push(at(9, 2, "over")));

        assert_eq!(diagnostics.len(), MAX_WARNINGS_PER_ANALYSIS + 1);
        assert_eq!(diagnostics.dropped(), 2);
        let limit_entries = diagnostics
            .iter()
            .filter(|d| d.code == codes::neutralizer::WARNING_LIMIT_REACHED)
            .count();
        assert_eq!(limit_entries, 1);
    }

    #[test]
    fn test_from_repair() {
        let original = Token::new(TokenId::UserDefined, "thn", Position::new(2, 9, 12));
        let repair = Repair {
            corrected: original.respelled(TokenId::Then),
            original,
            rule: Some("if".into()),
        };

        let diagnostic = Diagnostic::from_repair(&repair);
        assert_eq!(diagnostic.stage, Stage::Neutralizer);
        assert_eq!(diagnostic.severity, LogLevel::Warning);
        assert_eq!(diagnostic.to_string(), "NEUTRALIZER 2:9-12: 'thn' was read as 'then' in if");
    }
}
