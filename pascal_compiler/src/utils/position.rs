//! Source location tracking
//!
//! Positions are reported by the scanner for every token and joined by the
//! AST to cover whole subtrees. Lines and columns are 1-based; the end column
//! is exclusive.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A range of source text.
///
/// Token positions always sit on one line (`end_line == line`). Joined
/// positions of branch nodes may cover several lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line of the first character
    pub line: u32,
    /// Column of the first character
    pub start_col: u32,
    /// Line of the last character
    pub end_line: u32,
    /// Column one past the last character
    pub end_col: u32,
}

impl Position {
    /// Create a single-line position
    pub fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            line,
            start_col,
            end_line: line,
            end_col,
        }
    }

    /// Create a position that may span several lines
    pub fn spanning(line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Zero-width position directly after this one
    pub fn following(&self) -> Self {
        Self::new(self.end_line, self.end_col, self.end_col)
    }

    /// True when this position starts strictly before `other`
    pub fn before(&self, other: &Position) -> bool {
        (self.line, self.start_col) < (other.line, other.start_col)
    }

    /// True when this position starts strictly after `other`
    pub fn after(&self, other: &Position) -> bool {
        other.before(self)
    }

    /// Smallest position covering both `self` and `other`
    pub fn join(&self, other: &Position) -> Position {
        let (line, start_col) = if other.before(self) {
            (other.line, other.start_col)
        } else {
            (self.line, self.start_col)
        };

        let (end_line, end_col) = if (other.end_line, other.end_col) > (self.end_line, self.end_col)
        {
            (other.end_line, other.end_col)
        } else {
            (self.end_line, self.end_col)
        };

        Position {
            line,
            start_col,
            end_line,
            end_col,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.end_line != self.line
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(
                f,
                "{}:{}-{}:{}",
                self.line, self.start_col, self.end_line, self.end_col
            )
        } else if self.end_col == self.start_col + 1 {
            write!(f, "{}:{}", self.line, self.start_col)
        } else {
            write!(f, "{}:{}-{}", self.line, self.start_col, self.end_col)
        }
    }
}
