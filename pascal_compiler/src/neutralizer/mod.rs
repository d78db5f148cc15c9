//! Syntax neutralizer
//!
//! When the parser expects one token kind and reads another, the neutralizer
//! decides whether the token is a near-miss spelling of the expected keyword
//! or symbol. Near misses are rewritten to the expected token so parsing can
//! continue; the repair is reported as a warning.
//!
//! Kinds whose text is arbitrary (identifiers, literals, end of stream) can
//! never be guessed. Very short spellings are never repaired either, since
//! almost any text is within a small edit distance of them.

use crate::config::compile_time::neutralizer::{DEFAULT_MAX_EDIT_DISTANCE, MIN_REPAIRABLE_SPELLING};
use crate::config::RuntimeConfig;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenId};
use thiserror::Error;

/// Result of a successful neutralization
#[derive(Debug, Clone, PartialEq)]
pub enum Neutralized {
    /// The token already had the expected kind
    Exact(Token),
    /// The token was a near miss and has been rewritten
    Fixed { original: Token, corrected: Token },
}

impl Neutralized {
    /// Token to use downstream
    pub fn token(&self) -> &Token {
        match self {
            Neutralized::Exact(token) => token,
            Neutralized::Fixed { corrected, .. } => corrected,
        }
    }

    pub fn into_token(self) -> Token {
        match self {
            Neutralized::Exact(token) => token,
            Neutralized::Fixed { corrected, .. } => corrected,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Neutralized::Fixed { .. })
    }
}

/// Why a mismatch could not be repaired
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnfixableReason {
    #[error("{0} cannot be guessed from its spelling")]
    ValueCarrying(TokenId),

    #[error("spelling '{spelling}' is too short to repair")]
    TooShort { spelling: &'static str },

    #[error("edit distance {distance} exceeds {max}")]
    TooDistant { distance: usize, max: usize },
}

/// A mismatch the neutralizer refused to repair
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {actual}: {reason}")]
pub struct Unfixable {
    pub expected: TokenId,
    pub actual: Token,
    pub reason: UnfixableReason,
}

impl Unfixable {
    pub fn error_code(&self) -> Code {
        codes::neutralizer::UNFIXABLE_TOKEN
    }
}

/// Edit-distance based token repair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neutralizer {
    max_distance: usize,
}

impl Neutralizer {
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    /// Neutralizer using the configured distance, or exact matching when repairs are off
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.effective_edit_distance())
    }

    /// Only exact matches succeed
    pub fn strict() -> Self {
        Self::new(0)
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Match `actual` against the `expected` kind, repairing near misses
    pub fn neutralize(&self, expected: TokenId, actual: &Token) -> Result<Neutralized, Unfixable> {
        if actual.id == expected {
            return Ok(Neutralized::Exact(actual.clone()));
        }

        let unfixable = |reason| Unfixable {
            expected,
            actual: actual.clone(),
            reason,
        };

        if expected.is_value_carrying() {
            return Err(unfixable(UnfixableReason::ValueCarrying(expected)));
        }

        let spelling = match expected.spelling() {
            Some(spelling) => spelling,
            None => return Err(unfixable(UnfixableReason::ValueCarrying(expected))),
        };

        let length = spelling.chars().count();
        if length < MIN_REPAIRABLE_SPELLING || length <= self.max_distance {
            return Err(unfixable(UnfixableReason::TooShort { spelling }));
        }

        let distance = strsim::levenshtein(spelling, actual.text());
        if distance > self.max_distance {
            return Err(unfixable(UnfixableReason::TooDistant {
                distance,
                max: self.max_distance,
            }));
        }

        Ok(Neutralized::Fixed {
            original: actual.clone(),
            corrected: actual.respelled(expected),
        })
    }
}

impl Default for Neutralizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EDIT_DISTANCE)
    }
}
