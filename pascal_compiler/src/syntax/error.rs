//! Syntax analysis errors
//!
//! Every variant maps onto a registered code so failures can be logged and
//! classified the same way as the rest of the front end.

use crate::grammar::GrammarError;
use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenId};
use crate::utils::Position;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token: expected {expected}, found {actual}")]
    UnexpectedToken {
        expected: TokenId,
        actual: Token,
        position: Position,
        rule: Option<String>,
    },

    #[error("Unexpected end of input: expected {expected} at {position}")]
    UnexpectedEndOfInput {
        expected: TokenId,
        position: Position,
        rule: Option<String>,
    },

    #[error("Empty token stream - no tokens to parse")]
    EmptyTokenStream,

    #[error("Maximum recursion depth {limit} exceeded in rule '{rule}' at {position}")]
    MaxRecursionDepth {
        rule: String,
        limit: usize,
        position: Position,
    },

    #[error("Token limit of {limit} exceeded at {position}")]
    TokenLimitExceeded { limit: usize, position: Position },

    #[error("Rule '{name}' was declared but never defined")]
    UndefinedRule { name: String },

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("Internal parser error: {message}")]
    InternalParserError { message: String },
}

impl SyntaxError {
    /// Error for a token that could not be matched or repaired
    pub fn unexpected(expected: TokenId, actual: Token, rule: Option<String>) -> Self {
        if actual.is_eof() && expected != TokenId::Eof {
            return Self::UnexpectedEndOfInput {
                expected,
                position: actual.position(),
                rule,
            };
        }

        Self::UnexpectedToken {
            expected,
            position: actual.position(),
            actual,
            rule,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::EmptyTokenStream => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::TokenLimitExceeded { .. } => codes::syntax::TOKEN_LIMIT_EXCEEDED,
            Self::UndefinedRule { .. } => codes::syntax::UNDEFINED_RULE,
            Self::Grammar(error) => error.error_code(),
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    /// Source position of the failure, if it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position, .. }
            | Self::MaxRecursionDepth { position, .. }
            | Self::TokenLimitExceeded { position, .. } => Some(*position),
            Self::EmptyTokenStream
            | Self::UndefinedRule { .. }
            | Self::Grammar(_)
            | Self::InternalParserError { .. } => None,
        }
    }

    /// Innermost named rule that was being parsed
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::UnexpectedToken { rule, .. } | Self::UnexpectedEndOfInput { rule, .. } => {
                rule.as_deref()
            }
            Self::MaxRecursionDepth { rule, .. } => Some(rule),
            _ => None,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// Message with the registry's recommended action appended
    pub fn enhanced_message(&self) -> String {
        match self {
            Self::UnexpectedToken {
                expected,
                actual,
                rule: Some(rule),
                ..
            } => format!(
                "Expected {} in {} but found '{}'. {}",
                expected,
                rule,
                actual.text(),
                self.recommended_action()
            ),
            Self::UnexpectedToken {
                expected, actual, ..
            } => format!(
                "Expected {} but found '{}'. {}",
                expected,
                actual.text(),
                self.recommended_action()
            ),
            Self::UnexpectedEndOfInput { expected, .. } => format!(
                "Unexpected end of input while expecting {}. {}",
                expected,
                self.recommended_action()
            ),
            _ => format!("{} ({})", self, self.recommended_action()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_unexpected_uses_token_position() {
        let actual = Token::new(TokenId::UserDefined, "x", Position::new(3, 5, 6));
        let error = SyntaxError::unexpected(TokenId::Then, actual.clone(), None);

        assert_matches!(&error, SyntaxError::UnexpectedToken { expected: TokenId::Then, .. });
        assert_eq!(error.position(), Some(Position::new(3, 5, 6)));
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_TOKEN);
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_eof_becomes_end_of_input() {
        let eof = Token::end_of_stream(Position::new(4, 1, 1));
        let error = SyntaxError::unexpected(TokenId::End, eof, Some("composite-operator".into()));

        assert_matches!(error, SyntaxError::UnexpectedEndOfInput { expected: TokenId::End, .. });
        assert_eq!(error.rule(), Some("composite-operator"));
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_END_OF_INPUT);
    }

    #[test]
    fn test_expected_eof_stays_unexpected_token() {
        let eof = Token::end_of_stream(Position::new(4, 1, 1));
        let error = SyntaxError::unexpected(TokenId::Eof, eof, None);
        assert_matches!(error, SyntaxError::UnexpectedToken { .. });
    }

    #[test]
    fn test_fatal_errors_halt() {
        let error = SyntaxError::MaxRecursionDepth {
            rule: "expression".into(),
            limit: 10,
            position: Position::new(1, 1, 2),
        };
        assert!(error.requires_halt());
        assert!(!error.is_recoverable());
        assert_eq!(error.rule(), Some("expression"));
    }

    #[test]
    fn test_enhanced_message_names_rule() {
        let actual = Token::new(TokenId::UserDefined, "x", Position::new(1, 1, 2));
        let error = SyntaxError::unexpected(TokenId::Then, actual, Some("if".into()));
        assert!(error.enhanced_message().starts_with("Expected then in if but found 'x'."));
    }
}
