//! Token and literal value types
//!
//! Tokens are produced by the scanner and consumed read-only by the parser.
//! The neutralizer may replace a token with a corrected copy; the original is
//! never mutated.
use super::id::TokenId;
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw source text of a token and where it was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub position: Position,
}

impl Literal {
    pub fn new(value: impl Into<String>, position: Position) -> Self {
        Self {
            value: value.into(),
            position,
        }
    }
}

/// A classified token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub literal: Literal,
}

impl Token {
    pub fn new(id: TokenId, value: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            literal: Literal::new(value, position),
        }
    }

    /// Token spelled exactly as its id's canonical spelling
    pub fn keyword(id: TokenId, position: Position) -> Self {
        Self::new(id, id.spelling().unwrap_or_default(), position)
    }

    /// End-of-stream marker
    pub fn end_of_stream(position: Position) -> Self {
        Self::new(TokenId::Eof, "", position)
    }

    pub fn text(&self) -> &str {
        &self.literal.value
    }

    pub fn position(&self) -> Position {
        self.literal.position
    }

    pub fn is_eof(&self) -> bool {
        self.id == TokenId::Eof
    }

    /// Copy of this token re-classified as `id` with its canonical spelling
    pub fn respelled(&self, id: TokenId) -> Self {
        Self::new(id, id.spelling().unwrap_or_default(), self.position())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "{} at {}", self.id, self.position())
        } else {
            write!(f, "{} '{}' at {}", self.id, self.text(), self.position())
        }
    }
}

/// Lays tokens out left to right on consecutive columns.
///
/// Handy for driving the parser without a scanner: each pushed token starts
/// one column after the previous one ends, and `newline` moves to the next
/// line.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    tokens: Vec<Token>,
    line: u32,
    column: u32,
    identifiers: usize,
}

impl TokenBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            line: 1,
            column: 1,
            identifiers: 0,
        }
    }

    /// Build a stream from bare ids, inventing text for value-carrying ids
    pub fn from_ids(ids: &[TokenId]) -> Vec<Token> {
        Self::new().ids(ids).build()
    }

    /// Push several tokens via [`TokenBuilder::id`]
    pub fn ids(self, ids: &[TokenId]) -> Self {
        ids.iter().fold(self, |builder, &id| builder.id(id))
    }

    /// Push a token; spelled ids use their canonical spelling
    pub fn id(self, id: TokenId) -> Self {
        let text = match id {
            TokenId::UserDefined => format!("id{}", self.identifiers),
            TokenId::IntLiteral => "1".to_string(),
            TokenId::DoubleLiteral => "1.0".to_string(),
            TokenId::BoolLiteral => "true".to_string(),
            TokenId::Eof | TokenId::Unknown => String::new(),
            spelled => spelled.spelling().unwrap_or_default().to_string(),
        };
        self.text(id, &text)
    }

    /// Push a token with explicit text
    pub fn text(mut self, id: TokenId, text: &str) -> Self {
        let width = text.chars().count().max(1) as u32;
        let position = Position::new(self.line, self.column, self.column + width);
        if id == TokenId::UserDefined {
            self.identifiers += 1;
        }
        self.tokens.push(Token::new(id, text, position));
        self.column += width + 1;
        self
    }

    pub fn ident(self, name: &str) -> Self {
        self.text(TokenId::UserDefined, name)
    }

    pub fn int(self, value: &str) -> Self {
        self.text(TokenId::IntLiteral, value)
    }

    pub fn newline(mut self) -> Self {
        self.line += 1;
        self.column = 1;
        self
    }

    /// Finish the stream, appending an end-of-stream token if missing
    pub fn build(mut self) -> Vec<Token> {
        if !self.tokens.last().map(Token::is_eof).unwrap_or(false) {
            let position = Position::new(self.line, self.column, self.column + 1);
            self.tokens.push(Token::end_of_stream(position));
        }
        self.tokens
    }

    /// Finish the stream exactly as pushed
    pub fn build_raw(self) -> Vec<Token> {
        self.tokens
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_positions() {
        let tokens = TokenBuilder::new()
            .id(TokenId::Program)
            .ident("hello")
            .id(TokenId::Semicolon)
            .newline()
            .id(TokenId::Begin)
            .build();

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0].position(), Position::new(1, 1, 8));
        assert_eq!(tokens[1].position(), Position::new(1, 9, 14));
        assert_eq!(tokens[2].position(), Position::new(1, 15, 16));
        assert_eq!(tokens[3].position(), Position::new(2, 1, 6));
        assert!(tokens[4].is_eof());
    }

    #[test]
    fn test_from_ids_invents_values() {
        let tokens = TokenBuilder::from_ids(&[
            TokenId::UserDefined,
            TokenId::UserDefined,
            TokenId::IntLiteral,
            TokenId::Eof,
        ]);

        assert_eq!(tokens[0].text(), "id0");
        assert_eq!(tokens[1].text(), "id1");
        assert_eq!(tokens[2].text(), "1");
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_respelled_keeps_position() {
        let typo = Token::new(TokenId::UserDefined, "the", Position::new(4, 2, 5));
        let fixed = typo.respelled(TokenId::Then);

        assert_eq!(fixed.id, TokenId::Then);
        assert_eq!(fixed.text(), "then");
        assert_eq!(fixed.position(), typo.position());
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenId::UserDefined, "x", Position::new(1, 3, 4));
        assert_eq!(token.to_string(), "<user defined> 'x' at 1:3");
        let eof = Token::end_of_stream(Position::new(2, 1, 2));
        assert_eq!(eof.to_string(), "<EOF> at 2:1");
    }
}
