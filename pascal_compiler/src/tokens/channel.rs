//! Transactional token channel
//!
//! Wraps a forward-only token source and lets the parser unread tokens.
//! Every token pulled from the source is appended to a buffer; a cursor
//! indexes the next token to hand out. Transactions record the cursor at
//! their start, so rolling back is moving the cursor back and committing is
//! forgetting the start index.
//!
//! Committing an inner transaction folds its reads into the enclosing one:
//! if the enclosing transaction later rolls back, those tokens are replayed
//! too. Only committing the outermost transaction consumes tokens for good,
//! at which point they are dropped from the buffer.
//!
//! Whitespace tokens coming from the scanner are skipped.

use super::token::Token;
use crate::utils::Position;

/// Replayable reader over a token source
#[derive(Debug)]
pub struct TxChannel<I: Iterator<Item = Token>> {
    source: I,
    /// Tokens from `base` onward that may still be replayed
    buffer: Vec<Token>,
    /// Absolute index of `buffer[0]`
    base: usize,
    /// Absolute index of the next token to read
    cursor: usize,
    /// Absolute start index of each open transaction, innermost last
    transactions: Vec<usize>,
    /// Absolute count of permanently consumed tokens
    committed: usize,
    exhausted: bool,
    last_position: Position,
}

impl<I: Iterator<Item = Token>> TxChannel<I> {
    /// Wrap any token source, e.g. a `Vec<Token>` or an mpsc `Receiver<Token>`
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<Item = Token, IntoIter = I>,
    {
        Self {
            source: source.into_iter(),
            buffer: Vec::new(),
            base: 0,
            cursor: 0,
            transactions: Vec::new(),
            committed: 0,
            exhausted: false,
            last_position: Position::default(),
        }
    }

    /// Next token, replayed from the buffer or pulled from the source.
    ///
    /// Opens a transaction if none is active. Returns `None` once the
    /// source is exhausted and nothing is left to replay.
    pub fn read(&mut self) -> Option<Token> {
        if self.transactions.is_empty() {
            self.transactions.push(self.cursor);
        }

        if !self.fill() {
            return None;
        }

        let token = self.buffer[self.cursor - self.base].clone();
        self.cursor += 1;
        self.last_position = token.position();
        Some(token)
    }

    /// True while another token can be read.
    ///
    /// May pull one token from the source into the buffer.
    pub fn is_open(&mut self) -> bool {
        self.fill()
    }

    /// Open a nested transaction
    pub fn start_tx(&mut self) -> &mut Self {
        self.transactions.push(self.cursor);
        self
    }

    /// Close the innermost transaction keeping its reads
    pub fn commit(&mut self) {
        if self.transactions.pop().is_none() {
            return;
        }

        if self.transactions.is_empty() {
            self.committed = self.cursor;
            self.compact();
        }
    }

    /// Close the innermost transaction and replay its reads
    pub fn rollback(&mut self) {
        if let Some(start) = self.transactions.pop() {
            self.cursor = start;
        }
    }

    /// Number of open transactions
    pub fn depth(&self) -> usize {
        self.transactions.len()
    }

    /// Number of tokens read so far, counting replays once
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of tokens permanently consumed
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Position of the most recently read token
    pub fn last_position(&self) -> Position {
        self.last_position
    }

    /// Position just past the furthest token seen, used for a missing end of stream
    pub fn end_position(&self) -> Position {
        self.buffer
            .last()
            .map(Token::position)
            .unwrap_or(self.last_position)
            .following()
    }

    /// Make sure `buffer` holds the token at `cursor`
    fn fill(&mut self) -> bool {
        while self.cursor - self.base >= self.buffer.len() {
            if self.exhausted {
                return false;
            }
            match self.source.next() {
                Some(token) if token.id.is_whitespace() => continue,
                Some(token) => self.buffer.push(token),
                None => self.exhausted = true,
            }
        }
        true
    }

    fn compact(&mut self) {
        let consumed = self.committed - self.base;
        if consumed > 0 {
            self.buffer.drain(..consumed);
            self.base = self.committed;
        }
    }
}
