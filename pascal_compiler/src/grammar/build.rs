//! Running grammar rules over a token channel
//!
//! Each rule invocation runs inside its own channel transaction. A rule that
//! does not match rolls its transaction back, so a failed subtree never moves
//! the channel. Only `Either`, `Optional` and `Several` look at a `NoMatch`;
//! `Fatal` passes through everything.

use super::rule::{Grammar, RuleId, RuleKind};
use crate::ast::{Markers, Node};
use crate::config::compile_time::syntax::{
    MAX_CONTEXT_STACK_DEPTH, MAX_PARSE_DEPTH, MAX_TOKEN_COUNT,
};
use crate::neutralizer::{Neutralized, Neutralizer};
use crate::syntax::SyntaxError;
use crate::tokens::{Token, TokenId, TxChannel};
use crate::log_debug;
use serde::Serialize;
use std::fmt;

/// A token that did not match what a rule expected
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    pub expected: TokenId,
    pub actual: Token,
    /// Innermost named rule that was being built
    pub rule: Option<String>,
}

impl UnexpectedToken {
    fn within(mut self, rule: Option<&str>) -> Self {
        if self.rule.is_none() {
            self.rule = rule.map(str::to_string);
        }
        self
    }
}

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.actual)?;
        if let Some(rule) = &self.rule {
            write!(f, " in {}", rule)?;
        }
        Ok(())
    }
}

impl From<UnexpectedToken> for SyntaxError {
    fn from(unexpected: UnexpectedToken) -> Self {
        SyntaxError::unexpected(unexpected.expected, unexpected.actual, unexpected.rule)
    }
}

/// Result of building one rule
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The rule matched; `None` when it matched nothing
    Matched(Option<Node>),
    /// The rule did not match; the channel is unchanged
    NoMatch(UnexpectedToken),
    /// Parsing cannot continue
    Fatal(SyntaxError),
}

impl Outcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched(_))
    }

    /// Collapse into a result, turning a no-match into a syntax error
    pub fn into_result(self) -> Result<Option<Node>, SyntaxError> {
        match self {
            Outcome::Matched(node) => Ok(node),
            Outcome::NoMatch(unexpected) => Err(unexpected.into()),
            Outcome::Fatal(error) => Err(error),
        }
    }
}

/// A token rewritten by the neutralizer on the accepted parse path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repair {
    pub original: Token,
    pub corrected: Token,
    pub rule: Option<String>,
}

/// Counters collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rules_invoked: usize,
    pub tokens_read: usize,
    pub backtracks: usize,
    pub max_depth: usize,
}

/// Mutable state of one parse
pub struct BuildContext<'g> {
    grammar: &'g Grammar,
    neutralizer: Neutralizer,
    repairs: Vec<Repair>,
    scope: Vec<&'g str>,
    depth: usize,
    stats: BuildStats,
    trace_rules: bool,
}

impl<'g> BuildContext<'g> {
    pub fn new(grammar: &'g Grammar, neutralizer: Neutralizer) -> Self {
        Self {
            grammar,
            neutralizer,
            repairs: Vec::new(),
            scope: Vec::new(),
            depth: 0,
            stats: BuildStats::default(),
            trace_rules: false,
        }
    }

    /// Log every rule entry at debug level
    pub fn with_tracing(mut self, trace_rules: bool) -> Self {
        self.trace_rules = trace_rules;
        self
    }

    pub fn repairs(&self) -> &[Repair] {
        &self.repairs
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn into_parts(self) -> (Vec<Repair>, BuildStats) {
        (self.repairs, self.stats)
    }

    /// Build `id` inside a fresh channel transaction
    pub fn build<I>(&mut self, id: RuleId, channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        let grammar = self.grammar;
        let rule = match grammar.get(id) {
            Some(rule) => rule,
            None => return Outcome::Fatal(SyntaxError::internal(&format!("unknown rule {}", id))),
        };

        if self.depth >= MAX_PARSE_DEPTH {
            return Outcome::Fatal(SyntaxError::MaxRecursionDepth {
                rule: self.scope_path(),
                limit: MAX_PARSE_DEPTH,
                position: channel.last_position(),
            });
        }

        self.depth += 1;
        self.stats.rules_invoked += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        if let Some(name) = rule.name() {
            self.scope.push(name);
            if self.trace_rules {
                log_debug!("Entering rule",
                    "rule" => name,
                    "depth" => self.depth,
                    "scope" => self.scope_path(),
                    "token_index" => channel.position()
                );
            }
        }

        let repairs_before = self.repairs.len();
        channel.start_tx();

        let outcome = match &rule.kind {
            RuleKind::Token(expected) => self.build_token(*expected, channel),
            RuleKind::Sequence(items) => self.build_sequence(items, channel),
            RuleKind::Either(alternatives) => self.build_either(alternatives, channel),
            RuleKind::Optional(inner) => self.build_optional(*inner, channel),
            RuleKind::Several(inner) => self.build_several(*inner, channel),
            RuleKind::Placeholder => Outcome::Fatal(SyntaxError::UndefinedRule {
                name: rule.name().unwrap_or("<anonymous>").to_string(),
            }),
        };

        let outcome = match outcome {
            Outcome::Matched(node) => {
                channel.commit();
                Outcome::Matched(node.map(|node| node.wrap(&rule.markers)))
            }
            Outcome::NoMatch(unexpected) => {
                channel.rollback();
                self.repairs.truncate(repairs_before);
                self.stats.backtracks += 1;
                Outcome::NoMatch(unexpected.within(rule.name()))
            }
            Outcome::Fatal(error) => {
                channel.rollback();
                Outcome::Fatal(error)
            }
        };

        if rule.name().is_some() {
            self.scope.pop();
        }
        self.depth -= 1;
        outcome
    }

    fn build_token<I>(&mut self, expected: TokenId, channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        let actual = match channel.read() {
            Some(token) => token,
            None => {
                return Outcome::NoMatch(UnexpectedToken {
                    expected,
                    actual: Token::end_of_stream(channel.end_position()),
                    rule: None,
                })
            }
        };
        self.stats.tokens_read += 1;

        if channel.position() > MAX_TOKEN_COUNT {
            return Outcome::Fatal(SyntaxError::TokenLimitExceeded {
                limit: MAX_TOKEN_COUNT,
                position: actual.position(),
            });
        }

        match self.neutralizer.neutralize(expected, &actual) {
            Ok(Neutralized::Exact(token)) => Outcome::Matched(Some(Node::token(token))),
            Ok(Neutralized::Fixed {
                original,
                corrected,
            }) => {
                log_debug!("Token neutralized",
                    "from" => original.text(),
                    "to" => corrected.text(),
                    "position" => original.position()
                );
                self.repairs.push(Repair {
                    original,
                    corrected: corrected.clone(),
                    rule: self.scope.last().map(|name| name.to_string()),
                });
                Outcome::Matched(Some(Node::token(corrected)))
            }
            Err(unfixable) => {
                if self.trace_rules {
                    log_debug!("Token rejected",
                        "reason" => &unfixable,
                        "scope" => self.scope_path()
                    );
                }
                Outcome::NoMatch(UnexpectedToken {
                    expected,
                    actual: unfixable.actual,
                    rule: None,
                })
            }
        }
    }

    fn build_sequence<I>(&mut self, items: &[RuleId], channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        let mut children = Vec::with_capacity(items.len());
        for &item in items {
            match self.build(item, channel) {
                Outcome::Matched(Some(node)) => children.push(node),
                Outcome::Matched(None) => {}
                failed => return failed,
            }
        }
        Outcome::Matched(Node::from_children(children, &Markers::new()))
    }

    fn build_either<I>(&mut self, alternatives: &[RuleId], channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        let mut last = None;
        for &alternative in alternatives {
            match self.build(alternative, channel) {
                Outcome::NoMatch(unexpected) => last = Some(unexpected),
                done => return done,
            }
        }

        match last {
            Some(unexpected) => Outcome::NoMatch(unexpected),
            None => Outcome::Fatal(SyntaxError::internal("choice without alternatives")),
        }
    }

    fn build_optional<I>(&mut self, inner: RuleId, channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        match self.build(inner, channel) {
            Outcome::NoMatch(_) => Outcome::Matched(None),
            done => done,
        }
    }

    fn build_several<I>(&mut self, inner: RuleId, channel: &mut TxChannel<I>) -> Outcome
    where
        I: Iterator<Item = Token>,
    {
        let mut items = Vec::new();
        loop {
            match self.build(inner, channel) {
                Outcome::Matched(Some(node)) => items.push(node),
                Outcome::Matched(None) => {}
                Outcome::NoMatch(_) => break,
                fatal @ Outcome::Fatal(_) => return fatal,
            }
        }
        Outcome::Matched(Node::from_children(items, &Markers::new()))
    }

    /// Innermost rule names, outermost first
    fn scope_path(&self) -> String {
        let start = self.scope.len().saturating_sub(MAX_CONTEXT_STACK_DEPTH);
        match self.scope.get(start..) {
            Some(names) if !names.is_empty() => names.join(" > "),
            _ => "<root>".to_string(),
        }
    }
}
