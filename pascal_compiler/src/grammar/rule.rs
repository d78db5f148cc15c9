//! Grammar rules and the rule arena
//!
//! Rules reference each other by [`RuleId`], an index into the owning
//! [`Grammar`]. Mutually recursive productions are wired in two phases:
//! `declare` reserves an id for a rule that is not written yet, and `define`
//! fills it in once everything it refers to exists.

use crate::ast::{Marker, Markers};
use crate::logging::{codes, Code};
use crate::tokens::TokenId;
use std::collections::HashMap;
use std::fmt;

/// Index of a rule inside its grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    /// One terminal
    Token(TokenId),
    /// All children in order
    Sequence(Vec<RuleId>),
    /// First alternative that matches
    Either(Vec<RuleId>),
    /// Inner rule or nothing
    Optional(RuleId),
    /// Inner rule zero or more times
    Several(RuleId),
    /// Declared, not yet defined
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: Option<String>,
    pub kind: RuleKind,
    pub markers: Markers,
}

impl Rule {
    fn of(kind: RuleKind) -> Self {
        Self {
            name: None,
            kind,
            markers: Markers::new(),
        }
    }

    pub fn token(id: TokenId) -> Self {
        Self::of(RuleKind::Token(id))
    }

    pub fn sequence(items: Vec<RuleId>) -> Self {
        Self::of(RuleKind::Sequence(items))
    }

    pub fn either(alternatives: Vec<RuleId>) -> Self {
        Self::of(RuleKind::Either(alternatives))
    }

    pub fn optional(inner: RuleId) -> Self {
        Self::of(RuleKind::Optional(inner))
    }

    pub fn several(inner: RuleId) -> Self {
        Self::of(RuleKind::Several(inner))
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Add markers applied to whatever node this rule produces
    pub fn marked<const N: usize>(mut self, markers: [Marker; N]) -> Self {
        self.markers = self.markers.merge(&Markers::from(markers));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rule ids this rule refers to
    pub fn references(&self) -> Vec<RuleId> {
        match &self.kind {
            RuleKind::Sequence(items) | RuleKind::Either(items) => items.clone(),
            RuleKind::Optional(inner) | RuleKind::Several(inner) => vec![*inner],
            RuleKind::Token(_) | RuleKind::Placeholder => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("Rule '{name}' was declared but never defined")]
    UndefinedRule { name: String },

    #[error("Rule {id} is already defined")]
    AlreadyDefined { id: RuleId },

    #[error("Rule {id} refers to missing rule {target}")]
    DanglingReference { id: RuleId, target: RuleId },

    #[error("Choice '{name}' has no alternatives")]
    EmptyChoice { name: String },

    #[error("Repetition '{name}' can match without consuming input")]
    NullableRepetition { name: String },

    #[error("Grammar has no root rule")]
    MissingRoot,
}

impl GrammarError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UndefinedRule { .. } => codes::syntax::UNDEFINED_RULE,
            _ => codes::syntax::INVALID_GRAMMAR,
        }
    }
}

/// Arena of rules with an optional root
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    names: HashMap<String, RuleId>,
    root: Option<RuleId>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished rule
    pub fn add(&mut self, rule: Rule) -> RuleId {
        let id = RuleId(self.rules.len());
        if let Some(name) = &rule.name {
            self.names.entry(name.clone()).or_insert(id);
        }
        self.rules.push(rule);
        id
    }

    /// Reserve an id for a rule defined later
    pub fn declare(&mut self, name: &str) -> RuleId {
        self.add(Rule::of(RuleKind::Placeholder).named(name))
    }

    /// Fill in a declared rule; an unnamed rule keeps the declared name
    pub fn define(&mut self, id: RuleId, mut rule: Rule) -> Result<(), GrammarError> {
        let slot = self
            .rules
            .get_mut(id.0)
            .ok_or(GrammarError::DanglingReference { id, target: id })?;

        if slot.kind != RuleKind::Placeholder {
            return Err(GrammarError::AlreadyDefined { id });
        }

        if rule.name.is_none() {
            rule.name = slot.name.take();
        } else if let Some(name) = &rule.name {
            self.names.entry(name.clone()).or_insert(id);
        }

        *slot = rule;
        Ok(())
    }

    /// Terminal rule without markers
    pub fn token(&mut self, id: TokenId) -> RuleId {
        self.add(Rule::token(id))
    }

    /// Terminal rule carrying `markers`
    pub fn marked_token<const N: usize>(&mut self, id: TokenId, markers: [Marker; N]) -> RuleId {
        self.add(Rule::token(id).marked(markers))
    }

    pub fn sequence(&mut self, items: Vec<RuleId>) -> RuleId {
        self.add(Rule::sequence(items))
    }

    pub fn either(&mut self, alternatives: Vec<RuleId>) -> RuleId {
        self.add(Rule::either(alternatives))
    }

    pub fn optional(&mut self, inner: RuleId) -> RuleId {
        self.add(Rule::optional(inner))
    }

    pub fn several(&mut self, inner: RuleId) -> RuleId {
        self.add(Rule::several(inner))
    }

    pub fn set_root(&mut self, id: RuleId) {
        self.root = Some(id);
    }

    pub fn root(&self) -> Option<RuleId> {
        self.root
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    /// Look up a named rule
    pub fn rule_by_name(&self, name: &str) -> Option<RuleId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check that the grammar is complete and every repetition consumes input
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.root.is_none() {
            return Err(GrammarError::MissingRoot);
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let id = RuleId(index);
            let label = || rule.name().unwrap_or("<anonymous>").to_string();

            match &rule.kind {
                RuleKind::Placeholder => return Err(GrammarError::UndefinedRule { name: label() }),
                RuleKind::Either(alternatives) if alternatives.is_empty() => {
                    return Err(GrammarError::EmptyChoice { name: label() })
                }
                _ => {}
            }

            if let Some(target) = rule.references().into_iter().find(|t| t.0 >= self.rules.len()) {
                return Err(GrammarError::DanglingReference { id, target });
            }
        }

        let nullable = self.nullable_rules();
        for rule in &self.rules {
            if let RuleKind::Several(inner) = rule.kind {
                if nullable[inner.0] {
                    return Err(GrammarError::NullableRepetition {
                        name: rule.name().unwrap_or("<anonymous>").to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Fixpoint over rules that can succeed without reading a token
    fn nullable_rules(&self) -> Vec<bool> {
        let mut nullable = vec![false; self.rules.len()];
        let mut changed = true;

        while changed {
            changed = false;
            for (index, rule) in self.rules.iter().enumerate() {
                if nullable[index] {
                    continue;
                }
                let value = match &rule.kind {
                    RuleKind::Token(_) | RuleKind::Placeholder => false,
                    RuleKind::Optional(_) | RuleKind::Several(_) => true,
                    RuleKind::Sequence(items) => items.iter().all(|item| nullable[item.0]),
                    RuleKind::Either(items) => items.iter().any(|item| nullable[item.0]),
                };
                if value {
                    nullable[index] = true;
                    changed = true;
                }
            }
        }

        nullable
    }
}
