//! Grammar graph and combinator engine
//!
//! A [`Grammar`] is an arena of [`Rule`]s built from five combinators:
//! token, sequence, either, optional and several. [`BuildContext`] runs a
//! rule against a transactional token channel and produces an AST.

pub mod build;
pub mod definitions;
pub mod rule;

pub use build::{BuildContext, BuildStats, Outcome, Repair, UnexpectedToken};
pub use rule::{Grammar, GrammarError, Rule, RuleId, RuleKind};
