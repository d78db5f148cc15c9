//! Syntax analysis - token stream to AST
//!
//! The driver runs the grammar's root rule over a transactional channel and
//! turns the outcome into either an [`Analysis`] or a [`SyntaxError`].
//! Neutralizer repairs on the accepted path become warning diagnostics.

pub mod diagnostics;
mod error;

pub use diagnostics::{Diagnostic, Diagnostics, Stage};
pub use error::{SyntaxError, SyntaxResult};

use crate::ast::Node;
use crate::config::RuntimeConfig;
use crate::grammar::{BuildContext, BuildStats, Grammar, GrammarError, Repair};
use crate::logging::codes;
use crate::neutralizer::Neutralizer;
use crate::tokens::{Token, TxChannel};
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Counters for one analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisStats {
    pub tokens_consumed: usize,
    pub fixes_applied: usize,
    pub rules_invoked: usize,
    pub backtracks: usize,
    pub max_depth: usize,
    pub duration: Duration,
}

impl AnalysisStats {
    fn new(build: &BuildStats, tokens_consumed: usize, fixes_applied: usize, duration: Duration) -> Self {
        Self {
            tokens_consumed,
            fixes_applied,
            rules_invoked: build.rules_invoked,
            backtracks: build.backtracks,
            max_depth: build.max_depth,
            duration,
        }
    }
}

/// Successful analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Root of the tree; `None` only if the root rule matched nothing
    pub root: Option<Node>,
    pub warnings: Diagnostics,
    pub repairs: Vec<Repair>,
    pub stats: AnalysisStats,
}

/// Analyze `tokens` with the built-in grammar and default preferences
pub fn analyze<T>(tokens: T) -> SyntaxResult<Analysis>
where
    T: IntoIterator<Item = Token>,
{
    let grammar = Grammar::pascal()?;
    analyze_with(tokens, &grammar, &RuntimeConfig::default())
}

/// Analyze `tokens` with a caller-owned grammar
pub fn analyze_with<T>(tokens: T, grammar: &Grammar, config: &RuntimeConfig) -> SyntaxResult<Analysis>
where
    T: IntoIterator<Item = Token>,
{
    let mut channel = TxChannel::new(tokens);
    analyze_channel(&mut channel, grammar, config)
}

/// Run the grammar's root rule over an existing channel
pub fn analyze_channel<I>(
    channel: &mut TxChannel<I>,
    grammar: &Grammar,
    config: &RuntimeConfig,
) -> SyntaxResult<Analysis>
where
    I: Iterator<Item = Token>,
{
    let started = Instant::now();

    grammar.validate()?;
    let root_rule = grammar.root().ok_or(GrammarError::MissingRoot)?;

    if !channel.is_open() {
        log_error!(codes::syntax::EMPTY_TOKEN_STREAM, "No tokens to analyze");
        return Err(SyntaxError::EmptyTokenStream);
    }

    log_debug!("Starting syntax analysis",
        "rules" => grammar.len(),
        "max_edit_distance" => config.effective_edit_distance()
    );

    let mut context = BuildContext::new(grammar, Neutralizer::from_config(config))
        .with_tracing(config.syntax.trace_rules);
    let outcome = context.build(root_rule, channel);
    let (repairs, build_stats) = context.into_parts();

    let root = match outcome.into_result() {
        Ok(root) => root,
        Err(error) => {
            match error.position() {
                Some(position) => log_error!(error.error_code(), &error.enhanced_message(),
                    position = position,
                    "rules_invoked" => build_stats.rules_invoked
                ),
                None => log_error!(error.error_code(), &error.enhanced_message(),
                    "rules_invoked" => build_stats.rules_invoked
                ),
            }
            return Err(error);
        }
    };

    let mut warnings = Diagnostics::new();
    if config.syntax.record_fixes {
        for repair in &repairs {
            log_warning!(codes::neutralizer::TOKEN_REPAIRED, "Token repaired",
                position = repair.original.position(),
                "original" => repair.original.text(),
                "corrected" => repair.corrected.text()
            );
            warnings.push(Diagnostic::from_repair(repair));
        }
    }

    let stats = AnalysisStats::new(&build_stats, channel.committed(), repairs.len(), started.elapsed());

    log_success!(codes::success::SYNTAX_ANALYSIS_COMPLETE, "Syntax analysis completed",
        "tokens" => stats.tokens_consumed,
        "fixes" => stats.fixes_applied,
        "rules_invoked" => stats.rules_invoked,
        "backtracks" => stats.backtracks,
        "duration_ms" => format!("{:.2}", stats.duration.as_secs_f64() * 1000.0)
    );

    Ok(Analysis {
        root,
        warnings,
        repairs,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Marker, QueryType};
    use crate::logging::{with_scoped_logger, LogLevel, LoggingService, MemoryLogger};
    use crate::tokens::{TokenBuilder, TokenId};
    use assert_matches::assert_matches;
    use std::sync::{mpsc, Arc};
    use std::thread;

    fn assign_program() -> Vec<Token> {
        TokenBuilder::from_ids(&[
            TokenId::Program,
            TokenId::UserDefined,
            TokenId::Semicolon,
            TokenId::Begin,
            TokenId::UserDefined,
            TokenId::Assign,
            TokenId::IntLiteral,
            TokenId::Semicolon,
            TokenId::End,
            TokenId::Period,
            TokenId::Eof,
        ])
    }

    /// program demo; begn x := 1 end.
    fn misspelled_program() -> Vec<Token> {
        TokenBuilder::new()
            .id(TokenId::Program)
            .ident("demo")
            .id(TokenId::Semicolon)
            .newline()
            .ident("begn")
            .ident("x")
            .id(TokenId::Assign)
            .int("1")
            .id(TokenId::End)
            .id(TokenId::Period)
            .build()
    }

    #[test]
    fn test_empty_program() {
        let tokens = TokenBuilder::from_ids(&[
            TokenId::Program,
            TokenId::UserDefined,
            TokenId::Semicolon,
            TokenId::Begin,
            TokenId::End,
            TokenId::Period,
            TokenId::Eof,
        ]);

        let analysis = analyze(tokens).unwrap();
        let root = analysis.root.unwrap();

        let statements = root.query(
            QueryType::Recursive,
            &[Marker::Assign, Marker::If, Marker::For, Marker::While, Marker::Repeat, Marker::FuncCall],
        );
        assert!(statements.is_empty());

        let body = root.find(Marker::ProgramBlock).unwrap();
        let texts: Vec<&str> = body.tokens().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["begin", "end"]);

        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.stats.tokens_consumed, 7);
        assert_eq!(analysis.stats.fixes_applied, 0);
    }

    #[test]
    fn test_assignment_markers() {
        let analysis = analyze(assign_program()).unwrap();
        let root = analysis.root.unwrap();

        let assignments = root.query(QueryType::Recursive, &[Marker::Assign]);
        assert_eq!(assignments.len(), 1);

        let assignment = assignments[0];
        let left = assignment.find(Marker::LeftSide).unwrap();
        assert_eq!(left.as_token().map(|t| t.id), Some(TokenId::UserDefined));
        assert_eq!(left.as_token().map(|t| t.text()), Some("id1"));

        let right = assignment.find(Marker::RightSide).unwrap();
        assert!(right.has(Marker::Expr));
        assert_eq!(right.as_token().map(|t| t.id), Some(TokenId::IntLiteral));
    }

    #[test]
    fn test_typo_is_repaired_with_warning() {
        let analysis = analyze(misspelled_program()).unwrap();

        assert_eq!(analysis.stats.fixes_applied, 1);
        assert_eq!(analysis.warnings.len(), 1);

        let warning = analysis.warnings.iter().next().unwrap();
        assert_eq!(warning.code, codes::neutralizer::TOKEN_REPAIRED);
        assert_eq!(warning.position.line, 2);
        assert!(warning.message.contains("'begn' was read as 'begin'"));

        let repair = &analysis.repairs[0];
        assert_eq!(repair.corrected.id, TokenId::Begin);
        assert_eq!(repair.rule.as_deref(), Some("composite-operator"));

        let root = analysis.root.unwrap();
        assert_eq!(root.query(QueryType::Recursive, &[Marker::Assign]).len(), 1);
    }

    #[test]
    fn test_disabled_neutralizer_rejects_typo() {
        let config = RuntimeConfig::from_toml_str("[neutralizer]\nenabled = false\n").unwrap();
        let grammar = Grammar::pascal().unwrap();

        let result = analyze_with(misspelled_program(), &grammar, &config);
        assert_matches!(result, Err(SyntaxError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unrecorded_fixes_produce_no_warnings() {
        let config = RuntimeConfig::from_toml_str("[syntax]\nrecord_fixes = false\n").unwrap();
        let grammar = Grammar::pascal().unwrap();

        let analysis = analyze_with(misspelled_program(), &grammar, &config).unwrap();
        assert!(analysis.warnings.is_empty());
        assert_eq!(analysis.stats.fixes_applied, 1);
    }

    #[test]
    fn test_failure_reports_offending_token() {
        // program demo; begin x := 1 end end.
        let tokens = TokenBuilder::new()
            .id(TokenId::Program)
            .ident("demo")
            .id(TokenId::Semicolon)
            .id(TokenId::Begin)
            .ident("x")
            .id(TokenId::Assign)
            .int("1")
            .id(TokenId::End)
            .id(TokenId::End)
            .id(TokenId::Period)
            .build();
        let offending = tokens[8].clone();

        let error = analyze(tokens).unwrap_err();
        assert_matches!(&error, SyntaxError::UnexpectedToken { expected: TokenId::Period, actual, .. } => {
            assert_eq!(actual, &offending);
        });
        assert_eq!(error.position(), Some(offending.position()));
        assert_eq!(error.rule(), Some("program"));
    }

    #[test]
    fn test_truncated_input_is_end_of_input() {
        let tokens = TokenBuilder::new()
            .id(TokenId::Program)
            .ident("demo")
            .id(TokenId::Semicolon)
            .id(TokenId::Begin)
            .build();

        let error = analyze(tokens).unwrap_err();
        assert_matches!(error, SyntaxError::UnexpectedEndOfInput { .. });
    }

    #[test]
    fn test_empty_stream() {
        assert_matches!(analyze(Vec::new()), Err(SyntaxError::EmptyTokenStream));
    }

    #[test]
    fn test_ungrammatical_grammar_is_rejected() {
        let mut grammar = Grammar::new();
        let missing = grammar.declare("statement");
        grammar.set_root(missing);

        let result = analyze_with(assign_program(), &grammar, &RuntimeConfig::default());
        assert_matches!(result, Err(SyntaxError::Grammar(GrammarError::UndefinedRule { .. })));
    }

    #[test]
    fn test_threaded_producer() {
        let (sender, receiver) = mpsc::channel();
        let producer = thread::spawn(move || {
            for token in assign_program() {
                sender.send(token).unwrap();
            }
        });

        let grammar = Grammar::pascal().unwrap();
        let analysis = analyze_with(receiver, &grammar, &RuntimeConfig::default()).unwrap();
        producer.join().unwrap();

        assert_eq!(analysis.stats.tokens_consumed, 11);
        assert!(analysis.root.is_some());
    }

    #[test]
    fn test_logging_outcomes() {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Info));

        with_scoped_logger(service, || {
            analyze(misspelled_program()).unwrap();
            let _ = analyze(TokenBuilder::from_ids(&[TokenId::Program, TokenId::Semicolon]));
        });

        assert!(memory.has_success_with_code(codes::success::SYNTAX_ANALYSIS_COMPLETE));
        assert_eq!(memory.get_events_with_code(codes::neutralizer::TOKEN_REPAIRED).len(), 1);
        assert!(memory.has_error_with_code(codes::syntax::UNEXPECTED_TOKEN));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = analyze(assign_program()).unwrap();
        let second = analyze(assign_program()).unwrap();

        assert_eq!(first.root, second.root);
        assert_eq!(first.stats.rules_invoked, second.stats.rules_invoked);
    }
}
