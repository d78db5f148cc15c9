// Internal modules
pub mod ast;
pub mod config;
pub mod grammar;
#[macro_use]
pub mod logging;
pub mod neutralizer;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use ast::{Marker, Markers, Node, QueryType};
pub use grammar::{Grammar, GrammarError, Outcome};
pub use neutralizer::Neutralizer;
pub use syntax::{analyze, analyze_channel, analyze_with, Analysis, SyntaxError, SyntaxResult};
pub use tokens::{Token, TokenId, TxChannel};
pub use utils::Position;
