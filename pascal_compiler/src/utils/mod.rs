//! Shared primitive types used by the token, AST and diagnostic layers

pub mod position;

pub use position::Position;
