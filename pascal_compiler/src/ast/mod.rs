//! Abstract syntax tree produced by the grammar
//!
//! The tree is untyped: leaves hold tokens, branches hold children, and the
//! meaning of a subtree is carried by its [`Markers`]. Consumers locate
//! declarations, statements and expressions with [`Node::query`].

pub mod marker;
pub mod node;
pub mod query;

pub use marker::{Marker, Markers};
pub use node::Node;
pub use query::QueryType;
