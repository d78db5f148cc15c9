//! AST nodes
//!
//! A node is either a leaf holding one token or a branch holding an ordered
//! list of children. Both carry a marker set. Nodes are immutable; adding
//! markers produces a new node that shares the token or children.

use super::marker::Markers;
use crate::tokens::Token;
use crate::utils::Position;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        token: Arc<Token>,
        markers: Markers,
    },
    Branch {
        items: Arc<[Node]>,
        markers: Markers,
    },
}

impl Node {
    /// Leaf with no markers
    pub fn token(token: Token) -> Node {
        Node::Leaf {
            token: Arc::new(token),
            markers: Markers::new(),
        }
    }

    /// Branch over `items` with no markers
    pub fn branch(items: Vec<Node>) -> Node {
        Node::Branch {
            items: items.into(),
            markers: Markers::new(),
        }
    }

    /// Combine the results of a rule.
    ///
    /// No children yields nothing, a single child is returned with `markers`
    /// merged in, and several children become a branch carrying `markers`.
    pub fn from_children(mut children: Vec<Node>, markers: &Markers) -> Option<Node> {
        match children.len() {
            0 => None,
            1 => children.pop().map(|child| child.wrap(markers)),
            _ => Some(Node::Branch {
                items: children.into(),
                markers: markers.clone(),
            }),
        }
    }

    /// Same node with `markers` merged into its own
    pub fn wrap(&self, markers: &Markers) -> Node {
        match self {
            Node::Leaf { token, markers: own } => Node::Leaf {
                token: Arc::clone(token),
                markers: own.merge(markers),
            },
            Node::Branch { items, markers: own } => Node::Branch {
                items: Arc::clone(items),
                markers: own.merge(markers),
            },
        }
    }

    pub fn markers(&self) -> &Markers {
        match self {
            Node::Leaf { markers, .. } | Node::Branch { markers, .. } => markers,
        }
    }

    pub fn has(&self, marker: super::Marker) -> bool {
        self.markers().has(marker)
    }

    /// Children of a branch; empty for a leaf
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Branch { items, .. } => items.as_ref(),
        }
    }

    /// Token of a leaf
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Leaf { token, .. } => Some(token.as_ref()),
            Node::Branch { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Source range covered by the node
    pub fn position(&self) -> Position {
        match self {
            Node::Leaf { token, .. } => token.position(),
            Node::Branch { items, .. } => match (items.first(), items.last()) {
                (Some(first), Some(last)) => first.position().join(&last.position()),
                _ => Position::default(),
            },
        }
    }

    /// Every leaf token in source order
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Leaf { token, .. } => out.push(token),
            Node::Branch { items, .. } => items.iter().for_each(|item| item.collect_tokens(out)),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        let markers = if self.markers().is_empty() {
            String::new()
        } else {
            format!(" {}", self.markers())
        };

        match self {
            Node::Leaf { token, .. } => writeln!(f, "{}{}{}", pad, token, markers),
            Node::Branch { items, .. } => {
                writeln!(
                    f,
                    "{}branch of {} at {}{}",
                    pad,
                    items.len(),
                    self.position(),
                    markers
                )?;
                for item in items.iter() {
                    item.write_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Indented tree dump, one node per line
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
