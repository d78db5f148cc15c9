//! Marker queries over an AST

use super::marker::Marker;
use super::node::Node;
use serde::{Deserialize, Serialize};

/// How far a query descends once it finds a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryType {
    /// First match in depth-first order
    One,
    /// Outermost matches only; matched branches are not searched further
    Top,
    /// Every match, including ones nested inside other matches
    Recursive,
}

impl Node {
    /// Find nodes carrying any of `markers`, in depth-first order
    pub fn query(&self, query_type: QueryType, markers: &[Marker]) -> Vec<&Node> {
        let mut found = Vec::new();
        self.query_into(query_type, markers, &mut found);
        found
    }

    /// First node carrying `marker`
    pub fn find(&self, marker: Marker) -> Option<&Node> {
        self.query(QueryType::One, &[marker]).into_iter().next()
    }

    /// Returns true when the search should stop
    fn query_into<'a>(
        &'a self,
        query_type: QueryType,
        markers: &[Marker],
        found: &mut Vec<&'a Node>,
    ) -> bool {
        if self.markers().has_any(markers) {
            found.push(self);
            if query_type != QueryType::Recursive || self.is_leaf() {
                return query_type == QueryType::One;
            }
        }

        for child in self.children() {
            if child.query_into(query_type, markers, found) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Markers;
    use crate::tokens::{Token, TokenId};
    use crate::utils::Position;

    fn leaf(text: &str, column: u32, markers: &[Marker]) -> Node {
        let token = Token::new(TokenId::UserDefined, text, Position::new(1, column, column + 1));
        Node::token(token).wrap(&markers.iter().copied().collect())
    }

    fn branch(items: Vec<Node>, markers: &[Marker]) -> Node {
        Node::branch(items).wrap(&markers.iter().copied().collect::<Markers>())
    }

    /// expr( a[name], expr( b[name], c ) )
    fn nested() -> Node {
        branch(
            vec![
                leaf("a", 1, &[Marker::Name]),
                branch(
                    vec![leaf("b", 3, &[Marker::Name]), leaf("c", 5, &[])],
                    &[Marker::Expr],
                ),
            ],
            &[Marker::Expr],
        )
    }

    fn texts(nodes: &[&Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| match node.as_token() {
                Some(token) => token.text().to_string(),
                None => format!("branch@{}", node.position()),
            })
            .collect()
    }

    #[test]
    fn test_one_stops_at_first_match() {
        let tree = nested();
        let found = tree.query(QueryType::One, &[Marker::Name]);
        assert_eq!(texts(&found), vec!["a"]);

        let found = tree.query(QueryType::One, &[Marker::Expr]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].children().len(), 2);
        assert_eq!(found[0].position(), Position::new(1, 1, 6));
    }

    #[test]
    fn test_top_skips_nested_matches() {
        let tree = nested();
        let found = tree.query(QueryType::Top, &[Marker::Expr]);
        assert_eq!(found.len(), 1);

        let found = tree.query(QueryType::Top, &[Marker::Name]);
        assert_eq!(texts(&found), vec!["a", "b"]);
    }

    #[test]
    fn test_recursive_finds_nested_matches() {
        let tree = nested();
        let found = tree.query(QueryType::Recursive, &[Marker::Expr]);
        assert_eq!(texts(&found), vec!["branch@1:1-6", "branch@1:3-6"]);

        let found = tree.query(QueryType::Recursive, &[Marker::Expr, Marker::Name]);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_no_match() {
        let tree = nested();
        assert!(tree.query(QueryType::Recursive, &[Marker::Assign]).is_empty());
        assert!(tree.query(QueryType::One, &[]).is_empty());
        assert!(tree.find(Marker::Value).is_none());
    }

    #[test]
    fn test_find() {
        let tree = nested();
        let name = tree.find(Marker::Name).and_then(Node::as_token);
        assert_eq!(name.map(Token::text), Some("a"));
    }
}
