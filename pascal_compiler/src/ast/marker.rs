//! Semantic markers attached to AST nodes
//!
//! Markers record the grammatical role of a subtree. Later stages locate
//! declarations and statements by querying for markers instead of walking
//! the tree shape, so where the grammar attaches them is part of the
//! parser's contract.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Marker {
    // Declarations
    VarDecl,
    ConstDecl,
    TypeDecl,
    FuncDecl,
    FuncName,
    ParamGroupDecl,
    ReturnType,

    // Expressions
    Expr,
    AdditionalOperands,
    MultiplicativeOp,
    AdditiveOp,
    LogicOp,
    CompareOp,

    // Statements
    Assign,
    LeftSide,
    RightSide,
    FuncCall,
    FuncArg,

    // Control flow
    If,
    IfExpr,
    For,
    ForHeader,
    While,
    WhileExpr,
    Repeat,
    RepeatExpr,

    // Blocks
    Block,
    ProgramBlock,
    Declarations,
    Operators,

    // Common
    Name,
    Type,
    Value,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::VarDecl => "var_decl",
            Marker::ConstDecl => "const_decl",
            Marker::TypeDecl => "type_decl",
            Marker::FuncDecl => "func_decl",
            Marker::FuncName => "func_name",
            Marker::ParamGroupDecl => "param_group_decl",
            Marker::ReturnType => "return_type",
            Marker::Expr => "expr",
            Marker::AdditionalOperands => "additional_operands",
            Marker::MultiplicativeOp => "multiplicative_op",
            Marker::AdditiveOp => "additive_op",
            Marker::LogicOp => "logic_op",
            Marker::CompareOp => "compare_op",
            Marker::Assign => "assign",
            Marker::LeftSide => "left_side",
            Marker::RightSide => "right_side",
            Marker::FuncCall => "func_call",
            Marker::FuncArg => "func_arg",
            Marker::If => "if",
            Marker::IfExpr => "if_expr",
            Marker::For => "for",
            Marker::ForHeader => "for_header",
            Marker::While => "while",
            Marker::WhileExpr => "while_expr",
            Marker::Repeat => "repeat",
            Marker::RepeatExpr => "repeat_expr",
            Marker::Block => "block",
            Marker::ProgramBlock => "program_block",
            Marker::Declarations => "declarations",
            Marker::Operators => "operators",
            Marker::Name => "name",
            Marker::Type => "type",
            Marker::Value => "value",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unordered set of markers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markers(BTreeSet<Marker>);

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, marker: Marker) -> bool {
        self.0.contains(&marker)
    }

    /// True when at least one of `markers` is present
    pub fn has_any(&self, markers: &[Marker]) -> bool {
        markers.iter().any(|marker| self.has(*marker))
    }

    /// Copy of this set with `marker` added
    pub fn with(&self, marker: Marker) -> Self {
        let mut set = self.0.clone();
        set.insert(marker);
        Self(set)
    }

    /// Union of both sets
    pub fn merge(&self, other: &Markers) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<Marker> for Markers {
    fn from_iter<T: IntoIterator<Item = Marker>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Marker; N]> for Markers {
    fn from(markers: [Marker; N]) -> Self {
        markers.into_iter().collect()
    }
}

impl fmt::Display for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Marker::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
