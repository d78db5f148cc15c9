//! Token identifiers
//!
//! `TokenId` is a closed enumeration laid out in contiguous ranges: special
//! kinds, keywords, operators, punctuation, whitespace and literal
//! categories. Every keyword, operator, punctuation and whitespace id has one
//! canonical spelling, and the mapping works in both directions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum TokenId {
    // === SPECIAL ===
    Unknown,
    UserDefined,
    Eof,

    // === KEYWORDS ===
    Absolute,
    Abstract,
    All,
    And,
    AndThen,
    Array,
    As,
    Asm,
    Asmname,
    Attribute,
    Begin,
    Bindable,
    C,
    Case,
    CLanguage,
    Class,
    Const,
    Constructor,
    Destructor,
    Div,
    Do,
    Downto,
    Else,
    End,
    Export,
    Exports,
    External,
    Far,
    File,
    Finalization,
    For,
    Forward,
    Function,
    Goto,
    If,
    Implementation,
    Import,
    In,
    Inherited,
    Initialization,
    Interface,
    Interrupt,
    Is,
    Label,
    Library,
    Mod,
    Module,
    Name,
    Near,
    Nil,
    Not,
    Object,
    Of,
    Only,
    Operator,
    Or,
    OrElse,
    Otherwise,
    Packed,
    Pow,
    Private,
    Procedure,
    Program,
    Property,
    Protected,
    Public,
    Published,
    Qualified,
    Record,
    Repeat,
    Resident,
    Restricted,
    Segment,
    Set,
    Shl,
    Shr,
    Then,
    To,
    Type,
    Unit,
    Until,
    Uses,
    Value,
    Var,
    View,
    Virtual,
    While,
    With,
    Xor,

    // === OPERATORS ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Plus,
    Minus,
    Multiply,
    Divide,
    ShiftLeft,
    ShiftRight,
    Assign,

    // === PUNCTUATION ===
    Semicolon,
    Comma,
    Period,
    Colon,
    OpeningParenthesis,
    ClosingParenthesis,
    OpeningBrace,
    ClosingBrace,
    OpeningSquareBrace,
    ClosingSquareBrace,

    // === WHITESPACE ===
    Newline,
    Space,
    Tab,
    VerticalTab,

    // === LITERALS ===
    IntLiteral,
    DoubleLiteral,
    BoolLiteral,
}

/// Every id that has a canonical spelling, in declaration order
const SPELLED: &[TokenId] = &[
    TokenId::Absolute,
    TokenId::Abstract,
    TokenId::All,
    TokenId::And,
    TokenId::AndThen,
    TokenId::Array,
    TokenId::As,
    TokenId::Asm,
    TokenId::Asmname,
    TokenId::Attribute,
    TokenId::Begin,
    TokenId::Bindable,
    TokenId::C,
    TokenId::Case,
    TokenId::CLanguage,
    TokenId::Class,
    TokenId::Const,
    TokenId::Constructor,
    TokenId::Destructor,
    TokenId::Div,
    TokenId::Do,
    TokenId::Downto,
    TokenId::Else,
    TokenId::End,
    TokenId::Export,
    TokenId::Exports,
    TokenId::External,
    TokenId::Far,
    TokenId::File,
    TokenId::Finalization,
    TokenId::For,
    TokenId::Forward,
    TokenId::Function,
    TokenId::Goto,
    TokenId::If,
    TokenId::Implementation,
    TokenId::Import,
    TokenId::In,
    TokenId::Inherited,
    TokenId::Initialization,
    TokenId::Interface,
    TokenId::Interrupt,
    TokenId::Is,
    TokenId::Label,
    TokenId::Library,
    TokenId::Mod,
    TokenId::Module,
    TokenId::Name,
    TokenId::Near,
    TokenId::Nil,
    TokenId::Not,
    TokenId::Object,
    TokenId::Of,
    TokenId::Only,
    TokenId::Operator,
    TokenId::Or,
    TokenId::OrElse,
    TokenId::Otherwise,
    TokenId::Packed,
    TokenId::Pow,
    TokenId::Private,
    TokenId::Procedure,
    TokenId::Program,
    TokenId::Property,
    TokenId::Protected,
    TokenId::Public,
    TokenId::Published,
    TokenId::Qualified,
    TokenId::Record,
    TokenId::Repeat,
    TokenId::Resident,
    TokenId::Restricted,
    TokenId::Segment,
    TokenId::Set,
    TokenId::Shl,
    TokenId::Shr,
    TokenId::Then,
    TokenId::To,
    TokenId::Type,
    TokenId::Unit,
    TokenId::Until,
    TokenId::Uses,
    TokenId::Value,
    TokenId::Var,
    TokenId::View,
    TokenId::Virtual,
    TokenId::While,
    TokenId::With,
    TokenId::Xor,
    TokenId::Eq,
    TokenId::Ne,
    TokenId::Lt,
    TokenId::Gt,
    TokenId::Lte,
    TokenId::Gte,
    TokenId::Plus,
    TokenId::Minus,
    TokenId::Multiply,
    TokenId::Divide,
    TokenId::ShiftLeft,
    TokenId::ShiftRight,
    TokenId::Assign,
    TokenId::Semicolon,
    TokenId::Comma,
    TokenId::Period,
    TokenId::Colon,
    TokenId::OpeningParenthesis,
    TokenId::ClosingParenthesis,
    TokenId::OpeningBrace,
    TokenId::ClosingBrace,
    TokenId::OpeningSquareBrace,
    TokenId::ClosingSquareBrace,
    TokenId::Newline,
    TokenId::Space,
    TokenId::Tab,
    TokenId::VerticalTab,
];

static BY_SPELLING: OnceLock<HashMap<&'static str, TokenId>> = OnceLock::new();

impl TokenId {
    /// Canonical source spelling, if this id has one
    pub const fn spelling(self) -> Option<&'static str> {
        match self {
            Self::Absolute => Some("absolute"),
            Self::Abstract => Some("abstract"),
            Self::All => Some("all"),
            Self::And => Some("and"),
            Self::AndThen => Some("and_then"),
            Self::Array => Some("array"),
            Self::As => Some("as"),
            Self::Asm => Some("asm"),
            Self::Asmname => Some("asmname"),
            Self::Attribute => Some("attribute"),
            Self::Begin => Some("begin"),
            Self::Bindable => Some("bindable"),
            Self::C => Some("c"),
            Self::Case => Some("case"),
            Self::CLanguage => Some("c_language"),
            Self::Class => Some("class"),
            Self::Const => Some("const"),
            Self::Constructor => Some("constructor"),
            Self::Destructor => Some("destructor"),
            Self::Div => Some("div"),
            Self::Do => Some("do"),
            Self::Downto => Some("downto"),
            Self::Else => Some("else"),
            Self::End => Some("end"),
            Self::Export => Some("export"),
            Self::Exports => Some("exports"),
            Self::External => Some("external"),
            Self::Far => Some("far"),
            Self::File => Some("file"),
            Self::Finalization => Some("finalization"),
            Self::For => Some("for"),
            Self::Forward => Some("forward"),
            Self::Function => Some("function"),
            Self::Goto => Some("goto"),
            Self::If => Some("if"),
            Self::Implementation => Some("implementation"),
            Self::Import => Some("import"),
            Self::In => Some("in"),
            Self::Inherited => Some("inherited"),
            Self::Initialization => Some("initialization"),
            Self::Interface => Some("interface"),
            Self::Interrupt => Some("interrupt"),
            Self::Is => Some("is"),
            Self::Label => Some("label"),
            Self::Library => Some("library"),
            Self::Mod => Some("mod"),
            Self::Module => Some("module"),
            Self::Name => Some("name"),
            Self::Near => Some("near"),
            Self::Nil => Some("nil"),
            Self::Not => Some("not"),
            Self::Object => Some("object"),
            Self::Of => Some("of"),
            Self::Only => Some("only"),
            Self::Operator => Some("operator"),
            Self::Or => Some("or"),
            Self::OrElse => Some("or_else"),
            Self::Otherwise => Some("otherwise"),
            Self::Packed => Some("packed"),
            Self::Pow => Some("pow"),
            Self::Private => Some("private"),
            Self::Procedure => Some("procedure"),
            Self::Program => Some("program"),
            Self::Property => Some("property"),
            Self::Protected => Some("protected"),
            Self::Public => Some("public"),
            Self::Published => Some("published"),
            Self::Qualified => Some("qualified"),
            Self::Record => Some("record"),
            Self::Repeat => Some("repeat"),
            Self::Resident => Some("resident"),
            Self::Restricted => Some("restricted"),
            Self::Segment => Some("segment"),
            Self::Set => Some("set"),
            Self::Shl => Some("shl"),
            Self::Shr => Some("shr"),
            Self::Then => Some("then"),
            Self::To => Some("to"),
            Self::Type => Some("type"),
            Self::Unit => Some("unit"),
            Self::Until => Some("until"),
            Self::Uses => Some("uses"),
            Self::Value => Some("value"),
            Self::Var => Some("var"),
            Self::View => Some("view"),
            Self::Virtual => Some("virtual"),
            Self::While => Some("while"),
            Self::With => Some("with"),
            Self::Xor => Some("xor"),
            Self::Eq => Some("="),
            Self::Ne => Some("<>"),
            Self::Lt => Some("<"),
            Self::Gt => Some(">"),
            Self::Lte => Some("<="),
            Self::Gte => Some(">="),
            Self::Plus => Some("+"),
            Self::Minus => Some("-"),
            Self::Multiply => Some("*"),
            Self::Divide => Some("/"),
            Self::ShiftLeft => Some("<<"),
            Self::ShiftRight => Some(">>"),
            Self::Assign => Some(":="),
            Self::Semicolon => Some(";"),
            Self::Comma => Some(","),
            Self::Period => Some("."),
            Self::Colon => Some(":"),
            Self::OpeningParenthesis => Some("("),
            Self::ClosingParenthesis => Some(")"),
            Self::OpeningBrace => Some("{"),
            Self::ClosingBrace => Some("}"),
            Self::OpeningSquareBrace => Some("["),
            Self::ClosingSquareBrace => Some("]"),
            Self::Newline => Some("\n"),
            Self::Space => Some(" "),
            Self::Tab => Some("\t"),
            Self::VerticalTab => Some("\u{b}"),
            Self::Unknown
            | Self::UserDefined
            | Self::Eof
            | Self::IntLiteral
            | Self::DoubleLiteral
            | Self::BoolLiteral => None,
        }
    }

    /// Reverse lookup of a canonical spelling (exact, case-sensitive)
    pub fn from_spelling(text: &str) -> Option<TokenId> {
        BY_SPELLING
            .get_or_init(|| {
                SPELLED
                    .iter()
                    .filter_map(|&id| id.spelling().map(|spelling| (spelling, id)))
                    .collect()
            })
            .get(text)
            .copied()
    }

    /// All ids with a canonical spelling
    pub fn spelled() -> &'static [TokenId] {
        SPELLED
    }

    const fn in_range(self, first: TokenId, last: TokenId) -> bool {
        let value = self as u16;
        value >= first as u16 && value <= last as u16
    }

    pub const fn is_keyword(self) -> bool {
        self.in_range(Self::Absolute, Self::Xor)
    }

    pub const fn is_operator(self) -> bool {
        self.in_range(Self::Eq, Self::Assign)
    }

    pub const fn is_punctuation(self) -> bool {
        self.in_range(Self::Semicolon, Self::ClosingSquareBrace)
    }

    pub const fn is_whitespace(self) -> bool {
        self.in_range(Self::Newline, Self::VerticalTab)
    }

    pub const fn is_literal(self) -> bool {
        self.in_range(Self::IntLiteral, Self::BoolLiteral)
    }

    /// Ids whose tokens carry a payload that cannot be guessed from spelling
    pub const fn is_value_carrying(self) -> bool {
        matches!(self, Self::Unknown | Self::UserDefined | Self::Eof) || self.is_literal()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "<unknown>"),
            Self::UserDefined => write!(f, "<user defined>"),
            Self::Eof => write!(f, "<EOF>"),
            Self::IntLiteral => write!(f, "<int>"),
            Self::DoubleLiteral => write!(f, "<double>"),
            Self::BoolLiteral => write!(f, "<bool>"),
            Self::Newline => write!(f, "<newline>"),
            Self::Tab => write!(f, "<tab>"),
            Self::VerticalTab => write!(f, "<vertical tab>"),
            Self::Space => write!(f, "<space>"),
            other => write!(f, "{}", other.spelling().unwrap_or("<unknown>")),
        }
    }
}
