//! Token definitions and the static lookup tables used by the lexer and the parser.

use rill_source::TokenLocation;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // misc
    Eof,
    /// A character the lexer does not recognize.
    Bad,
    /// Only generated by the parser as a placeholder when an expected token is missing.
    Unexpected,

    // literals
    Number,
    True,
    False,

    // identifiers
    Ident,

    // keywords
    If,
    Else,
    Int,
    Bool,

    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,

    // operators
    // - arithmetic
    Plus,
    Minus,
    Mul,
    Quo,
    Rem,
    // - bitwise
    BitAnd,
    BitOr,
    Xor,
    Shl,
    Shr,
    // - logical
    Not,
    And,
    Or,
    // - comparison
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    // - assignment
    Assign,
    Declare,
    PlusAssign,
    MinusAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
}

/// Reserved words. Anything else made of letters is an identifier.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("int", TokenKind::Int),
    ("bool", TokenKind::Bool),
];

/// Precedence of prefix operators.
pub const UNARY_PRECEDENCE: u8 = 6;

impl TokenKind {
    /// Returns the keyword spelled `text`, if any.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map(|(_, kind)| *kind)
    }

    /// Returns the binary precedence or `0` if not a binary operator.
    /// Higher binds tighter.
    pub fn binary_precedence(self) -> u8 {
        match self {
            /* Multiplicative */
            TokenKind::Mul | TokenKind::Quo | TokenKind::Rem | TokenKind::Shl | TokenKind::Shr => 5,
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => 4,
            /* Comparison */
            TokenKind::Gt
            | TokenKind::Lt
            | TokenKind::Gte
            | TokenKind::Lte
            | TokenKind::Neq
            | TokenKind::Eq => 3,
            TokenKind::And | TokenKind::BitAnd => 2,
            TokenKind::Or | TokenKind::BitOr | TokenKind::Xor => 1,
            _ => 0,
        }
    }

    /// Returns the prefix precedence or `0` if not a prefix operator.
    pub fn unary_precedence(self) -> u8 {
        match self {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Not => UNARY_PRECEDENCE,
            _ => 0,
        }
    }

    /// `true` for `=` and every compound assignment operator.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::MulAssign
                | TokenKind::QuoAssign
                | TokenKind::RemAssign
        )
    }

    /// `true` for the type keywords usable in declarations.
    pub fn is_type(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Bool)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Bad => "BADTOKEN",
            TokenKind::Unexpected => "UNEXPECTED",
            TokenKind::Number => "NUMBER",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Ident => "IDENT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Int => "INT",
            TokenKind::Bool => "BOOL",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Quo => "QUO",
            TokenKind::Rem => "REM",
            TokenKind::BitAnd => "BITAND",
            TokenKind::BitOr => "BITOR",
            TokenKind::Xor => "XOR",
            TokenKind::Shl => "LSHIFT",
            TokenKind::Shr => "RSHIFT",
            TokenKind::Not => "NOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Eq => "EQ",
            TokenKind::Neq => "NEQ",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::Gte => "GTE",
            TokenKind::Lte => "LTE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Declare => "DECLARE",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::MulAssign => "MUL_ASSIGN",
            TokenKind::QuoAssign => "QUO_ASSIGN",
            TokenKind::RemAssign => "REM_ASSIGN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified piece of source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: TokenLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: TokenLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {:?})", self.kind, self.text)
    }
}
