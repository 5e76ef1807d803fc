use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

use crate::Position;

use super::trie::Trie;

lazy_static! {
    pub static ref KEYWORDS: Trie<TokenKind> = [
        ("var", TokenKind::Var),
        ("type", TokenKind::Type),
        ("routine", TokenKind::Routine),
        ("is", TokenKind::Is),
        ("integer", TokenKind::Integer),
        ("real", TokenKind::Real),
        ("boolean", TokenKind::Boolean),
        ("record", TokenKind::Record),
        ("array", TokenKind::Array),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("while", TokenKind::While),
        ("for", TokenKind::For),
        ("loop", TokenKind::Loop),
        ("end", TokenKind::End),
        ("reverse", TokenKind::Reverse),
        ("in", TokenKind::In),
        ("if", TokenKind::If),
        ("then", TokenKind::Then),
        ("else", TokenKind::Else),
        ("not", TokenKind::Not),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("xor", TokenKind::Xor),
        ("return", TokenKind::Return),
    ]
    .into_iter()
    .collect();

    pub static ref OPERATORS: Trie<TokenKind> = [
        ("//", TokenKind::Comment),
        ("<", TokenKind::Less),
        (">", TokenKind::Greater),
        ("=", TokenKind::Equal),
        ("<=", TokenKind::LessEqual),
        (">=", TokenKind::GreaterEqual),
        ("/=", TokenKind::NotEqual),
        (":=", TokenKind::Assign),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("*", TokenKind::Star),
        ("/", TokenKind::Slash),
        ("%", TokenKind::Percent),
        ("(", TokenKind::OpenParen),
        (")", TokenKind::CloseParen),
        ("[", TokenKind::OpenBracket),
        ("]", TokenKind::CloseBracket),
        (",", TokenKind::Comma),
        (".", TokenKind::Dot),
        ("..", TokenKind::DotDot),
        (";", TokenKind::Semicolon),
        (":", TokenKind::Colon),
    ]
    .into_iter()
    .collect();

    pub static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[A-Za-z_][A-Za-z0-9_]*").unwrap();
    // A fraction needs at least one digit after the dot, so `1..5` stays `1`, `..`, `5`.
    pub static ref NUMBER_PATTERN: Regex = Regex::new("^(?:[0-9]+(?:\\.[0-9]+)?|\\.[0-9]+)").unwrap();
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Comment,
    Illegal,
    Identifier,
    IntegerLiteral,
    RealLiteral,

    Less,         // <
    Greater,      // >
    Equal,        // =
    LessEqual,    // <=
    GreaterEqual, // >=
    NotEqual,     // /=

    Assign, // :=

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Dot,
    DotDot,
    Semicolon,
    Colon,
    Newline,

    // Reserved
    Var,
    Type,
    Routine,
    Is,
    Integer,
    Real,
    Boolean,
    Record,
    Array,
    True,
    False,
    While,
    For,
    Loop,
    End,
    Reverse,
    In,
    If,
    Then,
    Else,
    Not,
    And,
    Or,
    Xor,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::EOF => write!(f, "end of file"),
            TokenKind::Newline => write!(f, "line break"),
            _ => write!(f, "{}", self.value),
        }
    }
}

impl Token {
    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Position just past the token's last character.
    pub fn end(&self) -> Position {
        match self.kind {
            TokenKind::Newline | TokenKind::EOF => self.position,
            _ => Position::new(
                self.position.line,
                self.position.column + self.value.chars().count() as u32,
            ),
        }
    }
}
