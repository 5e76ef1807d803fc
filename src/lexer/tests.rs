//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - The prefix tree and its cursor
//! - Keywords and identifiers
//! - Integer and real literals, including the `..` range operator
//! - Longest-match operators and punctuation
//! - Newlines, comments and positions
//! - Lookahead behaviour at end of input

use super::{
    lexer::{tokenize, Lexer},
    tokens::{TokenKind, OPERATORS},
    trie::Trie,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|token| token.kind).collect()
}

#[test]
fn test_trie_find_exact_keys_only() {
    let trie: Trie<i32> = [("for", 1), ("form", 2), ("if", 3)].into_iter().collect();

    assert_eq!(trie.find("for"), Some(&1));
    assert_eq!(trie.find("form"), Some(&2));
    assert_eq!(trie.find("if"), Some(&3));
    assert_eq!(trie.find("fo"), None);
    assert_eq!(trie.find("forms"), None);
    assert_eq!(trie.find(""), None);
}

#[test]
fn test_trie_add_replaces_value() {
    let mut trie = Trie::new();
    trie.add("x", 1);
    trie.add("x", 2);

    assert_eq!(trie.find("x"), Some(&2));
}

#[test]
fn test_trie_cursor_walk() {
    let mut cursor = OPERATORS.head();
    assert!(cursor.valid());
    assert!(!cursor.terminal());

    cursor.next('.');
    assert!(cursor.terminal());
    assert_eq!(cursor.value(), Some(&TokenKind::Dot));

    cursor.next('.');
    assert_eq!(cursor.value(), Some(&TokenKind::DotDot));

    cursor.next('.');
    assert!(!cursor.valid());
    assert_eq!(cursor.value(), None);

    cursor.next('.');
    assert!(!cursor.valid());
}

#[test]
fn test_tokenize_keywords() {
    let source = "var type routine is integer real boolean record array true false while for loop end reverse in if then else not and or xor return";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Var,
            TokenKind::Type,
            TokenKind::Routine,
            TokenKind::Is,
            TokenKind::Integer,
            TokenKind::Real,
            TokenKind::Boolean,
            TokenKind::Record,
            TokenKind::Array,
            TokenKind::True,
            TokenKind::False,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Loop,
            TokenKind::End,
            TokenKind::Reverse,
            TokenKind::In,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::Not,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Xor,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo _bar ends integer2 isx");

    assert!(tokens[..5]
        .iter()
        .all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "_bar");
    assert_eq!(tokens[2].value, "ends");
    assert_eq!(tokens[3].value, "integer2");
    assert_eq!(tokens[4].value, "isx");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 .5");

    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::RealLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[3].kind, TokenKind::RealLiteral);
    assert_eq!(tokens[3].value, ".5");
}

#[test]
fn test_tokenize_range_is_not_a_real() {
    let tokens = tokenize("1..10");

    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].value, "1");
    assert_eq!(tokens[1].kind, TokenKind::DotDot);
    assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[2].value, "10");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators_longest_match() {
    assert_eq!(
        kinds("< <= > >= = /= := : + - * / % . .. ( ) [ ] , ;"),
        vec![
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::Assign,
            TokenKind::Colon,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Dot,
            TokenKind::DotDot,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    assert_eq!(
        kinds("x:=a<=b/=c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::LessEqual,
            TokenKind::Identifier,
            TokenKind::NotEqual,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_illegal_character() {
    let tokens = tokenize("x @ y");

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_comments_are_invisible() {
    let tokens = tokenize("var x // the counter\nvar y");

    assert_eq!(
        tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Newline,
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comment_at_end_of_input() {
    assert_eq!(kinds("x // trailing"), vec![TokenKind::Identifier, TokenKind::EOF]);
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("var x\n  x := 10");

    assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
    assert_eq!((tokens[1].position.line, tokens[1].position.column), (1, 5));
    assert_eq!(tokens[2].kind, TokenKind::Newline);
    assert_eq!((tokens[3].position.line, tokens[3].position.column), (2, 3));
    assert_eq!((tokens[4].position.line, tokens[4].position.column), (2, 5));
    assert_eq!((tokens[5].position.line, tokens[5].position.column), (2, 8));
    assert_eq!(tokens[5].end().column, 10);
}

#[test]
fn test_tokenize_columns_count_characters() {
    let tokens = tokenize("x é y");

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "é");
    assert_eq!(tokens[1].end().column, 4);
    assert_eq!((tokens[2].position.line, tokens[2].position.column), (1, 5));
}

#[test]
fn test_tokenize_round_trip() {
    let source = "routine f(a : integer) : real is\n  // comment\n  return a * 2.5 + .5\nend\n";
    let without_comments: String = source
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n");

    let rebuilt: String = tokenize(source)
        .iter()
        .map(|token| token.value.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let squash = |text: &str| text.split_whitespace().collect::<String>();
    assert_eq!(squash(&rebuilt), squash(&without_comments));
}

#[test]
fn test_peek_does_not_consume() {
    let mut lexer = Lexer::new("a b");

    assert_eq!(lexer.peek().value, "a");
    assert_eq!(lexer.peek().value, "a");
    assert_eq!(lexer.next().value, "a");
    assert_eq!(lexer.peek().value, "b");
}

#[test]
fn test_eof_persists() {
    let mut lexer = Lexer::new("a");

    assert_eq!(lexer.next().kind, TokenKind::Identifier);
    assert_eq!(lexer.next().kind, TokenKind::EOF);
    assert_eq!(lexer.next().kind, TokenKind::EOF);
    assert_eq!(lexer.peek().kind, TokenKind::EOF);
}

#[test]
fn test_scan_after_end_is_an_error() {
    let mut lexer = Lexer::new("");

    assert_eq!(lexer.scan().unwrap().kind, TokenKind::EOF);
    let error = lexer.scan().unwrap_err();
    assert_eq!(error.get_error_name(), "AlreadyAtEnd");
}
