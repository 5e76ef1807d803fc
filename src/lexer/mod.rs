//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that turns source text into
//! tokens on demand for the parser. It handles:
//!
//! - Identifiers and numeric literals, matched with anchored regex patterns
//! - Keywords, looked up in a prefix tree
//! - Operators and punctuation, scanned longest-match through a prefix tree
//! - Line/column tracking, significant newlines and `//` comments

pub mod lexer;
pub mod tokens;
pub mod trie;

#[cfg(test)]
mod tests;
