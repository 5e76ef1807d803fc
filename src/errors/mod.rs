//! Diagnostics produced by every stage of the front end.
//!
//! Nothing in the front end stops at the first problem: the lexer marks bad
//! input with an illegal token, the parser recovers at synchronising tokens
//! and every semantic pass collects a list of [`errors::Error`] records. Each
//! record carries a line/column [`crate::Position`] and a message; rendering
//! them against the source text is left to the caller.

pub mod errors;

#[cfg(test)]
mod tests;
