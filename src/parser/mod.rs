//! Parser module for building the tree.
//!
//! This module contains the parser that turns the token stream into an
//! arena-backed tree. It uses recursive descent for declarations and
//! statements, and a Pratt parser for expressions with proper operator
//! precedence. It handles:
//!
//! - Declaration parsing (routines, variables, types)
//! - Statement parsing (assignments, calls, loops, conditionals, returns)
//! - Expression parsing (unary and binary operators, member access,
//!   indexing, calls, literals)
//! - Type parsing for annotations and type declarations
//! - Error recovery, so that several syntax errors are reported per run
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
