//! Tree model produced by the parser and annotated by the semantic passes.
//!
//! All nodes live in an [`ast::Ast`] arena and refer to each other through
//! typed index handles. Each node family is a closed enum so every pass
//! matches exhaustively over it:
//!
//! - Declarations: routines, variables, type declarations and bodies
//! - Types: primitives, arrays, records and named aliases
//! - Statements: assignments, loops, conditionals, returns and calls
//! - Expressions: literals, identifiers, calls, unary and binary operations
//!
//! Traversal goes through the [`visitor::Visitor`] trait.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visitor;

#[cfg(test)]
mod tests;
