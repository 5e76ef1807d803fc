#![allow(clippy::module_inception)]

use std::fmt::Display;

use log::debug;

use crate::{
    ast::ast::Ast,
    errors::errors::Error,
    parser::parser::parse,
    semantics::{analyze, Stage},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantics;

extern crate regex;

/// A 1-based line/column location in the source text. The column counts
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    pub fn point(position: Position) -> Self {
        Span::new(position, position)
    }
}

/// Knobs for [`compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Stop after the first stage that reports anything. Parse and name
    /// resolution errors always stop the pipeline.
    pub halt_on_error: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            halt_on_error: true,
        }
    }
}

/// Outcome of running the front end over one source file.
#[derive(Debug)]
pub struct Compilation {
    pub ast: Ast,
    /// Diagnostics of every stage that ran, in stage order.
    pub errors: Vec<Error>,
    /// The stage whose diagnostics stopped the pipeline, if any.
    pub halted_at: Option<Stage>,
}

impl Compilation {
    /// Only a tree without outstanding diagnostics may be handed to a code
    /// generator.
    pub fn is_generatable(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Tokenizes, parses and runs every semantic pass over `source`.
pub fn compile(source: &str, options: &Options) -> Compilation {
    let (mut ast, errors) = parse(source);
    debug!("{} finished with {} error(s)", Stage::Parsing, errors.len());

    if !errors.is_empty() {
        return Compilation {
            ast,
            errors,
            halted_at: Some(Stage::Parsing),
        };
    }

    let (errors, halted_at) = analyze(&mut ast, options);

    Compilation {
        ast,
        errors,
        halted_at,
    }
}
