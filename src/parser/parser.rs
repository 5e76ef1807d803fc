//! Parser implementation for building the tree.
//!
//! This module contains the main Parser struct and the parsing entry point.
//! Declarations and statements are parsed by recursive descent; expressions
//! use precedence climbing driven by NUD/LED handlers.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Errors never abort the parse. They are recorded, the parser skips ahead to
//! a synchronising token, and parsing resumes at the enclosing level.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{ast::Ast, declarations::Declaration},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    decl::parse_declaration,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
///
/// The parser pulls tokens from a [`Lexer`] one at a time and builds nodes
/// straight into an [`Ast`] arena.
pub struct Parser {
    /// Token source with one token of lookahead
    lexer: Lexer,
    /// Arena receiving every node built so far
    ast: Ast,
    /// Diagnostics recorded so far
    errors: Vec<Error>,
    /// End of the most recently consumed token
    previous_end: Position,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    /// Creates a new Parser over `source` with empty lookup tables.
    pub fn new(source: &str) -> Self {
        Parser {
            lexer: Lexer::new(source),
            ast: Ast::new(),
            errors: vec![],
            previous_end: Position::default(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&mut self) -> &Token {
        self.lexer.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&mut self) -> TokenKind {
        self.lexer.peek().kind
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> Token {
        let token = self.lexer.next();
        if token.kind != TokenKind::EOF {
            self.previous_end = token.end();
        }
        token
    }

    /// Consumes one token and checks it is of `expected_kind`.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `expected` - How the expected token is described in the diagnostic
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        self.expect_one_of(&[expected_kind], expected)
    }

    /// Consumes one token and checks it is one of `kinds`.
    ///
    /// A mismatched token is consumed as well; see [`Parser::reject`].
    pub fn expect_one_of(&mut self, kinds: &[TokenKind], expected: &str) -> Result<Token, Error> {
        if self.current_token().is_one_of(kinds) {
            return Ok(self.advance());
        }

        Err(self.reject(expected))
    }

    /// Builds an error for the current token and consumes it, unless it is a
    /// line break, which is left for error recovery to synchronise on.
    pub fn reject(&mut self, expected: &str) -> Error {
        let error = self.unexpected(expected);
        if self.current_token_kind() != TokenKind::Newline {
            self.advance();
        }
        error
    }

    /// Builds (without recording) an error for the current token.
    pub fn unexpected(&mut self, expected: &str) -> Error {
        let token = self.current_token();
        let position = token.position;
        let error = if token.kind == TokenKind::Illegal {
            ErrorImpl::IllegalToken {
                token: token.value.clone(),
            }
        } else {
            ErrorImpl::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
            }
        };
        Error::new(error, position)
    }

    /// Records a diagnostic.
    pub fn record(&mut self, error: Error) {
        trace!("syntax error: {}", error);
        self.errors.push(error);
    }

    /// Discards tokens up to and including one of `consume`.
    ///
    /// Stops without consuming at end of input or at any of `stop_before`,
    /// so an enclosing construct can still see its closing keyword.
    pub fn synchronize(&mut self, consume: &[TokenKind], stop_before: &[TokenKind]) {
        loop {
            let token = self.current_token();
            if token.kind == TokenKind::EOF || token.is_one_of(stop_before) {
                return;
            }
            if self.advance().is_one_of(consume) {
                return;
            }
        }
    }

    /// Returns the position of the current token.
    pub fn get_position(&mut self) -> Position {
        self.current_token().position
    }

    /// Returns where the most recently consumed token ended.
    pub fn previous_end(&self) -> Position {
        self.previous_end
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.previous_end)
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, type_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, type_fn);
    }

    fn finish(self) -> (Ast, Vec<Error>) {
        (self.ast, self.errors)
    }
}

/// Parses `source` into a tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses declarations until EOF.
///
/// # Returns
///
/// The arena with its root [`crate::ast::ast::Program`], and every syntax
/// error found. The tree is only meaningful when the error list is empty.
pub fn parse(source: &str) -> (Ast, Vec<Error>) {
    let mut parser = Parser::new(source);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let start = parser.get_position();
    let mut declarations: Vec<Declaration> = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => break,
            TokenKind::Newline | TokenKind::Semicolon => {
                parser.advance();
            }
            _ => match parse_declaration(&mut parser) {
                Ok(declaration) => declarations.push(declaration),
                Err(error) => {
                    parser.record(error);
                    parser.synchronize(&[TokenKind::Newline, TokenKind::Semicolon], &[]);
                }
            },
        }
    }

    let span = parser.span_from(start);
    let program = &mut parser.ast_mut().program;
    program.declarations = declarations;
    program.span = span;

    let (ast, errors) = parser.finish();
    debug!(
        "parsed {} top level declaration(s), {} syntax error(s)",
        ast.program.declarations.len(),
        errors.len()
    );
    (ast, errors)
}
