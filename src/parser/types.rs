//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive types (`integer`, `real`, `boolean`)
//! - Array types, with or without a length: `array [n] T`
//! - Record types: `record var ... end`
//! - Named types, resolved later against type declarations
//!
//! Every type starts with a distinct token, so only null denotation
//! handlers are needed.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::TypeId,
        types::{Type, TypeKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    decl::parse_variable_decl, expr::parse_expr, lookups::BindingPower, parser::Parser,
};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeId, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Integer, parse_primitive_type);
    parser.type_nud(TokenKind::Real, parse_primitive_type);
    parser.type_nud(TokenKind::Boolean, parse_primitive_type);
    parser.type_nud(TokenKind::Array, parse_array_type);
    parser.type_nud(TokenKind::Record, parse_record_type);
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let token_kind = parser.current_token_kind();
    let Some(type_fn) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.reject("type"));
    };

    type_fn(parser)
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let token = parser.advance();
    let kind = match token.kind {
        TokenKind::Integer => TypeKind::Integer,
        TokenKind::Real => TypeKind::Real,
        _ => TypeKind::Boolean,
    };

    let span = Span::new(token.position, token.end());
    Ok(parser.ast_mut().add_type(Type::new(kind, span)))
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let token = parser.expect(TokenKind::Identifier, "type name")?;
    let span = Span::new(token.position, token.end());

    Ok(parser.ast_mut().add_type(Type::new(
        TypeKind::Aliased {
            name: token.value,
            resolved: None,
        },
        span,
    )))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.advance().position;

    let length = if parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        let length = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseBracket, "`]`")?;
        Some(length)
    } else {
        None
    };

    let element = parse_type(parser)?;

    let span = parser.span_from(start);
    Ok(parser
        .ast_mut()
        .add_type(Type::new(TypeKind::Array { length, element }, span)))
}

pub fn parse_record_type(parser: &mut Parser) -> Result<TypeId, Error> {
    let start = parser.advance().position;
    let mut fields = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Newline | TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::Var => fields.push(parse_variable_decl(parser)?),
            _ => break,
        }
    }

    parser.expect(TokenKind::End, "`var` or `end`")?;

    let span = parser.span_from(start);
    Ok(parser
        .ast_mut()
        .add_type(Type::new(TypeKind::Record { fields }, span)))
}
