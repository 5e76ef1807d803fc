use crate::{
    ast::{
        ast::{RoutineId, TypeDeclId, VariableId},
        declarations::{Declaration, RoutineDecl, TypeDecl, VariableDecl},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, stmt::parse_body, types::parse_type};

/// One top level declaration.
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    match parser.current_token_kind() {
        TokenKind::Routine => Ok(Declaration::Routine(parse_routine_decl(parser)?)),
        TokenKind::Var => Ok(Declaration::Variable(parse_variable_decl(parser)?)),
        TokenKind::Type => Ok(Declaration::Type(parse_type_decl(parser)?)),
        _ => Err(parser.unexpected("`routine`, `var` or `type`")),
    }
}

/// Consumes the `;` or line break after a declaration. A declaration that is
/// the last thing before `end`, `else` or the end of input needs neither.
fn parse_terminator(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::Newline => {
            parser.advance();
            Ok(())
        }
        TokenKind::End | TokenKind::Else | TokenKind::EOF => Ok(()),
        _ => parser
            .expect_one_of(&[TokenKind::Semicolon, TokenKind::Newline], "`;` or line break")
            .map(|_| ()),
    }
}

pub fn parse_routine_decl(parser: &mut Parser) -> Result<RoutineId, Error> {
    let start = parser.advance().position;
    let name = parser.expect(TokenKind::Identifier, "routine name")?.value;

    parser.expect(TokenKind::OpenParen, "`(`")?;
    let mut parameters = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_parameter(parser)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    parser.expect(TokenKind::CloseParen, "`,` or `)`")?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Is, "`is`")?;
    let body = parse_body(parser)?;
    parser.expect(TokenKind::End, "`end`")?;

    let span = parser.span_from(start);
    Ok(parser.ast_mut().add_routine(RoutineDecl {
        span,
        name,
        parameters,
        return_type,
        body,
    }))
}

/// `name : Type`
fn parse_parameter(parser: &mut Parser) -> Result<VariableId, Error> {
    let name = parser.expect(TokenKind::Identifier, "parameter name")?;
    parser.expect(TokenKind::Colon, "`:`")?;
    let var_type = parse_type(parser)?;

    let span = parser.span_from(name.position);
    Ok(parser.ast_mut().add_variable(VariableDecl {
        span,
        name: name.value,
        var_type: Some(var_type),
        initializer: None,
    }))
}

pub fn parse_variable_decl(parser: &mut Parser) -> Result<VariableId, Error> {
    let start = parser.advance().position;
    let name = parser.expect(TokenKind::Identifier, "variable name")?.value;

    let var_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    let initializer = if parser.current_token_kind() == TokenKind::Is {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let span = parser.span_from(start);
    parse_terminator(parser)?;

    Ok(parser.ast_mut().add_variable(VariableDecl {
        span,
        name,
        var_type,
        initializer,
    }))
}

pub fn parse_type_decl(parser: &mut Parser) -> Result<TypeDeclId, Error> {
    let start = parser.advance().position;
    let name = parser.expect(TokenKind::Identifier, "type name")?.value;
    parser.expect(TokenKind::Is, "`is`")?;
    let ty = parse_type(parser)?;

    let span = parser.span_from(start);
    parse_terminator(parser)?;

    Ok(parser
        .ast_mut()
        .add_type_decl(TypeDecl { span, name, ty }))
}
