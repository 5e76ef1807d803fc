use log::trace;

use crate::{
    ast::{
        ast::{BodyId, StmtId},
        declarations::{Body, Declaration, VariableDecl},
        statements::{Statement, StmtKind},
        types::{Type, TypeKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{
    decl::{parse_type_decl, parse_variable_decl},
    parser::Parser,
};

/// Tokens a failed body item skips through.
const BODY_SYNC: [TokenKind; 2] = [TokenKind::Newline, TokenKind::Semicolon];
/// Tokens that close a body and must be left for the enclosing construct.
const BODY_CLOSERS: [TokenKind; 2] = [TokenKind::End, TokenKind::Else];

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let token_kind = parser.current_token_kind();
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// An assignment, or an expression that must be a call.
fn parse_expression_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let kind = if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        let rhs = parse_expr(parser, BindingPower::Default)?;
        StmtKind::Assignment { lhs: expr, rhs }
    } else if parser.ast().expression(expr).is_call_like() {
        StmtKind::Call(expr)
    } else {
        return Err(Error::new(ErrorImpl::InvalidStatement, start));
    };

    let span = parser.span_from(start);
    Ok(parser.ast_mut().add_statement(Statement::new(kind, span)))
}

/// Parses declarations and statements up to, but not including, the `end`
/// or `else` that closes the body.
///
/// Errors inside the body are recorded and skipped so one bad line does not
/// hide the rest. Running into the end of input is an error for the whole
/// body.
pub fn parse_body(parser: &mut Parser) -> Result<BodyId, Error> {
    let start = parser.get_position();
    let mut body = Body::default();

    loop {
        match parser.current_token_kind() {
            TokenKind::Newline | TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::End | TokenKind::Else => break,
            TokenKind::EOF => {
                return Err(Error::new(ErrorImpl::UnterminatedBody, parser.get_position()))
            }
            _ => {
                if let Err(error) = parse_body_item(parser, &mut body) {
                    parser.record(error);
                    parser.synchronize(&BODY_SYNC, &BODY_CLOSERS);
                }
            }
        }
    }

    body.span = parser.span_from(start);
    trace!(
        "parsed body at {}: {} declaration(s), {} statement(s)",
        start,
        body.declarations.len(),
        body.statements.len()
    );
    Ok(parser.ast_mut().add_body(body))
}

fn parse_body_item(parser: &mut Parser, body: &mut Body) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Var => {
            let variable = parse_variable_decl(parser)?;
            body.declarations.push(Declaration::Variable(variable));
        }
        TokenKind::Type => {
            let type_decl = parse_type_decl(parser)?;
            body.declarations.push(Declaration::Type(type_decl));
        }
        TokenKind::Routine => return Err(parser.unexpected("statement")),
        _ => body.statements.push(parse_stmt(parser)?),
    }

    Ok(())
}

/// Body followed by the closing `end`.
fn parse_closed_body(parser: &mut Parser) -> Result<BodyId, Error> {
    let body = parse_body(parser)?;
    parser.expect(TokenKind::End, "`end`")?;
    Ok(body)
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Loop, "`loop`")?;
    let body = parse_closed_body(parser)?;

    let span = parser.span_from(start);
    Ok(parser
        .ast_mut()
        .add_statement(Statement::new(StmtKind::WhileLoop { condition, body }, span)))
}

/// `for i in [reverse] from..to loop ... end`
///
/// The counter becomes an integer variable declaration; whether it shadows
/// anything is left to name resolution.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().position;

    let name = parser.expect(TokenKind::Identifier, "loop variable name")?;
    parser.expect(TokenKind::In, "`in`")?;

    let reverse = parser.current_token_kind() == TokenKind::Reverse;
    if reverse {
        parser.advance();
    }

    let from = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::DotDot, "`..`")?;
    let to = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Loop, "`loop`")?;

    let name_span = Span::new(name.position, name.end());
    let ast = parser.ast_mut();
    let counter_type = ast.add_type(Type::new(TypeKind::Integer, name_span));
    let variable = ast.add_variable(VariableDecl {
        span: name_span,
        name: name.value,
        var_type: Some(counter_type),
        initializer: None,
    });

    let body = parse_closed_body(parser)?;

    let span = parser.span_from(start);
    Ok(parser.ast_mut().add_statement(Statement::new(
        StmtKind::ForLoop {
            variable,
            from,
            to,
            reverse,
            body,
        },
        span,
    )))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().position;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then, "`then`")?;
    let then_body = parse_body(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_body(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::End, "`end`")?;

    let span = parser.span_from(start);
    Ok(parser.ast_mut().add_statement(Statement::new(
        StmtKind::If {
            condition,
            then_body,
            else_body,
        },
        span,
    )))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().position;

    let value = match parser.current_token_kind() {
        TokenKind::Newline
        | TokenKind::Semicolon
        | TokenKind::End
        | TokenKind::Else
        | TokenKind::EOF => None,
        _ => Some(parse_expr(parser, BindingPower::Default)?),
    };

    let span = parser.span_from(start);
    Ok(parser
        .ast_mut()
        .add_statement(Statement::new(StmtKind::Return { value }, span)))
}
