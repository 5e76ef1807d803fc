use crate::{
    ast::{
        ast::ExprId,
        expressions::{BinaryOperator, ExprKind, Expression, UnaryOperator},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprId, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expression"));
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than `bp`, keep extending the lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(operator_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
            break;
        };
        if operator_bp <= bp {
            break;
        }
        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

fn expression_span(parser: &Parser, id: ExprId) -> Span {
    parser.ast().expression(id).span
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let token = parser.advance();
    let span = Span::new(token.position, token.end());

    let expression = match token.kind {
        TokenKind::IntegerLiteral => match token.value.parse::<i64>() {
            Ok(value) => Expression::integer(value, span),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::InvalidLiteral {
                        literal: token.value,
                    },
                    token.position,
                ))
            }
        },
        TokenKind::RealLiteral => match token.value.parse::<f64>() {
            Ok(value) => Expression::real(value, span),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::InvalidLiteral {
                        literal: token.value,
                    },
                    token.position,
                ))
            }
        },
        TokenKind::True => Expression::boolean(true, span),
        TokenKind::False => Expression::boolean(false, span),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: String::from("literal"),
                    found: token.to_string(),
                },
                token.position,
            ))
        }
    };

    Ok(parser.ast_mut().add_expression(expression))
}

/// A bare name, or a call when an argument list follows.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let name_token = parser.advance();

    if parser.current_token_kind() != TokenKind::OpenParen {
        let span = Span::new(name_token.position, name_token.end());
        return Ok(parser.ast_mut().add_expression(Expression::new(
            ExprKind::Identifier {
                name: name_token.value,
                variable: None,
            },
            span,
        )));
    }

    parser.advance();
    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen, "`,` or `)`")?;

    let span = parser.span_from(name_token.position);
    Ok(parser.ast_mut().add_expression(Expression::new(
        ExprKind::RoutineCall {
            name: name_token.value,
            routine: None,
            arguments,
        },
        span,
    )))
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let operator = match kind {
        TokenKind::Or => BinaryOperator::Or,
        TokenKind::Xor => BinaryOperator::Xor,
        TokenKind::And => BinaryOperator::And,
        TokenKind::Equal => BinaryOperator::Equal,
        TokenKind::NotEqual => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::Dot => BinaryOperator::Member,
        TokenKind::OpenBracket => BinaryOperator::Index,
        _ => return None,
    };
    Some(operator)
}

fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Not => Some(UnaryOperator::Not),
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::Minus => Some(UnaryOperator::Minus),
        _ => None,
    }
}

fn add_binary(
    parser: &mut Parser,
    operator: BinaryOperator,
    left: ExprId,
    right: ExprId,
    span: Span,
) -> ExprId {
    parser.ast_mut().add_expression(Expression::new(
        ExprKind::Binary {
            operator,
            left,
            right,
        },
        span,
    ))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let Some(operator) = binary_operator(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("operator"),
                found: operator_token.to_string(),
            },
            operator_token.position,
        ));
    };

    let right = parse_expr(parser, bp)?;

    let span = Span::new(
        expression_span(parser, left).start,
        expression_span(parser, right).end,
    );
    Ok(add_binary(parser, operator, left, right, span))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let Some(operator) = unary_operator(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: String::from("unary operator"),
                found: operator_token.to_string(),
            },
            operator_token.position,
        ));
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    let span = Span::new(operator_token.position, expression_span(parser, operand).end);
    Ok(parser
        .ast_mut()
        .add_expression(Expression::new(ExprKind::Unary { operator, operand }, span)))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "`)`")?;

    Ok(expr)
}

/// `record.field`: the right side binds as tightly as member access itself,
/// so it is a single name.
pub fn parse_member_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.advance();
    let member = parse_expr(parser, bp)?;

    let span = Span::new(
        expression_span(parser, left).start,
        expression_span(parser, member).end,
    );
    Ok(add_binary(parser, BinaryOperator::Member, left, member, span))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: ExprId,
    _bp: BindingPower,
) -> Result<ExprId, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket, "`]`")?;

    let span = parser.span_from(expression_span(parser, left).start);
    Ok(add_binary(parser, BinaryOperator::Index, left, index, span))
}
