use crate::{
    ast::{
        ast::{Ast, ExprId, TypeId},
        expressions::{BinaryOperator, ExprKind, UnaryOperator},
        types::TypeKind,
        visitor::{walk_expression, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{Pass, Stage};

/// Fills in the type of every expression, bottom-up.
///
/// Operands whose type is unknown are never reported; the expression over
/// them just stays untyped, or gets the type its operator always yields.
pub struct Typing {
    report: bool,
    errors: Vec<Error>,
}

impl Default for Typing {
    fn default() -> Self {
        Self::new()
    }
}

impl Typing {
    pub fn new() -> Self {
        Typing {
            report: true,
            errors: vec![],
        }
    }

    /// A typing visitor that drops its diagnostics, for passes that only
    /// need the types.
    pub fn quiet() -> Self {
        Typing {
            report: false,
            errors: vec![],
        }
    }
}

impl Visitor for Typing {
    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        walk_expression(self, ast, id);

        match derive_type(ast, id) {
            Ok(Some(ty)) => ast.expression_mut(id).ty = Some(ty),
            Ok(None) => {}
            Err(error) => {
                if self.report {
                    let position = ast.expression(id).span.start;
                    self.errors.push(Error::new(error, position));
                }
            }
        }
        None
    }
}

impl Pass for Typing {
    const STAGE: Stage = Stage::Typing;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

/// The resolved kind behind an optional type.
fn kind_of(ast: &Ast, ty: Option<TypeId>) -> Option<&TypeKind> {
    ty.and_then(|ty| ast.resolve_type(ty))
        .map(|ty| &ast.ty(ty).kind)
}

fn is_integer(kind: &TypeKind) -> bool {
    matches!(kind, TypeKind::Integer)
}

fn is_boolean(kind: &TypeKind) -> bool {
    matches!(kind, TypeKind::Boolean)
}

fn invalid_operands(operator: impl ToString) -> ErrorImpl {
    ErrorImpl::InvalidOperands {
        operator: operator.to_string(),
    }
}

/// Type of `id`, computed from the types already stored on its operands.
///
/// Member access also binds the field name on its right to the record's
/// field declaration.
pub fn derive_type(ast: &mut Ast, id: ExprId) -> Result<Option<TypeId>, ErrorImpl> {
    let expression = ast.expression(id);

    match expression.kind.clone() {
        ExprKind::Integer(_) => Ok(Some(Ast::INTEGER)),
        ExprKind::Real(_) => Ok(Some(Ast::REAL)),
        ExprKind::Boolean(_) => Ok(Some(Ast::BOOLEAN)),
        ExprKind::Identifier {
            variable: Some(variable),
            ..
        } => Ok(ast.variable_type(variable)),
        ExprKind::Identifier { variable: None, .. } => Ok(expression.ty),
        ExprKind::RoutineCall { routine, .. } => {
            Ok(routine.and_then(|routine| ast.routine(routine).return_type))
        }
        ExprKind::Unary { operator, operand } => {
            let operand_type = ast.expression(operand).ty;
            let valid = match (operator, kind_of(ast, operand_type)) {
                (_, None) => true,
                (UnaryOperator::Not, Some(kind)) => is_boolean(kind),
                (UnaryOperator::Plus | UnaryOperator::Minus, Some(kind)) => kind.is_numeric(),
            };
            if !valid {
                return Err(invalid_operands(operator));
            }

            match operator {
                UnaryOperator::Not => Ok(Some(Ast::BOOLEAN)),
                UnaryOperator::Plus | UnaryOperator::Minus => Ok(operand_type),
            }
        }
        ExprKind::Binary {
            operator: BinaryOperator::Member,
            left,
            right,
        } => derive_member(ast, left, right),
        ExprKind::Binary {
            operator: BinaryOperator::Index,
            left,
            right,
        } => {
            let index = kind_of(ast, ast.expression(right).ty);
            if index.is_some_and(|kind| !is_integer(kind)) {
                return Err(invalid_operands(BinaryOperator::Index));
            }

            match kind_of(ast, ast.expression(left).ty) {
                None => Ok(None),
                Some(TypeKind::Array { element, .. }) => Ok(Some(*element)),
                Some(_) => Err(ErrorImpl::NotAnArray),
            }
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left_type = ast.expression(left).ty;
            let right_type = ast.expression(right).ty;
            let operands = kind_of(ast, left_type).zip(kind_of(ast, right_type));

            if operator.is_arithmetic() {
                return match operands {
                    None => Ok(None),
                    Some((a, b)) if is_integer(a) && is_integer(b) => Ok(Some(Ast::INTEGER)),
                    Some((a, b)) if a.is_numeric() && b.is_numeric() => Ok(Some(Ast::REAL)),
                    Some(_) => Err(invalid_operands(operator)),
                };
            }

            let valid = match operands {
                None => true,
                Some((a, b)) => match operator {
                    BinaryOperator::Modulo => is_integer(a) && is_integer(b),
                    BinaryOperator::Equal | BinaryOperator::NotEqual => {
                        (a.is_numeric() && b.is_numeric())
                            || left_type
                                .zip(right_type)
                                .is_some_and(|(l, r)| ast.same_type(l, r))
                    }
                    _ if operator.is_ordering() => a.is_numeric() && b.is_numeric(),
                    _ => is_boolean(a) && is_boolean(b),
                },
            };
            if !valid {
                return Err(invalid_operands(operator));
            }

            match operator {
                BinaryOperator::Modulo if operands.is_none() => Ok(None),
                BinaryOperator::Modulo => Ok(Some(Ast::INTEGER)),
                _ => Ok(Some(Ast::BOOLEAN)),
            }
        }
    }
}

/// `record.field`: binds the field name and yields the field's type.
fn derive_member(
    ast: &mut Ast,
    record: ExprId,
    field: ExprId,
) -> Result<Option<TypeId>, ErrorImpl> {
    let ExprKind::Identifier { name, .. } = &ast.expression(field).kind else {
        return Ok(None);
    };
    let name = name.clone();

    let fields = match kind_of(ast, ast.expression(record).ty) {
        None => return Ok(None),
        Some(TypeKind::Record { fields }) => fields.clone(),
        Some(_) => return Err(ErrorImpl::NotARecord),
    };

    let Some(declaration) = fields
        .into_iter()
        .find(|candidate| ast.variable(*candidate).name == name)
    else {
        return Err(ErrorImpl::UnknownField { field: name });
    };

    let field_type = ast.variable_type(declaration);
    let expression = ast.expression_mut(field);
    if let ExprKind::Identifier { variable, .. } = &mut expression.kind {
        *variable = Some(declaration);
    }
    expression.ty = field_type;

    Ok(field_type)
}
