use crate::{
    ast::{
        ast::{Ast, ExprId, TypeId},
        expressions::ExprKind,
        types::TypeKind,
        visitor::{walk_expression, walk_type, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{Pass, Stage};

/// Recomputes `constant` on every expression, bottom-up, and requires array
/// lengths to be constant.
///
/// Literals are constant; operators are constant when all their operands
/// are. Names and calls never are. Running the pass again gives the same
/// flags.
pub struct Constants {
    errors: Vec<Error>,
}

impl Default for Constants {
    fn default() -> Self {
        Self::new()
    }
}

impl Constants {
    pub fn new() -> Self {
        Constants { errors: vec![] }
    }
}

fn is_constant(ast: &Ast, id: ExprId) -> bool {
    match &ast.expression(id).kind {
        ExprKind::Integer(_) | ExprKind::Real(_) | ExprKind::Boolean(_) => true,
        ExprKind::Identifier { .. } | ExprKind::RoutineCall { .. } => false,
        ExprKind::Unary { operand, .. } => ast.expression(*operand).constant,
        ExprKind::Binary { left, right, .. } => {
            ast.expression(*left).constant && ast.expression(*right).constant
        }
    }
}

impl Visitor for Constants {
    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        walk_expression(self, ast, id);
        ast.expression_mut(id).constant = is_constant(ast, id);
        None
    }

    fn visit_type(&mut self, ast: &mut Ast, id: TypeId) {
        walk_type(self, ast, id);

        if let TypeKind::Array {
            length: Some(length),
            ..
        } = ast.ty(id).kind
        {
            let length = ast.expression(length);
            if !length.constant {
                self.errors
                    .push(Error::new(ErrorImpl::NonConstantArrayLength, length.span.start));
            }
        }
    }
}

impl Pass for Constants {
    const STAGE: Stage = Stage::Constants;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
