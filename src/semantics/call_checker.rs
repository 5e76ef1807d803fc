use crate::{
    ast::{
        ast::{Ast, ExprId, VariableId},
        expressions::ExprKind,
        visitor::{walk_expression, walk_variable, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{typing::Typing, Pass, Stage};

/// Checks every call against the routine it was resolved to: the number of
/// arguments, and the type of each argument whose type is known.
pub struct CallChecker {
    errors: Vec<Error>,
}

impl Default for CallChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl CallChecker {
    pub fn new() -> Self {
        CallChecker { errors: vec![] }
    }

    fn check_call(&mut self, ast: &mut Ast, id: ExprId) {
        let call = ast.expression(id);
        let position = call.span.start;
        let ExprKind::RoutineCall {
            name,
            routine,
            arguments,
        } = call.kind.clone()
        else {
            return;
        };

        let Some(routine) = routine else {
            self.errors
                .push(Error::new(ErrorImpl::DanglingReference { name }, position));
            return;
        };

        let routine = ast.routine(routine);
        let parameters = routine.parameters.clone();
        let return_type = routine.return_type;

        if parameters.len() != arguments.len() {
            self.errors.push(Error::new(
                ErrorImpl::InvalidArgumentCount {
                    expected: parameters.len(),
                    received: arguments.len(),
                },
                position,
            ));
        } else {
            for (index, (argument, parameter)) in arguments.iter().zip(&parameters).enumerate() {
                let mut typing = Typing::quiet();
                typing.visit_expression(ast, *argument);

                let (Some(received), Some(expected)) = (
                    ast.expression(*argument).ty,
                    ast.variable(*parameter).var_type,
                ) else {
                    continue;
                };

                if !ast.same_type(received, expected) {
                    self.errors.push(Error::new(
                        ErrorImpl::InvalidArgumentType {
                            index: index + 1,
                            expected: ast.type_name(expected),
                            received: ast.type_name(received),
                        },
                        ast.expression(*argument).span.start,
                    ));
                }
            }
        }

        ast.expression_mut(id).ty = return_type;
    }
}

impl Visitor for CallChecker {
    fn visit_variable(&mut self, ast: &mut Ast, id: VariableId) {
        walk_variable(self, ast, id);

        // Untyped variables take their initializer's type, so later
        // arguments naming them can be checked.
        if let Some(initializer) = ast.variable(id).initializer {
            Typing::quiet().visit_expression(ast, initializer);
        }
    }

    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        walk_expression(self, ast, id);
        self.check_call(ast, id);
        None
    }
}

impl Pass for CallChecker {
    const STAGE: Stage = Stage::CallValidation;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
