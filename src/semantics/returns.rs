use crate::{
    ast::{
        ast::{Ast, BodyId, RoutineId, StmtId, TypeDeclId, VariableId},
        statements::StmtKind,
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{Pass, Stage};

/// Requires a `return` on every path through a routine that declares a
/// return type.
pub struct Returns {
    errors: Vec<Error>,
}

impl Default for Returns {
    fn default() -> Self {
        Self::new()
    }
}

impl Returns {
    pub fn new() -> Self {
        Returns { errors: vec![] }
    }
}

/// A body returns once any of its statements does; whatever follows is
/// unreachable.
pub fn body_returns(ast: &Ast, id: BodyId) -> bool {
    ast.body(id)
        .statements
        .iter()
        .any(|statement| statement_returns(ast, *statement))
}

/// Loops may run zero times, so they never count.
pub fn statement_returns(ast: &Ast, id: StmtId) -> bool {
    match &ast.statement(id).kind {
        StmtKind::Return { .. } => true,
        StmtKind::If {
            then_body,
            else_body: Some(else_body),
            ..
        } => body_returns(ast, *then_body) && body_returns(ast, *else_body),
        StmtKind::If { else_body: None, .. }
        | StmtKind::WhileLoop { .. }
        | StmtKind::ForLoop { .. }
        | StmtKind::Assignment { .. }
        | StmtKind::Call(_) => false,
    }
}

impl Visitor for Returns {
    fn visit_routine(&mut self, ast: &mut Ast, id: RoutineId) {
        let routine = ast.routine(id);
        if routine.return_type.is_some() && !body_returns(ast, routine.body) {
            self.errors.push(Error::new(
                ErrorImpl::MissingReturn {
                    routine: routine.name.clone(),
                },
                routine.span.start,
            ));
        }
    }

    fn visit_variable(&mut self, _ast: &mut Ast, _id: VariableId) {}

    fn visit_type_decl(&mut self, _ast: &mut Ast, _id: TypeDeclId) {}
}

impl Pass for Returns {
    const STAGE: Stage = Stage::ReturnPaths;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
