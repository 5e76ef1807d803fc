use crate::{
    ast::{
        ast::{Ast, RoutineId, TypeId},
        types::TypeKind,
        visitor::{walk_type, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{Pass, Stage};

/// Requires every array type to state its length, except the type of a
/// routine parameter itself.
pub struct ArrayLengths {
    /// Set while the next type visited is a parameter's own type
    in_parameter: bool,
    errors: Vec<Error>,
}

impl Default for ArrayLengths {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayLengths {
    pub fn new() -> Self {
        ArrayLengths {
            in_parameter: false,
            errors: vec![],
        }
    }
}

impl Visitor for ArrayLengths {
    fn visit_routine(&mut self, ast: &mut Ast, id: RoutineId) {
        let routine = ast.routine(id);
        let parameters = routine.parameters.clone();
        let return_type = routine.return_type;
        let body = routine.body;

        for parameter in parameters {
            let saved = std::mem::replace(&mut self.in_parameter, true);
            self.visit_variable(ast, parameter);
            self.in_parameter = saved;
        }
        if let Some(return_type) = return_type {
            self.visit_type(ast, return_type);
        }
        self.visit_body(ast, body);
    }

    fn visit_type(&mut self, ast: &mut Ast, id: TypeId) {
        // Only the outermost type of a parameter is exempt.
        let exempt = std::mem::replace(&mut self.in_parameter, false);

        let ty = ast.ty(id);
        if let TypeKind::Array { length: None, .. } = ty.kind {
            if !exempt {
                self.errors
                    .push(Error::new(ErrorImpl::ArraySizeOmitted, ty.span.start));
            }
        }

        walk_type(self, ast, id);
    }
}

impl Pass for ArrayLengths {
    const STAGE: Stage = Stage::ArrayLengths;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
