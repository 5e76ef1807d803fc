//! Traversal over an [`Ast`].
//!
//! Every pass implements [`Visitor`] and overrides only the node families it
//! cares about; the default methods forward to the `walk_*` functions, which
//! visit children in source order. New passes never require changes to the
//! node types.
//!
//! Visiting an expression may hand back a replacement node. Whoever owns the
//! slot the child was reached through stores the replacement there; a node
//! never rewrites the reference its parent holds to it. The `walk_*`
//! functions do this for every expression slot they visit.

use super::{
    ast::{Ast, BodyId, ExprId, RoutineId, StmtId, TypeDeclId, TypeId, VariableId},
    declarations::Declaration,
    statements::StmtKind,
    types::TypeKind,
};

pub trait Visitor {
    fn visit_program(&mut self, ast: &mut Ast) {
        walk_program(self, ast);
    }

    fn visit_declaration(&mut self, ast: &mut Ast, declaration: Declaration) {
        walk_declaration(self, ast, declaration);
    }

    fn visit_routine(&mut self, ast: &mut Ast, id: RoutineId) {
        walk_routine(self, ast, id);
    }

    fn visit_variable(&mut self, ast: &mut Ast, id: VariableId) {
        walk_variable(self, ast, id);
    }

    fn visit_type_decl(&mut self, ast: &mut Ast, id: TypeDeclId) {
        walk_type_decl(self, ast, id);
    }

    fn visit_type(&mut self, ast: &mut Ast, id: TypeId) {
        walk_type(self, ast, id);
    }

    fn visit_body(&mut self, ast: &mut Ast, id: BodyId) {
        walk_body(self, ast, id);
    }

    fn visit_statement(&mut self, ast: &mut Ast, id: StmtId) {
        walk_statement(self, ast, id);
    }

    /// Returns the node that should take this expression's place, if any.
    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        walk_expression(self, ast, id);
        None
    }
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast) {
    let declarations = ast.program.declarations.clone();
    for declaration in declarations {
        visitor.visit_declaration(ast, declaration);
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(
    visitor: &mut V,
    ast: &mut Ast,
    declaration: Declaration,
) {
    match declaration {
        Declaration::Routine(id) => visitor.visit_routine(ast, id),
        Declaration::Variable(id) => visitor.visit_variable(ast, id),
        Declaration::Type(id) => visitor.visit_type_decl(ast, id),
    }
}

pub fn walk_routine<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: RoutineId) {
    let routine = ast.routine(id);
    let parameters = routine.parameters.clone();
    let return_type = routine.return_type;
    let body = routine.body;

    for parameter in parameters {
        visitor.visit_variable(ast, parameter);
    }
    if let Some(return_type) = return_type {
        visitor.visit_type(ast, return_type);
    }
    visitor.visit_body(ast, body);
}

pub fn walk_variable<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: VariableId) {
    if let Some(var_type) = ast.variable(id).var_type {
        visitor.visit_type(ast, var_type);
    }
    if let Some(initializer) = ast.variable(id).initializer {
        if let Some(replacement) = visitor.visit_expression(ast, initializer) {
            ast.variable_mut(id).initializer = Some(replacement);
        }
    }
}

pub fn walk_type_decl<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: TypeDeclId) {
    let ty = ast.type_decl(id).ty;
    visitor.visit_type(ast, ty);
}

pub fn walk_type<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: TypeId) {
    match ast.ty(id).kind.clone() {
        TypeKind::Array { length, element } => {
            if let Some(length) = length {
                if let Some(replacement) = visitor.visit_expression(ast, length) {
                    if let TypeKind::Array { length, .. } = &mut ast.ty_mut(id).kind {
                        *length = Some(replacement);
                    }
                }
            }
            visitor.visit_type(ast, element);
        }
        TypeKind::Record { fields } => {
            for field in fields {
                visitor.visit_variable(ast, field);
            }
        }
        TypeKind::Aliased { .. } | TypeKind::Integer | TypeKind::Real | TypeKind::Boolean => {}
    }
}

pub fn walk_body<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: BodyId) {
    let body = ast.body(id);
    let declarations = body.declarations.clone();
    let statements = body.statements.clone();

    for declaration in declarations {
        visitor.visit_declaration(ast, declaration);
    }
    for statement in statements {
        visitor.visit_statement(ast, statement);
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: StmtId) {
    walk_statement_expressions(visitor, ast, id);

    let kind = &ast.statement(id).kind;
    let loop_variable = match kind {
        StmtKind::ForLoop { variable, .. } => Some(*variable),
        _ => None,
    };
    let bodies = kind.bodies();

    if let Some(variable) = loop_variable {
        visitor.visit_variable(ast, variable);
    }
    for body in bodies {
        visitor.visit_body(ast, body);
    }
}

/// Visits only the expressions a statement owns, applying replacements.
pub fn walk_statement_expressions<V: Visitor + ?Sized>(
    visitor: &mut V,
    ast: &mut Ast,
    id: StmtId,
) {
    let expressions = ast.statement(id).kind.expressions();
    for (index, expression) in expressions.into_iter().enumerate() {
        if let Some(replacement) = visitor.visit_expression(ast, expression) {
            if let Some(slot) = ast
                .statement_mut(id)
                .kind
                .expression_slots()
                .into_iter()
                .nth(index)
            {
                *slot = replacement;
            }
        }
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, ast: &mut Ast, id: ExprId) {
    let operands = ast.expression(id).kind.operands();
    for (index, operand) in operands.into_iter().enumerate() {
        visit_operand(visitor, ast, id, index, operand);
    }
}

/// Visits the `index`-th operand of `parent` and stores any replacement.
pub fn visit_operand<V: Visitor + ?Sized>(
    visitor: &mut V,
    ast: &mut Ast,
    parent: ExprId,
    index: usize,
    operand: ExprId,
) {
    if let Some(replacement) = visitor.visit_expression(ast, operand) {
        if let Some(slot) = ast
            .expression_mut(parent)
            .kind
            .operand_slots()
            .into_iter()
            .nth(index)
        {
            *slot = replacement;
        }
    }
}
