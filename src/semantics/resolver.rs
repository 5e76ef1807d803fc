use std::collections::{HashMap, HashSet};

use log::trace;

use crate::{
    ast::{
        ast::{Ast, BodyId, ExprId, RoutineId, StmtId, TypeDeclId, TypeId, VariableId},
        declarations::Declaration,
        expressions::{BinaryOperator, ExprKind, Expression},
        statements::StmtKind,
        types::TypeKind,
        visitor::{
            visit_operand, walk_expression, walk_statement, walk_statement_expressions, walk_type,
            Visitor,
        },
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{Pass, Stage};

/// Links every name in the tree to its declaration.
///
/// Visible variables and type declarations are kept on stacks that grow when
/// a scope is entered and are truncated when it is left; lookups search them
/// innermost first. Routines are not nested, so they live in a flat map.
///
/// A name declared twice in the program scope stops the pass. A name
/// declared twice in a body only skips the rest of that body.
pub struct Resolver {
    variables: Vec<(String, VariableId)>,
    types: Vec<(String, TypeDeclId)>,
    routines: HashMap<String, RoutineId>,
    /// Variables that open the next body's scope: parameters or a loop counter
    seeds: Vec<VariableId>,
    errors: Vec<Error>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            variables: vec![],
            types: vec![],
            routines: HashMap::new(),
            seeds: vec![],
            errors: vec![],
        }
    }

    fn error(&mut self, error: ErrorImpl, position: Position) {
        self.errors.push(Error::new(error, position));
    }

    /// Checks a scope's declarations for duplicates and makes them visible.
    ///
    /// Returns false when a name was declared twice.
    fn declare_scope(
        &mut self,
        ast: &Ast,
        seeds: &[VariableId],
        declarations: &[Declaration],
    ) -> bool {
        let entries = seeds
            .iter()
            .map(|seed| Declaration::Variable(*seed))
            .chain(declarations.iter().copied());

        let mut seen: HashMap<&str, u32> = HashMap::new();
        let mut unique = true;

        for declaration in entries {
            let (name, span) = ast.declaration_name(declaration);
            if let Some(previous_line) = seen.get(name) {
                self.error(
                    ErrorImpl::Redeclaration {
                        name: name.to_string(),
                        previous_line: *previous_line,
                    },
                    span.start,
                );
                unique = false;
                continue;
            }
            seen.insert(name, span.start.line);

            match declaration {
                Declaration::Variable(id) => self.variables.push((name.to_string(), id)),
                Declaration::Type(id) => self.types.push((name.to_string(), id)),
                Declaration::Routine(id) => {
                    self.routines.entry(name.to_string()).or_insert(id);
                }
            }
        }

        unique
    }

    /// Resolves the declarations of a scope that has just been declared.
    fn resolve_declarations(&mut self, ast: &mut Ast, declarations: &[Declaration]) {
        let type_decls: Vec<TypeDeclId> = declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Type(id) => Some(*id),
                _ => None,
            })
            .collect();

        for type_decl in &type_decls {
            self.visit_type_decl(ast, *type_decl);
        }
        self.check_alias_cycles(ast, &type_decls);

        for declaration in declarations {
            if !matches!(declaration, Declaration::Type(_)) {
                self.visit_declaration(ast, *declaration);
            }
        }
    }

    /// Reports every alias cycle once, at its first declaration.
    fn check_alias_cycles(&mut self, ast: &Ast, type_decls: &[TypeDeclId]) {
        let mut reported: HashSet<TypeDeclId> = HashSet::new();

        for type_decl in type_decls {
            if reported.contains(type_decl) {
                continue;
            }
            if let Some(cycle) = alias_cycle(ast, *type_decl) {
                let declaration = ast.type_decl(*type_decl);
                self.error(
                    ErrorImpl::CyclicType {
                        name: declaration.name.clone(),
                    },
                    declaration.span.start,
                );
                reported.extend(cycle);
            }
        }
    }

    fn lookup_variable(&self, name: &str) -> Option<VariableId> {
        self.variables
            .iter()
            .rev()
            .find(|(visible, _)| visible == name)
            .map(|(_, id)| *id)
    }

    fn lookup_type(&self, name: &str) -> Option<TypeDeclId> {
        self.types
            .iter()
            .rev()
            .find(|(visible, _)| visible == name)
            .map(|(_, id)| *id)
    }

    /// Links an identifier to a variable, or turns it into a call of the
    /// routine it names.
    fn resolve_identifier(&mut self, ast: &mut Ast, id: ExprId, name: String) -> Option<ExprId> {
        if let Some(variable) = self.lookup_variable(&name) {
            let declared = ast.variable(variable).var_type;
            let expression = ast.expression_mut(id);
            if let ExprKind::Identifier { variable: link, .. } = &mut expression.kind {
                *link = Some(variable);
            }
            if declared.is_some() {
                expression.ty = declared;
            }
            return None;
        }

        let span = ast.expression(id).span;
        match self.routines.get(&name) {
            Some(routine) => {
                trace!("{}: rewriting {:?} into a call", span.start, name);
                Some(ast.add_expression(Expression::new(
                    ExprKind::RoutineCall {
                        name,
                        routine: Some(*routine),
                        arguments: vec![],
                    },
                    span,
                )))
            }
            None => {
                self.error(ErrorImpl::UndeclaredName { name }, span.start);
                None
            }
        }
    }

    /// Checks that no record declares the same field twice.
    fn check_fields(&mut self, ast: &Ast, fields: &[VariableId]) {
        let mut seen: HashMap<&str, u32> = HashMap::new();
        for field in fields {
            let field = ast.variable(*field);
            match seen.get(field.name.as_str()) {
                Some(previous_line) => self.error(
                    ErrorImpl::Redeclaration {
                        name: field.name.clone(),
                        previous_line: *previous_line,
                    },
                    field.span.start,
                ),
                None => {
                    seen.insert(&field.name, field.span.start.line);
                }
            }
        }
    }
}

/// The declaration a type names, looking through array element types.
/// Records break the chain.
fn aliased_declaration(ast: &Ast, ty: TypeId) -> Option<TypeDeclId> {
    let mut current = ty;
    loop {
        match ast.ty(current).kind {
            TypeKind::Aliased { resolved, .. } => return resolved,
            TypeKind::Array { element, .. } => current = element,
            _ => return None,
        }
    }
}

/// The type declarations on the alias cycle starting at `start`, if any.
///
/// `type a is array [2] a` is a cycle too: the type would have no end.
fn alias_cycle(ast: &Ast, start: TypeDeclId) -> Option<Vec<TypeDeclId>> {
    let mut path = vec![start];
    let mut current = start;

    loop {
        let next = aliased_declaration(ast, ast.type_decl(current).ty)?;

        if next == start {
            return Some(path);
        }
        if path.contains(&next) {
            // A cycle further down the chain, reported at its own start.
            return None;
        }
        path.push(next);
        current = next;
    }
}

impl Visitor for Resolver {
    fn visit_program(&mut self, ast: &mut Ast) {
        let declarations = ast.program.declarations.clone();
        trace!("entering program scope");

        if !self.declare_scope(ast, &[], &declarations) {
            return;
        }
        self.resolve_declarations(ast, &declarations);
    }

    fn visit_routine(&mut self, ast: &mut Ast, id: RoutineId) {
        let routine = ast.routine(id);
        let parameters = routine.parameters.clone();
        let return_type = routine.return_type;
        let body = routine.body;

        for parameter in &parameters {
            self.visit_variable(ast, *parameter);
        }
        if let Some(return_type) = return_type {
            self.visit_type(ast, return_type);
        }

        self.seeds = parameters;
        self.visit_body(ast, body);
    }

    fn visit_body(&mut self, ast: &mut Ast, id: BodyId) {
        let seeds = std::mem::take(&mut self.seeds);
        let body = ast.body(id);
        let declarations = body.declarations.clone();
        let statements = body.statements.clone();
        let start = body.span.start;

        let marks = (self.variables.len(), self.types.len());
        trace!("{}: entering scope", start);

        if self.declare_scope(ast, &seeds, &declarations) {
            self.resolve_declarations(ast, &declarations);
            for statement in statements {
                self.visit_statement(ast, statement);
            }
        }

        self.variables.truncate(marks.0);
        self.types.truncate(marks.1);
        trace!("{}: leaving scope", start);
    }

    fn visit_statement(&mut self, ast: &mut Ast, id: StmtId) {
        match ast.statement(id).kind.clone() {
            StmtKind::ForLoop { variable, body, .. } => {
                walk_statement_expressions(self, ast, id);
                self.seeds = vec![variable];
                self.visit_body(ast, body);
            }
            StmtKind::Call(_) => {
                walk_statement_expressions(self, ast, id);

                // A bare name that turned out to be a variable is not a call.
                let statement = ast.statement(id);
                if let StmtKind::Call(call) = statement.kind {
                    if let ExprKind::Identifier {
                        variable: Some(_), ..
                    } = ast.expression(call).kind
                    {
                        self.error(ErrorImpl::InvalidStatement, statement.span.start);
                    }
                }
            }
            _ => walk_statement(self, ast, id),
        }
    }

    fn visit_type(&mut self, ast: &mut Ast, id: TypeId) {
        match ast.ty(id).kind.clone() {
            TypeKind::Aliased { name, .. } => match self.lookup_type(&name) {
                Some(declaration) => {
                    if let TypeKind::Aliased { resolved, .. } = &mut ast.ty_mut(id).kind {
                        *resolved = Some(declaration);
                    }
                }
                None => {
                    let position = ast.ty(id).span.start;
                    self.error(ErrorImpl::UndeclaredType { name }, position);
                }
            },
            TypeKind::Record { fields } => {
                self.check_fields(ast, &fields);
                walk_type(self, ast, id);
            }
            _ => walk_type(self, ast, id),
        }
    }

    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        match ast.expression(id).kind.clone() {
            ExprKind::Identifier { name, .. } => self.resolve_identifier(ast, id, name),
            ExprKind::RoutineCall { name, .. } => {
                walk_expression(self, ast, id);
                match self.routines.get(&name).copied() {
                    Some(routine) => {
                        if let ExprKind::RoutineCall { routine: link, .. } =
                            &mut ast.expression_mut(id).kind
                        {
                            *link = Some(routine);
                        }
                    }
                    None => {
                        let position = ast.expression(id).span.start;
                        self.error(ErrorImpl::UndeclaredRoutine { name }, position);
                    }
                }
                None
            }
            ExprKind::Binary {
                operator: BinaryOperator::Member,
                left,
                right,
            } => {
                // The field name is bound once record types are known.
                visit_operand(self, ast, id, 0, left);
                let field = ast.expression(right);
                if !matches!(field.kind, ExprKind::Identifier { .. }) {
                    let position = field.span.start;
                    self.error(ErrorImpl::MemberNotIdentifier, position);
                }
                None
            }
            _ => {
                walk_expression(self, ast, id);
                None
            }
        }
    }
}

impl Pass for Resolver {
    const STAGE: Stage = Stage::NameResolution;

    fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
