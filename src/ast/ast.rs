use crate::Span;

use super::{
    declarations::{Body, Declaration, RoutineDecl, TypeDecl, VariableDecl},
    expressions::Expression,
    statements::Statement,
    types::{Type, TypeKind},
};

/// Handle of a [`RoutineDecl`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutineId(pub usize);

/// Handle of a [`VariableDecl`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(pub usize);

/// Handle of a [`TypeDecl`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDeclId(pub usize);

/// Handle of a [`Type`] node stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub usize);

/// Handle of a [`Body`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Handle of a [`Statement`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtId(pub usize);

/// Handle of an [`Expression`] stored in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub usize);

/// Root of the tree: every top level declaration in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub span: Span,
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn routines(&self) -> impl Iterator<Item = RoutineId> + '_ {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Routine(id) => Some(*id),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Variable(id) => Some(*id),
            _ => None,
        })
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDeclId> + '_ {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Type(id) => Some(*id),
            _ => None,
        })
    }
}

/// Arena owning every node of one compilation.
///
/// Parent to child edges are the id fields inside the nodes. Links filled in
/// by the semantic passes (an identifier's variable, a call's routine, an
/// alias's declaration) are ids as well and never imply ownership. No node is
/// removed before the whole arena is dropped, so every id handed out stays
/// valid for the life of the `Ast`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub program: Program,
    routines: Vec<RoutineDecl>,
    variables: Vec<VariableDecl>,
    type_decls: Vec<TypeDecl>,
    types: Vec<Type>,
    bodies: Vec<Body>,
    statements: Vec<Statement>,
    expressions: Vec<Expression>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    /// Shared node for the `integer` primitive, used by literals.
    pub const INTEGER: TypeId = TypeId(0);
    /// Shared node for the `real` primitive, used by literals.
    pub const REAL: TypeId = TypeId(1);
    /// Shared node for the `boolean` primitive, used by literals.
    pub const BOOLEAN: TypeId = TypeId(2);

    pub fn new() -> Self {
        Ast {
            program: Program::default(),
            routines: vec![],
            variables: vec![],
            type_decls: vec![],
            types: vec![
                Type::new(TypeKind::Integer, Span::default()),
                Type::new(TypeKind::Real, Span::default()),
                Type::new(TypeKind::Boolean, Span::default()),
            ],
            bodies: vec![],
            statements: vec![],
            expressions: vec![],
        }
    }

    pub fn add_routine(&mut self, routine: RoutineDecl) -> RoutineId {
        self.routines.push(routine);
        RoutineId(self.routines.len() - 1)
    }

    pub fn add_variable(&mut self, variable: VariableDecl) -> VariableId {
        self.variables.push(variable);
        VariableId(self.variables.len() - 1)
    }

    pub fn add_type_decl(&mut self, type_decl: TypeDecl) -> TypeDeclId {
        self.type_decls.push(type_decl);
        TypeDeclId(self.type_decls.len() - 1)
    }

    pub fn add_type(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() - 1)
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn add_statement(&mut self, statement: Statement) -> StmtId {
        self.statements.push(statement);
        StmtId(self.statements.len() - 1)
    }

    pub fn add_expression(&mut self, expression: Expression) -> ExprId {
        self.expressions.push(expression);
        ExprId(self.expressions.len() - 1)
    }

    pub fn routine(&self, id: RoutineId) -> &RoutineDecl {
        &self.routines[id.0]
    }

    pub fn routine_mut(&mut self, id: RoutineId) -> &mut RoutineDecl {
        &mut self.routines[id.0]
    }

    pub fn variable(&self, id: VariableId) -> &VariableDecl {
        &self.variables[id.0]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut VariableDecl {
        &mut self.variables[id.0]
    }

    pub fn type_decl(&self, id: TypeDeclId) -> &TypeDecl {
        &self.type_decls[id.0]
    }

    pub fn type_decl_mut(&mut self, id: TypeDeclId) -> &mut TypeDecl {
        &mut self.type_decls[id.0]
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    pub fn ty_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.0]
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn statement(&self, id: StmtId) -> &Statement {
        &self.statements[id.0]
    }

    pub fn statement_mut(&mut self, id: StmtId) -> &mut Statement {
        &mut self.statements[id.0]
    }

    pub fn expression(&self, id: ExprId) -> &Expression {
        &self.expressions[id.0]
    }

    pub fn expression_mut(&mut self, id: ExprId) -> &mut Expression {
        &mut self.expressions[id.0]
    }

    /// Name and span of a declaration, whatever its category.
    pub fn declaration_name(&self, declaration: Declaration) -> (&str, Span) {
        match declaration {
            Declaration::Routine(id) => {
                let routine = self.routine(id);
                (&routine.name, routine.span)
            }
            Declaration::Variable(id) => {
                let variable = self.variable(id);
                (&variable.name, variable.span)
            }
            Declaration::Type(id) => {
                let type_decl = self.type_decl(id);
                (&type_decl.name, type_decl.span)
            }
        }
    }

    /// Follows alias links until a concrete type is reached.
    ///
    /// Returns `None` for an alias that was never resolved, or for one that
    /// sits on a cycle. The number of hops is bounded by the number of type
    /// declarations, so this always terminates.
    pub fn resolve_type(&self, id: TypeId) -> Option<TypeId> {
        let mut current = id;
        for _ in 0..=self.type_decls.len() {
            match &self.ty(current).kind {
                TypeKind::Aliased { resolved, .. } => {
                    current = self.type_decl((*resolved)?).ty;
                }
                _ => return Some(current),
            }
        }
        None
    }

    /// Structural equality of two types after alias resolution.
    ///
    /// Primitives compare by kind, arrays by element type (lengths are not
    /// evaluated), records by identity. Element chains are followed at most
    /// once per type node, so an array that contains itself compares unequal
    /// instead of recursing forever.
    pub fn same_type(&self, a: TypeId, b: TypeId) -> bool {
        let (mut a, mut b) = (a, b);

        for _ in 0..=self.types.len() {
            let (Some(left), Some(right)) = (self.resolve_type(a), self.resolve_type(b)) else {
                return false;
            };
            if left == right {
                return true;
            }

            match (&self.ty(left).kind, &self.ty(right).kind) {
                (TypeKind::Integer, TypeKind::Integer)
                | (TypeKind::Real, TypeKind::Real)
                | (TypeKind::Boolean, TypeKind::Boolean) => return true,
                (TypeKind::Array { element: x, .. }, TypeKind::Array { element: y, .. }) => {
                    a = *x;
                    b = *y;
                }
                _ => return false,
            }
        }
        false
    }

    /// Source-like spelling of a type for diagnostics.
    pub fn type_name(&self, id: TypeId) -> String {
        match &self.ty(id).kind {
            TypeKind::Aliased { name, .. } => name.clone(),
            TypeKind::Integer => String::from("integer"),
            TypeKind::Real => String::from("real"),
            TypeKind::Boolean => String::from("boolean"),
            TypeKind::Array { element, .. } => format!("array {}", self.type_name(*element)),
            TypeKind::Record { .. } => String::from("record"),
        }
    }

    /// The type a variable holds: its declared type, or else the type
    /// already computed for its initializer.
    pub fn variable_type(&self, id: VariableId) -> Option<TypeId> {
        let variable = self.variable(id);
        variable.var_type.or_else(|| {
            variable
                .initializer
                .and_then(|initializer| self.expression(initializer).ty)
        })
    }
}
