use crate::Span;

use super::ast::{BodyId, ExprId, RoutineId, StmtId, TypeDeclId, TypeId, VariableId};

/// One entry of a scope's declaration list.
///
/// Programs and bodies keep their declarations interleaved in source order,
/// since redeclaration checks compare against anything declared earlier in
/// the same scope regardless of category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Declaration {
    Routine(RoutineId),
    Variable(VariableId),
    Type(TypeDeclId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDecl {
    pub span: Span,
    pub name: String,
    pub parameters: Vec<VariableId>,
    pub return_type: Option<TypeId>,
    pub body: BodyId,
}

/// A variable, a routine parameter, a record field or a `for` loop counter.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub span: Span,
    pub name: String,
    pub var_type: Option<TypeId>,
    pub initializer: Option<ExprId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub span: Span,
    pub name: String,
    pub ty: TypeId,
}

/// A lexical scope: local variables and types shadow the enclosing scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub span: Span,
    pub declarations: Vec<Declaration>,
    pub statements: Vec<StmtId>,
}
