use crate::Span;

use super::ast::{ExprId, TypeDeclId, TypeId, VariableId};

#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub span: Span,
    pub kind: TypeKind,
}

impl Type {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        Type { span, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A type spelled by name. `resolved` is filled in by name resolution.
    Aliased {
        name: String,
        resolved: Option<TypeDeclId>,
    },
    Integer,
    Real,
    Boolean,
    Array {
        length: Option<ExprId>,
        element: TypeId,
    },
    Record {
        fields: Vec<VariableId>,
    },
}

impl TypeKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeKind::Integer | TypeKind::Real)
    }
}
