use crate::Span;

use super::ast::{BodyId, ExprId, VariableId};

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub span: Span,
    pub kind: StmtKind,
}

impl Statement {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Statement { span, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Assignment {
        lhs: ExprId,
        rhs: ExprId,
    },
    WhileLoop {
        condition: ExprId,
        body: BodyId,
    },
    ForLoop {
        variable: VariableId,
        from: ExprId,
        to: ExprId,
        reverse: bool,
        body: BodyId,
    },
    If {
        condition: ExprId,
        then_body: BodyId,
        else_body: Option<BodyId>,
    },
    Return {
        value: Option<ExprId>,
    },
    /// A routine call used for its effect. Holds either a `RoutineCall` or,
    /// until name resolution rewrites it, a bare `Identifier`.
    Call(ExprId),
}

impl StmtKind {
    /// Expressions directly owned by this statement, in source order.
    pub fn expressions(&self) -> Vec<ExprId> {
        match self {
            StmtKind::Assignment { lhs, rhs } => vec![*lhs, *rhs],
            StmtKind::WhileLoop { condition, .. } => vec![*condition],
            StmtKind::ForLoop { from, to, .. } => vec![*from, *to],
            StmtKind::If { condition, .. } => vec![*condition],
            StmtKind::Return { value } => value.iter().copied().collect(),
            StmtKind::Call(call) => vec![*call],
        }
    }

    /// Mutable slots of [`StmtKind::expressions`], in the same order.
    pub fn expression_slots(&mut self) -> Vec<&mut ExprId> {
        match self {
            StmtKind::Assignment { lhs, rhs } => vec![lhs, rhs],
            StmtKind::WhileLoop { condition, .. } => vec![condition],
            StmtKind::ForLoop { from, to, .. } => vec![from, to],
            StmtKind::If { condition, .. } => vec![condition],
            StmtKind::Return { value } => value.iter_mut().collect(),
            StmtKind::Call(call) => vec![call],
        }
    }

    /// Nested bodies, in source order.
    pub fn bodies(&self) -> Vec<BodyId> {
        match self {
            StmtKind::WhileLoop { body, .. } | StmtKind::ForLoop { body, .. } => vec![*body],
            StmtKind::If {
                then_body,
                else_body,
                ..
            } => std::iter::once(*then_body).chain(*else_body).collect(),
            StmtKind::Assignment { .. } | StmtKind::Return { .. } | StmtKind::Call(_) => vec![],
        }
    }
}
