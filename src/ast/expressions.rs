use std::fmt::Display;

use crate::Span;

use super::ast::{Ast, ExprId, RoutineId, TypeId, VariableId};

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub span: Span,
    /// Evaluable at compile time. Set at construction for literals, and
    /// recomputed bottom-up by the constant pass for everything else.
    pub constant: bool,
    /// Filled in by the semantic passes; fixed at construction for literals.
    pub ty: Option<TypeId>,
    pub kind: ExprKind,
}

impl Expression {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expression {
            span,
            constant: false,
            ty: None,
            kind,
        }
    }

    pub fn integer(value: i64, span: Span) -> Self {
        Expression {
            span,
            constant: true,
            ty: Some(Ast::INTEGER),
            kind: ExprKind::Integer(value),
        }
    }

    pub fn real(value: f64, span: Span) -> Self {
        Expression {
            span,
            constant: true,
            ty: Some(Ast::REAL),
            kind: ExprKind::Real(value),
        }
    }

    pub fn boolean(value: bool, span: Span) -> Self {
        Expression {
            span,
            constant: true,
            ty: Some(Ast::BOOLEAN),
            kind: ExprKind::Boolean(value),
        }
    }

    pub fn is_call_like(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::RoutineCall { .. } | ExprKind::Identifier { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Unary {
        operator: UnaryOperator,
        operand: ExprId,
    },
    Binary {
        operator: BinaryOperator,
        left: ExprId,
        right: ExprId,
    },
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Identifier {
        name: String,
        variable: Option<VariableId>,
    },
    RoutineCall {
        name: String,
        routine: Option<RoutineId>,
        arguments: Vec<ExprId>,
    },
}

impl ExprKind {
    /// Sub-expressions directly owned by this node, in source order.
    pub fn operands(&self) -> Vec<ExprId> {
        match self {
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Binary { left, right, .. } => vec![*left, *right],
            ExprKind::RoutineCall { arguments, .. } => arguments.clone(),
            ExprKind::Integer(_)
            | ExprKind::Real(_)
            | ExprKind::Boolean(_)
            | ExprKind::Identifier { .. } => vec![],
        }
    }

    /// Mutable slots of [`ExprKind::operands`], in the same order.
    pub fn operand_slots(&mut self) -> Vec<&mut ExprId> {
        match self {
            ExprKind::Unary { operand, .. } => vec![operand],
            ExprKind::Binary { left, right, .. } => vec![left, right],
            ExprKind::RoutineCall { arguments, .. } => arguments.iter_mut().collect(),
            ExprKind::Integer(_)
            | ExprKind::Real(_)
            | ExprKind::Boolean(_)
            | ExprKind::Identifier { .. } => vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Plus,
    Minus,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UnaryOperator::Not => "not",
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    Xor,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    /// `record.field`
    Member,
    /// `array[index]`
    Index,
}

impl BinaryOperator {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Subtract
                | BinaryOperator::Multiply
                | BinaryOperator::Divide
        )
    }

    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Or | BinaryOperator::Xor | BinaryOperator::And
        )
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BinaryOperator::Or => "or",
            BinaryOperator::Xor => "xor",
            BinaryOperator::And => "and",
            BinaryOperator::Equal => "=",
            BinaryOperator::NotEqual => "/=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Member => ".",
            BinaryOperator::Index => "[]",
        };
        write!(f, "{}", text)
    }
}
