use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A diagnostic: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The human readable message, without position.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn is_internal(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::AlreadyAtEnd | ErrorImpl::DanglingReference { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnterminatedBody => "UnterminatedBody",
            ErrorImpl::InvalidStatement => "InvalidStatement",
            ErrorImpl::InvalidLiteral { .. } => "InvalidLiteral",
            ErrorImpl::Redeclaration { .. } => "Redeclaration",
            ErrorImpl::UndeclaredName { .. } => "UndeclaredName",
            ErrorImpl::UndeclaredType { .. } => "UndeclaredType",
            ErrorImpl::UndeclaredRoutine { .. } => "UndeclaredRoutine",
            ErrorImpl::CyclicType { .. } => "CyclicType",
            ErrorImpl::MemberNotIdentifier => "MemberNotIdentifier",
            ErrorImpl::InvalidArgumentCount { .. } => "InvalidArgumentCount",
            ErrorImpl::InvalidArgumentType { .. } => "InvalidArgumentType",
            ErrorImpl::ArraySizeOmitted => "ArraySizeOmitted",
            ErrorImpl::NonConstantArrayLength => "NonConstantArrayLength",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::UnknownField { .. } => "UnknownField",
            ErrorImpl::NotARecord => "NotARecord",
            ErrorImpl::NotAnArray => "NotAnArray",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::AlreadyAtEnd => "AlreadyAtEnd",
            ErrorImpl::DanglingReference { .. } => "DanglingReference",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::Suggestion(String::from(
                "did you miss a line break or a semicolon?",
            )),
            ErrorImpl::UnterminatedBody => {
                ErrorTip::Suggestion(String::from("every body must be closed with `end`"))
            }
            ErrorImpl::InvalidStatement => ErrorTip::Suggestion(String::from(
                "only assignments and routine calls can be used as statements",
            )),
            ErrorImpl::Redeclaration { name, previous_line } => ErrorTip::Suggestion(format!(
                "`{}` was first declared on line {}",
                name, previous_line
            )),
            ErrorImpl::ArraySizeOmitted => ErrorTip::Suggestion(String::from(
                "arrays may only be unsized when used as a routine parameter type",
            )),
            ErrorImpl::NonConstantArrayLength => ErrorTip::Suggestion(String::from(
                "use literals and operators only, not variables or calls",
            )),
            ErrorImpl::MissingReturn { .. } => ErrorTip::Suggestion(String::from(
                "loops may run zero times and an `if` needs an `else` branch that also returns",
            )),
            ErrorImpl::CyclicType { .. } => ErrorTip::Suggestion(String::from(
                "a type alias cannot refer back to itself",
            )),
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("illegal token {token:?}")]
    IllegalToken { token: String },
    #[error("expected {expected}, found {found:?}")]
    UnexpectedToken { expected: String, found: String },
    #[error("body is not terminated before end of file")]
    UnterminatedBody,
    #[error("expression cannot be used as a statement")]
    InvalidStatement,
    #[error("invalid numeric literal {literal:?}")]
    InvalidLiteral { literal: String },
    #[error("{name:?} is already declared on line {previous_line}")]
    Redeclaration { name: String, previous_line: u32 },
    #[error("undeclared name {name:?}")]
    UndeclaredName { name: String },
    #[error("undeclared type {name:?}")]
    UndeclaredType { name: String },
    #[error("undeclared routine {name:?}")]
    UndeclaredRoutine { name: String },
    #[error("type alias {name:?} is cyclic")]
    CyclicType { name: String },
    #[error("member access requires a field name")]
    MemberNotIdentifier,
    #[error("invalid argument count: expected {expected}, received {received}")]
    InvalidArgumentCount { expected: usize, received: usize },
    #[error("invalid argument type for argument {index}: expected {expected}, received {received}")]
    InvalidArgumentType {
        index: usize,
        expected: String,
        received: String,
    },
    #[error("array size omitted")]
    ArraySizeOmitted,
    #[error("array length must be a constant")]
    NonConstantArrayLength,
    #[error("routine {routine:?} does not return a value on every path")]
    MissingReturn { routine: String },
    #[error("record has no field {field:?}")]
    UnknownField { field: String },
    #[error("member access on a value that is not a record")]
    NotARecord,
    #[error("indexing a value that is not an array")]
    NotAnArray,
    #[error("invalid operand types for {operator:?}")]
    InvalidOperands { operator: String },
    #[error("tokenizer is already at end of input")]
    AlreadyAtEnd,
    #[error("call to {name:?} refers to a routine that does not exist")]
    DanglingReference { name: String },
}
