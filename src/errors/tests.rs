//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::ArraySizeOmitted, Position::new(3, 9));

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 9);
}

#[test]
fn test_error_name() {
    let error = Error::new(
        ErrorImpl::InvalidArgumentCount {
            expected: 2,
            received: 1,
        },
        Position::new(1, 1),
    );

    assert_eq!(error.get_error_name(), "InvalidArgumentCount");
}

#[test]
fn test_error_message() {
    let error = Error::new(
        ErrorImpl::InvalidArgumentCount {
            expected: 2,
            received: 1,
        },
        Position::new(1, 1),
    );

    assert_eq!(
        error.message(),
        "invalid argument count: expected 2, received 1"
    );
    assert_eq!(
        error.to_string(),
        "1:1: invalid argument count: expected 2, received 1"
    );
}

#[test]
fn test_redeclaration_mentions_previous_line() {
    let error = Error::new(
        ErrorImpl::Redeclaration {
            name: "x".to_string(),
            previous_line: 4,
        },
        Position::new(7, 5),
    );

    assert!(error.message().contains("line 4"));
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("line 4")),
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "@".to_string(),
        },
        Position::new(1, 1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_internal_errors() {
    let at_end = Error::new(ErrorImpl::AlreadyAtEnd, Position::new(1, 1));
    let dangling = Error::new(
        ErrorImpl::DanglingReference {
            name: "f".to_string(),
        },
        Position::new(1, 1),
    );
    let user = Error::new(ErrorImpl::NotAnArray, Position::new(1, 1));

    assert!(at_end.is_internal());
    assert!(dangling.is_internal());
    assert!(!user.is_internal());
}
