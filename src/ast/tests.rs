//! Unit tests for the tree model.
//!
//! This module contains tests for:
//! - Arena handles and the shared primitive type nodes
//! - Alias resolution and structural type comparison
//! - Operator text
//! - Visitor traversal and expression replacement

use crate::{parser::parser::parse, Span};

use super::{
    ast::{Ast, ExprId, TypeId},
    declarations::{Declaration, TypeDecl, VariableDecl},
    expressions::{BinaryOperator, ExprKind, Expression, UnaryOperator},
    types::{Type, TypeKind},
    visitor::{walk_expression, Visitor},
};

fn add_type(ast: &mut Ast, kind: TypeKind) -> TypeId {
    ast.add_type(Type::new(kind, Span::default()))
}

fn alias(ast: &mut Ast, name: &str) -> TypeId {
    add_type(
        ast,
        TypeKind::Aliased {
            name: name.to_string(),
            resolved: None,
        },
    )
}

fn link(ast: &mut Ast, alias: TypeId, target: TypeId, name: &str) {
    let decl = ast.add_type_decl(TypeDecl {
        span: Span::default(),
        name: name.to_string(),
        ty: target,
    });
    if let TypeKind::Aliased { resolved, .. } = &mut ast.ty_mut(alias).kind {
        *resolved = Some(decl);
    }
}

#[test]
fn test_builtin_primitive_types() {
    let mut ast = Ast::new();

    assert_eq!(ast.ty(Ast::INTEGER).kind, TypeKind::Integer);
    assert_eq!(ast.ty(Ast::REAL).kind, TypeKind::Real);
    assert_eq!(ast.ty(Ast::BOOLEAN).kind, TypeKind::Boolean);
    assert_eq!(add_type(&mut ast, TypeKind::Integer), TypeId(3));
}

#[test]
fn test_handles_are_stable() {
    let mut ast = Ast::new();
    let first = ast.add_expression(Expression::integer(1, Span::default()));
    let second = ast.add_expression(Expression::boolean(true, Span::default()));

    assert_eq!(first, ExprId(0));
    assert_eq!(second, ExprId(1));
    assert_eq!(ast.expression(first).kind, ExprKind::Integer(1));
    assert_eq!(ast.expression(second).ty, Some(Ast::BOOLEAN));
    assert!(ast.expression(second).constant);
}

#[test]
fn test_resolve_type_follows_aliases() {
    let mut ast = Ast::new();
    let integer = add_type(&mut ast, TypeKind::Integer);
    let count = alias(&mut ast, "count");
    let total = alias(&mut ast, "total");
    link(&mut ast, count, integer, "count");
    link(&mut ast, total, count, "total");

    assert_eq!(ast.resolve_type(total), Some(integer));
    assert!(ast.same_type(total, Ast::INTEGER));
    assert!(!ast.same_type(total, Ast::REAL));
}

#[test]
fn test_unresolved_alias_matches_nothing() {
    let mut ast = Ast::new();
    let unknown = alias(&mut ast, "unknown");

    assert_eq!(ast.resolve_type(unknown), None);
    assert!(!ast.same_type(unknown, unknown));
}

#[test]
fn test_resolve_type_stops_on_cycle() {
    let mut ast = Ast::new();
    let a = alias(&mut ast, "b");
    let b = alias(&mut ast, "a");
    link(&mut ast, a, b, "b");
    link(&mut ast, b, a, "a");

    assert_eq!(ast.resolve_type(a), None);
}

#[test]
fn test_same_type_is_structural_for_arrays() {
    let mut ast = Ast::new();
    let ints = add_type(
        &mut ast,
        TypeKind::Array {
            length: None,
            element: Ast::INTEGER,
        },
    );
    let more_ints = add_type(
        &mut ast,
        TypeKind::Array {
            length: None,
            element: Ast::INTEGER,
        },
    );
    let reals = add_type(
        &mut ast,
        TypeKind::Array {
            length: None,
            element: Ast::REAL,
        },
    );

    assert!(ast.same_type(ints, more_ints));
    assert!(!ast.same_type(ints, reals));
    assert_eq!(ast.type_name(reals), "array real");
}

#[test]
fn test_same_type_compares_records_by_identity() {
    let mut ast = Ast::new();
    let first = add_type(&mut ast, TypeKind::Record { fields: vec![] });
    let second = add_type(&mut ast, TypeKind::Record { fields: vec![] });
    let named = alias(&mut ast, "point");
    link(&mut ast, named, first, "point");

    assert!(ast.same_type(first, first));
    assert!(ast.same_type(named, first));
    assert!(!ast.same_type(first, second));
}

#[test]
fn test_variable_type_falls_back_to_initializer() {
    let mut ast = Ast::new();
    let initializer = ast.add_expression(Expression::real(1.5, Span::default()));
    let declared = ast.add_variable(VariableDecl {
        span: Span::default(),
        name: String::from("a"),
        var_type: Some(Ast::INTEGER),
        initializer: Some(initializer),
    });
    let inferred = ast.add_variable(VariableDecl {
        span: Span::default(),
        name: String::from("b"),
        var_type: None,
        initializer: Some(initializer),
    });

    assert_eq!(ast.variable_type(declared), Some(Ast::INTEGER));
    assert_eq!(ast.variable_type(inferred), Some(Ast::REAL));
}

#[test]
fn test_operator_display() {
    assert_eq!(UnaryOperator::Not.to_string(), "not");
    assert_eq!(UnaryOperator::Minus.to_string(), "-");
    assert_eq!(BinaryOperator::NotEqual.to_string(), "/=");
    assert_eq!(BinaryOperator::Modulo.to_string(), "%");
    assert_eq!(BinaryOperator::Xor.to_string(), "xor");
    assert_eq!(BinaryOperator::Member.to_string(), ".");
}

#[test]
fn test_operator_classes() {
    assert!(BinaryOperator::Divide.is_arithmetic());
    assert!(!BinaryOperator::Modulo.is_arithmetic());
    assert!(BinaryOperator::GreaterEqual.is_ordering());
    assert!(BinaryOperator::Xor.is_logical());
    assert!(!BinaryOperator::Equal.is_logical());
}

/// Replaces every identifier with the literal `0`.
struct ZeroIdentifiers {
    replaced: usize,
}

impl Visitor for ZeroIdentifiers {
    fn visit_expression(&mut self, ast: &mut Ast, id: ExprId) -> Option<ExprId> {
        walk_expression(self, ast, id);

        let expression = ast.expression(id);
        if let ExprKind::Identifier { .. } = expression.kind {
            self.replaced += 1;
            let span = expression.span;
            return Some(ast.add_expression(Expression::integer(0, span)));
        }
        None
    }
}

#[test]
fn test_visitor_applies_replacements_in_every_slot() {
    let source = "var v is a + f(b)
type t is array [n] integer
routine r() is
  c := -d
  p(e)
end
";
    let (mut ast, errors) = parse(source);
    assert!(errors.is_empty());

    let mut visitor = ZeroIdentifiers { replaced: 0 };
    visitor.visit_program(&mut ast);
    assert_eq!(visitor.replaced, 6);

    let v = match ast.program.declarations[0] {
        Declaration::Variable(id) => ast.variable(id),
        other => panic!("expected a variable, found {:?}", other),
    };
    let ExprKind::Binary { left, right, .. } = &ast.expression(v.initializer.unwrap()).kind
    else {
        panic!("expected a binary expression");
    };
    assert_eq!(ast.expression(*left).kind, ExprKind::Integer(0));
    let ExprKind::RoutineCall { arguments, .. } = &ast.expression(*right).kind else {
        panic!("expected a call");
    };
    assert_eq!(ast.expression(arguments[0]).kind, ExprKind::Integer(0));

    let t = ast.type_decl(ast.program.type_decls().next().unwrap());
    let TypeKind::Array {
        length: Some(length),
        ..
    } = ast.ty(t.ty).kind
    else {
        panic!("expected a sized array");
    };
    assert_eq!(ast.expression(length).kind, ExprKind::Integer(0));
}
