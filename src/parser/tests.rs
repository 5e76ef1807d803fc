//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable, type and routine declarations
//! - Operator precedence and associativity
//! - Statements and bodies
//! - Array and record types
//! - Error recovery

use crate::{
    ast::{
        ast::{Ast, ExprId},
        declarations::{Declaration, RoutineDecl, VariableDecl},
        expressions::ExprKind,
        statements::StmtKind,
        types::TypeKind,
    },
    Position,
};

use super::parser::parse;

fn parse_ok(source: &str) -> Ast {
    let (ast, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    ast
}

fn variable(ast: &Ast, index: usize) -> &VariableDecl {
    match ast.program.declarations[index] {
        Declaration::Variable(id) => ast.variable(id),
        other => panic!("expected a variable, found {:?}", other),
    }
}

fn routine(ast: &Ast, index: usize) -> &RoutineDecl {
    match ast.program.declarations[index] {
        Declaration::Routine(id) => ast.routine(id),
        other => panic!("expected a routine, found {:?}", other),
    }
}

/// Prefix notation of an expression tree.
fn render(ast: &Ast, id: ExprId) -> String {
    match &ast.expression(id).kind {
        ExprKind::Integer(value) => value.to_string(),
        ExprKind::Real(value) => value.to_string(),
        ExprKind::Boolean(value) => value.to_string(),
        ExprKind::Identifier { name, .. } => name.clone(),
        ExprKind::RoutineCall {
            name, arguments, ..
        } => {
            let arguments: Vec<String> = arguments.iter().map(|arg| render(ast, *arg)).collect();
            format!("{}({})", name, arguments.join(", "))
        }
        ExprKind::Unary { operator, operand } => {
            format!("({} {})", operator, render(ast, *operand))
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => format!(
            "({} {} {})",
            operator,
            render(ast, *left),
            render(ast, *right)
        ),
    }
}

fn initializer(source: &str) -> String {
    let ast = parse_ok(source);
    let variable = variable(&ast, 0);
    render(&ast, variable.initializer.expect("initializer"))
}

#[test]
fn test_parse_variable_declaration() {
    let ast = parse_ok("var x : integer is 42\n");

    assert_eq!(ast.program.declarations.len(), 1);
    let x = variable(&ast, 0);
    assert_eq!(x.name, "x");
    assert_eq!(ast.ty(x.var_type.unwrap()).kind, TypeKind::Integer);
    assert_eq!(
        ast.expression(x.initializer.unwrap()).kind,
        ExprKind::Integer(42)
    );
}

#[test]
fn test_parse_declarations_separated_by_semicolons() {
    let ast = parse_ok("var a : integer; var b : real; type t is boolean");

    assert_eq!(ast.program.declarations.len(), 3);
    assert_eq!(ast.program.variables().count(), 2);
    assert_eq!(ast.program.type_decls().count(), 1);
}

#[test]
fn test_parse_precedence() {
    assert_eq!(initializer("var x is 2 + 6 / 3"), "(+ 2 (/ 6 3))");
    assert_eq!(initializer("var x is (2 + 6) / 3"), "(/ (+ 2 6) 3)");
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(initializer("var x is 10 - 4 - 3"), "(- (- 10 4) 3)");
    assert_eq!(initializer("var x is 8 / 4 % 3"), "(% (/ 8 4) 3)");
}

#[test]
fn test_parse_logical_and_relational_precedence() {
    assert_eq!(
        initializer("var b is a < 1 and c or d = e"),
        "(or (and (< a 1) c) (= d e))"
    );
    assert_eq!(initializer("var b is p xor not q"), "(xor p (not q))");
}

#[test]
fn test_parse_unary_binds_tighter_than_binary() {
    assert_eq!(initializer("var x is -a * b"), "(* (- a) b)");
    assert_eq!(initializer("var x is 1 - -2"), "(- 1 (- 2))");
}

#[test]
fn test_parse_member_and_index() {
    assert_eq!(initializer("var x is a[i + 1].f"), "(. ([] a (+ i 1)) f)");
    assert_eq!(initializer("var x is -p.x * 2"), "(* (- (. p x)) 2)");
}

#[test]
fn test_parse_calls() {
    assert_eq!(initializer("var x is f(1, g(), h)"), "f(1, g(), h)");
}

#[test]
fn test_parse_real_literals() {
    assert_eq!(initializer("var x is 2.5 * .5"), "(* 2.5 0.5)");
}

#[test]
fn test_parse_invalid_literal() {
    let (_, errors) = parse("var x is 99999999999999999999");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidLiteral");
}

#[test]
fn test_parse_routine_declaration() {
    let ast = parse_ok("routine add(a : integer, b : integer) : integer is\n  return a + b\nend\n");

    let add = routine(&ast, 0);
    assert_eq!(add.name, "add");
    assert_eq!(add.parameters.len(), 2);
    assert_eq!(ast.variable(add.parameters[1]).name, "b");
    assert_eq!(ast.ty(add.return_type.unwrap()).kind, TypeKind::Integer);

    let body = ast.body(add.body);
    assert_eq!(body.statements.len(), 1);
    match &ast.statement(body.statements[0]).kind {
        StmtKind::Return { value: Some(value) } => assert_eq!(render(&ast, *value), "(+ a b)"),
        other => panic!("expected a return, found {:?}", other),
    }
}

#[test]
fn test_parse_routine_on_one_line() {
    let ast = parse_ok("routine zero() : integer is return 0 end");

    let zero = routine(&ast, 0);
    assert!(zero.parameters.is_empty());
    assert_eq!(ast.body(zero.body).statements.len(), 1);
}

#[test]
fn test_parse_return_without_value() {
    let ast = parse_ok("routine f() is\n  return\nend");

    let body = ast.body(routine(&ast, 0).body);
    assert_eq!(
        ast.statement(body.statements[0]).kind,
        StmtKind::Return { value: None }
    );
}

#[test]
fn test_parse_call_and_assignment_statements() {
    let ast = parse_ok("routine main() is\n  f(1, 2)\n  g\n  x := h\n  r.a[2] := 0\nend\n");

    let body = ast.body(routine(&ast, 0).body);
    assert_eq!(body.statements.len(), 4);

    match &ast.statement(body.statements[0]).kind {
        StmtKind::Call(call) => assert_eq!(render(&ast, *call), "f(1, 2)"),
        other => panic!("expected a call, found {:?}", other),
    }
    match &ast.statement(body.statements[1]).kind {
        StmtKind::Call(call) => assert!(matches!(
            ast.expression(*call).kind,
            ExprKind::Identifier { .. }
        )),
        other => panic!("expected a call, found {:?}", other),
    }
    match &ast.statement(body.statements[2]).kind {
        StmtKind::Assignment { lhs, rhs } => {
            assert_eq!(render(&ast, *lhs), "x");
            assert_eq!(render(&ast, *rhs), "h");
        }
        other => panic!("expected an assignment, found {:?}", other),
    }
    match &ast.statement(body.statements[3]).kind {
        StmtKind::Assignment { lhs, .. } => assert_eq!(render(&ast, *lhs), "([] (. r a) 2)"),
        other => panic!("expected an assignment, found {:?}", other),
    }
}

#[test]
fn test_parse_local_declarations_in_body() {
    let ast = parse_ok("routine main() is\n  var i is 0\n  type t is integer\n  i := 1\nend");

    let body = ast.body(routine(&ast, 0).body);
    assert_eq!(body.declarations.len(), 2);
    assert_eq!(body.statements.len(), 1);
}

#[test]
fn test_parse_for_loop() {
    let ast = parse_ok("routine main() is\n  for i in reverse 1..n loop\n    p(i)\n  end\nend");

    let body = ast.body(routine(&ast, 0).body);
    match &ast.statement(body.statements[0]).kind {
        StmtKind::ForLoop {
            variable,
            from,
            to,
            reverse,
            body,
        } => {
            let counter = ast.variable(*variable);
            assert_eq!(counter.name, "i");
            assert_eq!(ast.ty(counter.var_type.unwrap()).kind, TypeKind::Integer);
            assert_eq!(render(&ast, *from), "1");
            assert_eq!(render(&ast, *to), "n");
            assert!(*reverse);
            assert_eq!(ast.body(*body).statements.len(), 1);
        }
        other => panic!("expected a for loop, found {:?}", other),
    }
}

#[test]
fn test_parse_while_and_if() {
    let source = "routine main() is
  while i < 10 loop
    if i % 2 = 0 then
      even(i)
    else
      odd(i)
    end
    i := i + 1
  end
end";
    let ast = parse_ok(source);

    let body = ast.body(routine(&ast, 0).body);
    let StmtKind::WhileLoop { condition, body } = &ast.statement(body.statements[0]).kind else {
        panic!("expected a while loop");
    };
    assert_eq!(render(&ast, *condition), "(< i 10)");

    let loop_body = ast.body(*body);
    assert_eq!(loop_body.statements.len(), 2);
    match &ast.statement(loop_body.statements[0]).kind {
        StmtKind::If {
            condition,
            then_body,
            else_body,
        } => {
            assert_eq!(render(&ast, *condition), "(= (% i 2) 0)");
            assert_eq!(ast.body(*then_body).statements.len(), 1);
            assert_eq!(ast.body(else_body.unwrap()).statements.len(), 1);
        }
        other => panic!("expected an if, found {:?}", other),
    }
}

#[test]
fn test_parse_array_and_record_types() {
    let source = "type point is record
  var x : real
  var y : real
end
type row is array [3] point
routine sum(values : array integer) : integer is return 0 end
";
    let ast = parse_ok(source);

    let point = ast.type_decl(ast.program.type_decls().next().unwrap());
    match &ast.ty(point.ty).kind {
        TypeKind::Record { fields } => {
            let names: Vec<&str> = fields
                .iter()
                .map(|field| ast.variable(*field).name.as_str())
                .collect();
            assert_eq!(names, vec!["x", "y"]);
        }
        other => panic!("expected a record, found {:?}", other),
    }

    let row = ast.type_decl(ast.program.type_decls().nth(1).unwrap());
    match &ast.ty(row.ty).kind {
        TypeKind::Array { length, element } => {
            assert_eq!(render(&ast, length.unwrap()), "3");
            assert_eq!(
                ast.ty(*element).kind,
                TypeKind::Aliased {
                    name: String::from("point"),
                    resolved: None
                }
            );
        }
        other => panic!("expected an array, found {:?}", other),
    }

    let sum = routine(&ast, 2);
    let parameter = ast.variable(sum.parameters[0]);
    assert!(matches!(
        ast.ty(parameter.var_type.unwrap()).kind,
        TypeKind::Array { length: None, .. }
    ));
}

#[test]
fn test_parse_expression_statement_must_be_a_call() {
    let (_, errors) = parse("routine main() is\n  1 + 2\nend");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidStatement");
    assert_eq!(errors[0].get_position(), Position::new(2, 3));
}

#[test]
fn test_parse_recovers_and_collects_errors() {
    let source = "var a is
var b : integer
routine f() is
  x :=
  y := )
end
var c is 1
";
    let (ast, errors) = parse(source);

    assert_eq!(errors.len(), 3);
    assert!(errors
        .iter()
        .all(|error| error.get_error_name() == "UnexpectedToken"));
    assert_eq!(errors[0].get_position(), Position::new(1, 9));
    assert_eq!(errors[1].get_position(), Position::new(4, 7));
    assert_eq!(errors[2].get_position(), Position::new(5, 8));

    let names: Vec<&str> = ast
        .program
        .declarations
        .iter()
        .map(|declaration| ast.declaration_name(*declaration).0)
        .collect();
    assert_eq!(names, vec!["b", "f", "c"]);
}

#[test]
fn test_parse_unterminated_body() {
    let (_, errors) = parse("routine f() is\n  x := 1\n");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnterminatedBody");
}

#[test]
fn test_parse_rejects_illegal_token() {
    let (_, errors) = parse("var x is 1 @ 2");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "IllegalToken");
    assert_eq!(errors[0].get_position(), Position::new(1, 12));
}

#[test]
fn test_parse_rejects_nested_routine() {
    let (_, errors) = parse("routine f() is\n  routine g() is end\nend");

    assert!(!errors.is_empty());
    assert_eq!(errors[0].get_error_name(), "UnexpectedToken");
    assert_eq!(errors[0].get_position(), Position::new(2, 3));
}

#[test]
fn test_parse_spans() {
    let ast = parse_ok("var total is a + 10");

    let total = variable(&ast, 0);
    assert_eq!(total.span.start, Position::new(1, 1));
    assert_eq!(total.span.end, Position::new(1, 20));

    let sum = ast.expression(total.initializer.unwrap());
    assert_eq!(sum.span.start, Position::new(1, 14));
    assert_eq!(sum.span.end, Position::new(1, 20));
}
