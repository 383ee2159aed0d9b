// Statement grammar: blocks, control flow, jumps, switch cases, and
// declarations in statement position.

use tinyc::parser::ast::*;
use tinyc::{Lexer, Parser};

fn parse(source: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(source)).expect("first token");
    parser.parse_program().expect("parse")
}

/// Parses `void f() { <body> }` and returns the body statements.
fn body_statements(body: &str) -> Vec<Stmt> {
    let program = parse(&format!("void f() {{ {} }}", body));
    match &program.declarations[0] {
        Declaration::Function {
            body: Some(body), ..
        } => match body.as_ref() {
            Stmt::Block { statements, .. } => statements.clone(),
            other => panic!("expected block, got {:?}", other),
        },
        other => panic!("expected function definition, got {:?}", other),
    }
}

fn single_statement(body: &str) -> Stmt {
    let mut statements = body_statements(body);
    assert_eq!(statements.len(), 1, "expected exactly one statement");
    statements.remove(0)
}

#[test]
fn expression_statement() {
    match single_statement("x = 1;") {
        Stmt::Expression { expression, .. } => {
            assert!(matches!(
                expression,
                Expr::Binary {
                    op: BinaryOp::Assign,
                    ..
                }
            ));
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn declaration_statement_folds_comma_lists() {
    match single_statement("int a = 1, int b = 2;") {
        Stmt::Declaration(Declaration::Multiple { declarations, .. }) => {
            assert_eq!(declarations.len(), 2);
        }
        other => panic!("expected multiple declaration, got {:?}", other),
    }

    match single_statement("double d;") {
        Stmt::Declaration(Declaration::Variable(var)) => assert_eq!(var.identifier, "d"),
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn if_without_else() {
    match single_statement("if (x) return;") {
        Stmt::If {
            else_branch: None, ..
        } => {}
        other => panic!("expected if without else, got {:?}", other),
    }
}

#[test]
fn if_with_else_and_blocks() {
    match single_statement("if (x > 0) { y = 1; } else { y = 2; }") {
        Stmt::If {
            then_branch,
            else_branch: Some(else_branch),
            ..
        } => {
            assert!(matches!(*then_branch, Stmt::Block { .. }));
            assert!(matches!(*else_branch, Stmt::Block { .. }));
        }
        other => panic!("expected if/else, got {:?}", other),
    }
}

#[test]
fn while_and_do_while() {
    match single_statement("while (i < 10) i = i + 1;") {
        Stmt::While { condition, .. } => {
            assert!(matches!(
                condition,
                Expr::Binary {
                    op: BinaryOp::Less,
                    ..
                }
            ));
        }
        other => panic!("expected while, got {:?}", other),
    }

    match single_statement("do i = i + 1; while (i < 10);") {
        Stmt::DoWhile { body, .. } => {
            assert!(matches!(*body, Stmt::Expression { .. }));
        }
        other => panic!("expected do-while, got {:?}", other),
    }
}

#[test]
fn for_with_declaration_init() {
    match single_statement("for (int i = 0; i < 10; i++) { }") {
        Stmt::For {
            init: Some(ForInit::Declaration(Declaration::Variable(var))),
            condition: Some(_),
            update: Some(_),
            ..
        } => {
            assert_eq!(var.identifier, "i");
        }
        other => panic!("expected for with declaration init, got {:?}", other),
    }
}

#[test]
fn for_with_expression_init() {
    match single_statement("for (i = 0; i < 10; i++) { }") {
        Stmt::For {
            init: Some(ForInit::Expression(expr)),
            ..
        } => {
            assert!(matches!(
                expr,
                Expr::Binary {
                    op: BinaryOp::Assign,
                    ..
                }
            ));
        }
        other => panic!("expected for with expression init, got {:?}", other),
    }
}

#[test]
fn for_with_all_slots_empty() {
    match single_statement("for (;;) break;") {
        Stmt::For {
            init: None,
            condition: None,
            update: None,
            ..
        } => {}
        other => panic!("expected empty for slots, got {:?}", other),
    }
}

#[test]
fn switch_with_cases_and_default() {
    let stmt = single_statement(
        "switch (x) { case 1: y = 1; break; case 2: y = 2; break; default: y = 0; }",
    );
    match stmt {
        Stmt::Switch { cases, .. } => {
            assert_eq!(cases.len(), 3);
            assert_eq!(cases[0].value, Some(1));
            assert!(!cases[0].is_default);
            assert_eq!(cases[0].body.len(), 2);
            assert_eq!(cases[1].value, Some(2));
            assert!(cases[2].is_default);
            assert_eq!(cases[2].value, None);
            assert_eq!(cases[2].body.len(), 1);
        }
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn switch_allows_cases_after_default() {
    let stmt = single_statement("switch (x) { default: break; case 1: break; }");
    match stmt {
        Stmt::Switch { cases, .. } => {
            assert_eq!(cases.len(), 2);
            assert!(cases[0].is_default);
            assert_eq!(cases[1].value, Some(1));
        }
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn break_and_continue() {
    let statements = body_statements("while (1) { break; } while (1) { continue; }");
    assert_eq!(statements.len(), 2);
}

#[test]
fn return_with_and_without_value() {
    match single_statement("return;") {
        Stmt::Return {
            expression: None, ..
        } => {}
        other => panic!("expected bare return, got {:?}", other),
    }

    match single_statement("return x + 1;") {
        Stmt::Return {
            expression: Some(expr),
            ..
        } => {
            assert!(matches!(expr, Expr::Binary { op: BinaryOp::Add, .. }));
        }
        other => panic!("expected return with value, got {:?}", other),
    }
}

#[test]
fn nested_blocks() {
    match single_statement("{ { x = 1; } }") {
        Stmt::Block { statements, .. } => {
            assert_eq!(statements.len(), 1);
            assert!(matches!(&statements[0], Stmt::Block { .. }));
        }
        other => panic!("expected nested block, got {:?}", other),
    }
}

#[test]
fn statement_locations_point_at_keywords() {
    let stmt = single_statement("return 0;");
    // The wrapper prefix is `void f() { `, so `return` starts at column 12.
    assert_eq!(stmt.location().line, 1);
    assert_eq!(stmt.location().column, 12);
}
