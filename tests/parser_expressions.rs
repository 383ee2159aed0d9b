// Expression grammar: precedence, associativity, unary chains, postfix
// chains, casts, comma expressions, and fold locations.

use tinyc::parser::ast::*;
use tinyc::{Lexer, Parser};

fn parse(source: &str) -> Program {
    let mut parser = Parser::new(Lexer::new(source)).expect("first token");
    parser.parse_program().expect("parse")
}

/// Parses `void f() { <expr>; }` and returns the expression.
fn expr(source_expr: &str) -> Expr {
    let program = parse(&format!("void f() {{ {}; }}", source_expr));
    match &program.declarations[0] {
        Declaration::Function {
            body: Some(body), ..
        } => match body.as_ref() {
            Stmt::Block { statements, .. } => match &statements[0] {
                Stmt::Expression { expression, .. } => expression.clone(),
                other => panic!("expected expression statement, got {:?}", other),
            },
            other => panic!("expected block, got {:?}", other),
        },
        other => panic!("expected function definition, got {:?}", other),
    }
}

fn ident_name(e: &Expr) -> &str {
    match e {
        Expr::Identifier { name, .. } => name,
        other => panic!("expected identifier, got {:?}", other),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    match expr("a + b * c") {
        Expr::Binary {
            op: BinaryOp::Add,
            left,
            right,
            ..
        } => {
            assert_eq!(ident_name(&left), "a");
            match *right {
                Expr::Binary {
                    op: BinaryOp::Multiply,
                    left,
                    right,
                    ..
                } => {
                    assert_eq!(ident_name(&left), "b");
                    assert_eq!(ident_name(&right), "c");
                }
                other => panic!("expected multiplication, got {:?}", other),
            }
        }
        other => panic!("expected addition, got {:?}", other),
    }
}

#[test]
fn parentheses_override_precedence() {
    match expr("(a + b) * c") {
        Expr::Binary {
            op: BinaryOp::Multiply,
            left,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Binary {
                    op: BinaryOp::Add,
                    ..
                }
            ));
        }
        other => panic!("expected multiplication, got {:?}", other),
    }
}

#[test]
fn binary_operators_are_left_associative() {
    // a - b - c parses as (a - b) - c.
    match expr("a - b - c") {
        Expr::Binary {
            op: BinaryOp::Subtract,
            left,
            right,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Binary {
                    op: BinaryOp::Subtract,
                    ..
                }
            ));
            assert_eq!(ident_name(&right), "c");
        }
        other => panic!("expected subtraction, got {:?}", other),
    }
}

#[test]
fn assignment_is_right_associative() {
    // a = b = c parses as a = (b = c).
    match expr("a = b = c") {
        Expr::Binary {
            op: BinaryOp::Assign,
            left,
            right,
            ..
        } => {
            assert_eq!(ident_name(&left), "a");
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOp::Assign,
                    ..
                }
            ));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn fold_keeps_original_left_operand_location() {
    // Each fold of a left-associative chain reuses the first operand's
    // location, so the whole chain is blamed on `a`.
    let e = expr("a + b + c");
    let a_location = match &e {
        Expr::Binary { left, .. } => match left.as_ref() {
            Expr::Binary { left, .. } => left.location().clone(),
            other => panic!("expected inner addition, got {:?}", other),
        },
        other => panic!("expected addition, got {:?}", other),
    };
    assert_eq!(e.location(), &a_location);
}

#[test]
fn precedence_cascade_orders_all_levels() {
    // || is the loosest of the chain, so it ends up at the root.
    match expr("a || b && c | d & e == f < g << h + i * j") {
        Expr::Binary {
            op: BinaryOp::LogicalOr,
            ..
        } => {}
        other => panic!("expected logical-or at root, got {:?}", other),
    }
}

#[test]
fn unary_prefix_chains_recurse() {
    match expr("**p") {
        Expr::Unary {
            op: UnaryOp::Dereference,
            operand,
            ..
        } => {
            assert!(matches!(
                *operand,
                Expr::Unary {
                    op: UnaryOp::Dereference,
                    ..
                }
            ));
        }
        other => panic!("expected dereference, got {:?}", other),
    }

    match expr("-!x") {
        Expr::Unary {
            op: UnaryOp::Negative,
            operand,
            ..
        } => {
            assert!(matches!(
                *operand,
                Expr::Unary {
                    op: UnaryOp::LogicalNot,
                    ..
                }
            ));
        }
        other => panic!("expected negation, got {:?}", other),
    }
}

#[test]
fn prefix_and_postfix_increment() {
    match expr("++x") {
        Expr::Unary { op, .. } => {
            assert_eq!(op, UnaryOp::PreIncrement);
            assert!(op.is_prefix());
        }
        other => panic!("expected unary, got {:?}", other),
    }

    match expr("x++") {
        Expr::Unary { op, .. } => {
            assert_eq!(op, UnaryOp::PostIncrement);
            assert!(!op.is_prefix());
        }
        other => panic!("expected unary, got {:?}", other),
    }
}

#[test]
fn postfix_chain_wraps_left_to_right() {
    // a()->b[i].c++ nests as PostInc(Member(Index(Member(Call(a), b), i), c)).
    match expr("a()->b[i].c++") {
        Expr::Unary {
            op: UnaryOp::PostIncrement,
            operand,
            ..
        } => match *operand {
            Expr::Member {
                kind: MemberKind::Dot,
                object,
                member,
                ..
            } => {
                assert_eq!(member, "c");
                match *object {
                    Expr::Index { array, .. } => match *array {
                        Expr::Member {
                            kind: MemberKind::Arrow,
                            object,
                            member,
                            ..
                        } => {
                            assert_eq!(member, "b");
                            assert!(matches!(*object, Expr::Call { .. }));
                        }
                        other => panic!("expected arrow member, got {:?}", other),
                    },
                    other => panic!("expected index, got {:?}", other),
                }
            }
            other => panic!("expected dot member, got {:?}", other),
        },
        other => panic!("expected postfix increment, got {:?}", other),
    }
}

#[test]
fn call_arguments_parse_in_order() {
    match expr("f(1, x, g(2))") {
        Expr::Call {
            callee, arguments, ..
        } => {
            assert_eq!(ident_name(&callee), "f");
            assert_eq!(arguments.len(), 3);
            assert!(matches!(&arguments[2], Expr::Call { .. }));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn cast_expression_carries_target_type() {
    match expr("cast<int*>(p)") {
        Expr::Cast {
            target_type, expr, ..
        } => {
            match target_type {
                Type::Pointer { base, .. } => {
                    assert!(matches!(
                        base.as_ref(),
                        Type::Primitive {
                            kind: PrimitiveKind::Int,
                            ..
                        }
                    ));
                }
                other => panic!("expected pointer target, got {:?}", other),
            }
            assert_eq!(ident_name(&expr), "p");
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

#[test]
fn comma_expression_inside_parentheses() {
    match expr("(a, b)") {
        Expr::Comma { expressions, .. } => {
            assert_eq!(expressions.len(), 2);
            assert_eq!(ident_name(&expressions[0]), "a");
            assert_eq!(ident_name(&expressions[1]), "b");
        }
        other => panic!("expected comma expression, got {:?}", other),
    }
}

#[test]
fn single_expression_is_not_wrapped_in_comma() {
    assert!(matches!(expr("(a)"), Expr::Identifier { .. }));
}

#[test]
fn top_level_comma_expression_statement() {
    match expr("a = 1, b = 2") {
        Expr::Comma { expressions, .. } => assert_eq!(expressions.len(), 2),
        other => panic!("expected comma expression, got {:?}", other),
    }
}

#[test]
fn literal_values_are_normalized() {
    match expr("007") {
        Expr::Literal { kind, value, .. } => {
            assert_eq!(kind, LiteralKind::Integer);
            assert_eq!(value, "7");
        }
        other => panic!("expected literal, got {:?}", other),
    }

    match expr("3.14") {
        Expr::Literal { kind, value, .. } => {
            assert_eq!(kind, LiteralKind::Double);
            assert_eq!(value, "3.140000");
        }
        other => panic!("expected literal, got {:?}", other),
    }

    match expr("'\\n'") {
        Expr::Literal { kind, value, .. } => {
            assert_eq!(kind, LiteralKind::Char);
            assert_eq!(value, "\n");
        }
        other => panic!("expected literal, got {:?}", other),
    }

    match expr("\"hi\"") {
        Expr::Literal { kind, value, .. } => {
            assert_eq!(kind, LiteralKind::String);
            assert_eq!(value, "\"hi\"");
        }
        other => panic!("expected literal, got {:?}", other),
    }
}

#[test]
fn logical_operators_differ_from_bitwise() {
    match expr("a & b && c") {
        Expr::Binary {
            op: BinaryOp::LogicalAnd,
            left,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Binary {
                    op: BinaryOp::BitwiseAnd,
                    ..
                }
            ));
        }
        other => panic!("expected logical and, got {:?}", other),
    }
}

#[test]
fn address_of_and_dereference_in_expressions() {
    match expr("*p = &x") {
        Expr::Binary {
            op: BinaryOp::Assign,
            left,
            right,
            ..
        } => {
            assert!(matches!(
                *left,
                Expr::Unary {
                    op: UnaryOp::Dereference,
                    ..
                }
            ));
            assert!(matches!(
                *right,
                Expr::Unary {
                    op: UnaryOp::AddressOf,
                    ..
                }
            ));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}
