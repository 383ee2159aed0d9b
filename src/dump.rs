//! Human-readable AST dump
//!
//! Renders the tree as indented text, two spaces per level, one
//! `NodeName: detail` line per node with labelled child sections. Useful for
//! eyeballing parser output without wading through JSON.

use crate::parser::ast::{
    Declaration, Expr, ForInit, Parameter, Program, Stmt, Type, VariableDecl,
};

/// Render a program as an indented text tree.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str("Program\n");
    for decl in &program.declarations {
        dump_declaration(&mut out, decl, 1);
    }
    out
}

fn line(out: &mut String, level: usize, text: &str) {
    out.push_str(&"  ".repeat(level));
    out.push_str(text);
    out.push('\n');
}

fn dump_declaration(out: &mut String, decl: &Declaration, level: usize) {
    match decl {
        Declaration::Variable(var) => dump_variable(out, var, level),
        Declaration::Multiple { declarations, .. } => {
            line(out, level, "MultipleDeclaration");
            for var in declarations {
                dump_variable(out, var, level + 1);
            }
        }
        Declaration::Function {
            identifier,
            return_type,
            parameters,
            body,
            ..
        } => {
            let label = if body.is_some() {
                "FunctionDefinition"
            } else {
                "FunctionDeclaration"
            };
            line(out, level, &format!("{}: {}", label, identifier));
            line(out, level, "  Return Type:");
            dump_type(out, return_type, level + 2);
            line(out, level, "  Parameters:");
            for param in parameters {
                dump_parameter(out, param, level + 2);
            }
            if let Some(body) = body {
                line(out, level, "  Body:");
                dump_stmt(out, body, level + 2);
            }
        }
        Declaration::Struct {
            identifier, fields, ..
        } => {
            let label = if fields.is_empty() {
                "StructDeclaration"
            } else {
                "StructDefinition"
            };
            line(out, level, &format!("{}: {}", label, identifier));
            for field in fields {
                dump_variable(out, field, level + 1);
            }
        }
        Declaration::FunctionPointer {
            identifier,
            return_type,
            parameter_types,
            ..
        } => {
            line(
                out,
                level,
                &format!("FunctionPointerDeclaration: {}", identifier),
            );
            line(out, level, "  Return Type:");
            dump_type(out, return_type, level + 2);
            line(out, level, "  Parameter Types:");
            for ty in parameter_types {
                dump_type(out, ty, level + 2);
            }
        }
    }
}

fn dump_variable(out: &mut String, var: &VariableDecl, level: usize) {
    line(
        out,
        level,
        &format!("VariableDeclaration: {}", var.identifier),
    );
    line(out, level, "  Type:");
    dump_type(out, &var.ty, level + 2);
    if let Some(size) = &var.array_size {
        line(out, level, "  Array Size:");
        dump_expr(out, size, level + 2);
    }
    if let Some(init) = &var.initializer {
        line(out, level, "  Initializer:");
        dump_expr(out, init, level + 2);
    }
}

fn dump_parameter(out: &mut String, param: &Parameter, level: usize) {
    line(out, level, &format!("Parameter: {}", param.identifier));
    line(out, level, "  Type:");
    dump_type(out, &param.ty, level + 2);
}

fn dump_type(out: &mut String, ty: &Type, level: usize) {
    match ty {
        Type::Primitive { kind, .. } => {
            line(out, level, &format!("PrimitiveType: {}", kind.as_str()));
        }
        Type::Named { identifier, .. } => {
            line(out, level, &format!("NamedType: {}", identifier));
        }
        Type::Pointer { base, .. } => {
            line(out, level, "PointerType:");
            dump_type(out, base, level + 1);
        }
    }
}

fn dump_expr(out: &mut String, expr: &Expr, level: usize) {
    match expr {
        Expr::Literal { kind, value, .. } => {
            line(
                out,
                level,
                &format!("Literal ({}): {}", kind.as_str(), value),
            );
        }
        Expr::Identifier { name, .. } => {
            line(out, level, &format!("Identifier: {}", name));
        }
        Expr::Binary {
            op, left, right, ..
        } => {
            line(out, level, &format!("BinaryExpression: {}", op.symbol()));
            line(out, level, "  Left:");
            dump_expr(out, left, level + 2);
            line(out, level, "  Right:");
            dump_expr(out, right, level + 2);
        }
        Expr::Unary { op, operand, .. } => {
            line(out, level, &format!("UnaryExpression: {}", op.symbol()));
            dump_expr(out, operand, level + 1);
        }
        Expr::Cast {
            target_type, expr, ..
        } => {
            line(out, level, "CastExpression:");
            line(out, level, "  Target Type:");
            dump_type(out, target_type, level + 2);
            line(out, level, "  Expression:");
            dump_expr(out, expr, level + 2);
        }
        Expr::Call {
            callee, arguments, ..
        } => {
            line(out, level, "CallExpression:");
            line(out, level, "  Callee:");
            dump_expr(out, callee, level + 2);
            line(out, level, "  Arguments:");
            for arg in arguments {
                dump_expr(out, arg, level + 2);
            }
        }
        Expr::Index { array, index, .. } => {
            line(out, level, "IndexExpression:");
            line(out, level, "  Array:");
            dump_expr(out, array, level + 2);
            line(out, level, "  Index:");
            dump_expr(out, index, level + 2);
        }
        Expr::Member {
            kind,
            object,
            member,
            ..
        } => {
            line(
                out,
                level,
                &format!("MemberExpression ({}): {}", kind.as_str(), member),
            );
            dump_expr(out, object, level + 1);
        }
        Expr::Comma { expressions, .. } => {
            line(out, level, "CommaExpression:");
            for expr in expressions {
                dump_expr(out, expr, level + 1);
            }
        }
    }
}

fn dump_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    match stmt {
        Stmt::Block { statements, .. } => {
            line(out, level, "BlockStatement");
            for stmt in statements {
                dump_stmt(out, stmt, level + 1);
            }
        }
        Stmt::Expression { expression, .. } => {
            line(out, level, "ExpressionStatement");
            dump_expr(out, expression, level + 1);
        }
        Stmt::Declaration(declaration) => dump_declaration(out, declaration, level),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            line(out, level, "IfStatement");
            line(out, level, "  Condition:");
            dump_expr(out, condition, level + 2);
            line(out, level, "  Then:");
            dump_stmt(out, then_branch, level + 2);
            if let Some(else_branch) = else_branch {
                line(out, level, "  Else:");
                dump_stmt(out, else_branch, level + 2);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            line(out, level, "WhileStatement");
            line(out, level, "  Condition:");
            dump_expr(out, condition, level + 2);
            line(out, level, "  Body:");
            dump_stmt(out, body, level + 2);
        }
        Stmt::DoWhile {
            body, condition, ..
        } => {
            line(out, level, "DoWhileStatement");
            line(out, level, "  Body:");
            dump_stmt(out, body, level + 2);
            line(out, level, "  Condition:");
            dump_expr(out, condition, level + 2);
        }
        Stmt::For {
            init,
            condition,
            update,
            body,
            ..
        } => {
            line(out, level, "ForStatement");
            if let Some(init) = init {
                line(out, level, "  Initialization:");
                match init {
                    ForInit::Declaration(decl) => dump_declaration(out, decl, level + 2),
                    ForInit::Expression(expr) => dump_expr(out, expr, level + 2),
                }
            }
            if let Some(condition) = condition {
                line(out, level, "  Condition:");
                dump_expr(out, condition, level + 2);
            }
            if let Some(update) = update {
                line(out, level, "  Update:");
                dump_expr(out, update, level + 2);
            }
            line(out, level, "  Body:");
            dump_stmt(out, body, level + 2);
        }
        Stmt::Switch {
            expression, cases, ..
        } => {
            line(out, level, "SwitchStatement");
            line(out, level, "  Expression:");
            dump_expr(out, expression, level + 2);
            for case in cases {
                if case.is_default {
                    line(out, level, "  Default:");
                } else {
                    line(
                        out,
                        level,
                        &format!("  Case {}:", case.value.unwrap_or(0)),
                    );
                }
                for stmt in &case.body {
                    dump_stmt(out, stmt, level + 2);
                }
            }
        }
        Stmt::Break { .. } => line(out, level, "BreakStatement"),
        Stmt::Continue { .. } => line(out, level, "ContinueStatement"),
        Stmt::Return { expression, .. } => {
            line(out, level, "ReturnStatement");
            if let Some(expression) = expression {
                dump_expr(out, expression, level + 1);
            }
        }
    }
}
