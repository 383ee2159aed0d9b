//! JSON serialization of the AST
//!
//! Produces the schema consumed by student backends and the external test
//! harness: every node serializes to
//! `{ "nodeType": <variant>, ...fields..., "location": {filename, line,
//! column} }`. `FunctionDeclaration`/`FunctionDefinition` and
//! `StructDeclaration`/`StructDefinition` are the same AST variant with the
//! `nodeType` chosen by the presence of a body or fields. Optional fields
//! (array sizes, initializers, else branches, for-loop slots) are omitted
//! entirely when absent.

use crate::parser::ast::{
    Declaration, Expr, ForInit, Parameter, Program, SourceLocation, Stmt, SwitchCase, Type,
    VariableDecl,
};
use serde_json::{json, Map, Value};

/// Serialize a whole program to a JSON value.
pub fn program_to_json(program: &Program) -> Value {
    let mut obj = node("Program");
    obj.insert("location".to_string(), location_json(&program.location));
    obj.insert(
        "declarations".to_string(),
        Value::Array(
            program
                .declarations
                .iter()
                .map(declaration_to_json)
                .collect(),
        ),
    );
    Value::Object(obj)
}

/// Serialize a whole program to pretty-printed JSON text.
pub fn to_string_pretty(program: &Program) -> String {
    serde_json::to_string_pretty(&program_to_json(program)).unwrap_or_default()
}

pub fn declaration_to_json(decl: &Declaration) -> Value {
    match decl {
        Declaration::Variable(var) => variable_json(var),
        Declaration::Multiple {
            declarations,
            location,
        } => {
            let mut obj = node("MultipleDeclaration");
            obj.insert(
                "declarations".to_string(),
                Value::Array(declarations.iter().map(variable_json).collect()),
            );
            finish(obj, location)
        }
        Declaration::Function {
            identifier,
            return_type,
            parameters,
            body,
            location,
        } => {
            let mut obj = node(if body.is_some() {
                "FunctionDefinition"
            } else {
                "FunctionDeclaration"
            });
            obj.insert("identifier".to_string(), json!(identifier));
            obj.insert("returnType".to_string(), type_json(return_type));
            obj.insert(
                "parameters".to_string(),
                Value::Array(parameters.iter().map(parameter_json).collect()),
            );
            if let Some(body) = body {
                obj.insert("body".to_string(), stmt_json(body));
            }
            finish(obj, location)
        }
        Declaration::Struct {
            identifier,
            fields,
            location,
        } => {
            let is_definition = !fields.is_empty();
            let mut obj = node(if is_definition {
                "StructDefinition"
            } else {
                "StructDeclaration"
            });
            obj.insert("identifier".to_string(), json!(identifier));
            if is_definition {
                obj.insert(
                    "fields".to_string(),
                    Value::Array(fields.iter().map(variable_json).collect()),
                );
            }
            finish(obj, location)
        }
        Declaration::FunctionPointer {
            identifier,
            return_type,
            parameter_types,
            location,
        } => {
            let mut obj = node("FunctionPointerDeclaration");
            obj.insert("identifier".to_string(), json!(identifier));
            obj.insert("returnType".to_string(), type_json(return_type));
            obj.insert(
                "parameterTypes".to_string(),
                Value::Array(parameter_types.iter().map(type_json).collect()),
            );
            finish(obj, location)
        }
    }
}

fn variable_json(var: &VariableDecl) -> Value {
    let mut obj = node("VariableDeclaration");
    obj.insert("identifier".to_string(), json!(var.identifier));
    obj.insert("type".to_string(), type_json(&var.ty));
    if let Some(size) = &var.array_size {
        obj.insert("arraySize".to_string(), expr_json(size));
    }
    if let Some(init) = &var.initializer {
        obj.insert("initializer".to_string(), expr_json(init));
    }
    finish(obj, &var.location)
}

fn parameter_json(param: &Parameter) -> Value {
    let mut obj = node("Parameter");
    obj.insert("identifier".to_string(), json!(param.identifier));
    obj.insert("type".to_string(), type_json(&param.ty));
    finish(obj, &param.location)
}

pub fn type_json(ty: &Type) -> Value {
    match ty {
        Type::Primitive { kind, location } => {
            let mut obj = node("PrimitiveType");
            obj.insert("kind".to_string(), json!(kind.as_str()));
            finish(obj, location)
        }
        Type::Named {
            identifier,
            location,
        } => {
            let mut obj = node("NamedType");
            obj.insert("identifier".to_string(), json!(identifier));
            finish(obj, location)
        }
        Type::Pointer { base, location } => {
            let mut obj = node("PointerType");
            obj.insert("baseType".to_string(), type_json(base));
            finish(obj, location)
        }
    }
}

pub fn expr_json(expr: &Expr) -> Value {
    match expr {
        Expr::Literal {
            kind,
            value,
            location,
        } => {
            let mut obj = node("Literal");
            obj.insert("kind".to_string(), json!(kind.as_str()));
            obj.insert("value".to_string(), json!(value));
            finish(obj, location)
        }
        Expr::Identifier { name, location } => {
            let mut obj = node("Identifier");
            obj.insert("identifier".to_string(), json!(name));
            finish(obj, location)
        }
        Expr::Binary {
            op,
            left,
            right,
            location,
        } => {
            let mut obj = node("BinaryExpression");
            obj.insert("operator".to_string(), json!(op.symbol()));
            obj.insert("left".to_string(), expr_json(left));
            obj.insert("right".to_string(), expr_json(right));
            finish(obj, location)
        }
        Expr::Unary {
            op,
            operand,
            location,
        } => {
            let mut obj = node("UnaryExpression");
            obj.insert("operator".to_string(), json!(op.symbol()));
            obj.insert("prefix".to_string(), json!(op.is_prefix()));
            obj.insert("operand".to_string(), expr_json(operand));
            finish(obj, location)
        }
        Expr::Cast {
            target_type,
            expr,
            location,
        } => {
            let mut obj = node("CastExpression");
            obj.insert("targetType".to_string(), type_json(target_type));
            obj.insert("expression".to_string(), expr_json(expr));
            finish(obj, location)
        }
        Expr::Call {
            callee,
            arguments,
            location,
        } => {
            let mut obj = node("CallExpression");
            obj.insert("callee".to_string(), expr_json(callee));
            obj.insert(
                "arguments".to_string(),
                Value::Array(arguments.iter().map(expr_json).collect()),
            );
            finish(obj, location)
        }
        Expr::Index {
            array,
            index,
            location,
        } => {
            let mut obj = node("IndexExpression");
            obj.insert("array".to_string(), expr_json(array));
            obj.insert("index".to_string(), expr_json(index));
            finish(obj, location)
        }
        Expr::Member {
            kind,
            object,
            member,
            location,
        } => {
            let mut obj = node("MemberExpression");
            obj.insert("kind".to_string(), json!(kind.as_str()));
            obj.insert("object".to_string(), expr_json(object));
            obj.insert("member".to_string(), json!(member));
            finish(obj, location)
        }
        Expr::Comma {
            expressions,
            location,
        } => {
            let mut obj = node("CommaExpression");
            obj.insert(
                "expressions".to_string(),
                Value::Array(expressions.iter().map(expr_json).collect()),
            );
            finish(obj, location)
        }
    }
}

pub fn stmt_json(stmt: &Stmt) -> Value {
    match stmt {
        Stmt::Block {
            statements,
            location,
        } => {
            let mut obj = node("BlockStatement");
            obj.insert(
                "statements".to_string(),
                Value::Array(statements.iter().map(stmt_json).collect()),
            );
            finish(obj, location)
        }
        Stmt::Expression {
            expression,
            location,
        } => {
            let mut obj = node("ExpressionStatement");
            obj.insert("expression".to_string(), expr_json(expression));
            finish(obj, location)
        }
        // Declarations in statement position serialize as themselves.
        Stmt::Declaration(declaration) => declaration_to_json(declaration),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        } => {
            let mut obj = node("IfStatement");
            obj.insert("condition".to_string(), expr_json(condition));
            obj.insert("thenBranch".to_string(), stmt_json(then_branch));
            if let Some(else_branch) = else_branch {
                obj.insert("elseBranch".to_string(), stmt_json(else_branch));
            }
            finish(obj, location)
        }
        Stmt::While {
            condition,
            body,
            location,
        } => {
            let mut obj = node("WhileStatement");
            obj.insert("condition".to_string(), expr_json(condition));
            obj.insert("body".to_string(), stmt_json(body));
            finish(obj, location)
        }
        Stmt::DoWhile {
            body,
            condition,
            location,
        } => {
            let mut obj = node("DoWhileStatement");
            obj.insert("body".to_string(), stmt_json(body));
            obj.insert("condition".to_string(), expr_json(condition));
            finish(obj, location)
        }
        Stmt::For {
            init,
            condition,
            update,
            body,
            location,
        } => {
            let mut obj = node("ForStatement");
            if let Some(init) = init {
                let value = match init {
                    ForInit::Declaration(decl) => declaration_to_json(decl),
                    ForInit::Expression(expr) => expr_json(expr),
                };
                obj.insert("initialization".to_string(), value);
            }
            if let Some(condition) = condition {
                obj.insert("condition".to_string(), expr_json(condition));
            }
            if let Some(update) = update {
                obj.insert("update".to_string(), expr_json(update));
            }
            obj.insert("body".to_string(), stmt_json(body));
            finish(obj, location)
        }
        Stmt::Switch {
            expression,
            cases,
            location,
        } => {
            let mut obj = node("SwitchStatement");
            obj.insert("expression".to_string(), expr_json(expression));
            obj.insert(
                "cases".to_string(),
                Value::Array(cases.iter().map(case_json).collect()),
            );
            finish(obj, location)
        }
        Stmt::Break { location } => finish(node("BreakStatement"), location),
        Stmt::Continue { location } => finish(node("ContinueStatement"), location),
        Stmt::Return {
            expression,
            location,
        } => {
            let mut obj = node("ReturnStatement");
            if let Some(expression) = expression {
                obj.insert("expression".to_string(), expr_json(expression));
            }
            finish(obj, location)
        }
    }
}

fn case_json(case: &SwitchCase) -> Value {
    let mut obj = Map::new();
    obj.insert("isDefault".to_string(), json!(case.is_default));
    if let Some(value) = case.value {
        obj.insert("value".to_string(), json!(value));
    }
    obj.insert(
        "body".to_string(),
        Value::Array(case.body.iter().map(stmt_json).collect()),
    );
    Value::Object(obj)
}

fn node(node_type: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("nodeType".to_string(), json!(node_type));
    obj
}

fn finish(mut obj: Map<String, Value>, location: &SourceLocation) -> Value {
    obj.insert("location".to_string(), location_json(location));
    Value::Object(obj)
}

fn location_json(location: &SourceLocation) -> Value {
    json!(location)
}
