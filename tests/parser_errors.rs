// Fail-fast error behavior: message content, error location, and the
// lexer/parser error split surfaced through the parsing API.

use tinyc::{Error, Lexer, Parser};

fn parse_err(source: &str) -> Error {
    match Parser::new(Lexer::new(source)) {
        Ok(mut parser) => parser
            .parse_program()
            .expect_err("expected the parse to fail"),
        Err(err) => err,
    }
}

fn parser_error(source: &str) -> tinyc::ParserError {
    match parse_err(source) {
        Error::Parser(err) => err,
        other => panic!("expected parser error, got {:?}", other),
    }
}

fn lexer_error(source: &str) -> tinyc::LexerError {
    match parse_err(source) {
        Error::Lexer(err) => err,
        other => panic!("expected lexer error, got {:?}", other),
    }
}

#[test]
fn missing_semicolon_is_blamed_on_following_token() {
    let err = parser_error("int x");
    assert!(err.message.contains("Expected ';'"));
    assert_eq!(err.location.line, 1);
    assert_eq!(err.location.column, 6);
}

#[test]
fn unknown_top_level_token() {
    let err = parser_error("42;");
    assert!(err.message.contains("Expected type, struct, or typedef"));
}

#[test]
fn bare_void_variable_is_rejected() {
    let err = parser_error("void x;");
    // After `void identifier` only a function tail is legal.
    assert!(err.message.contains("Expected '(' after function name"));
}

#[test]
fn void_without_identifier_or_star() {
    let err = parser_error("void;");
    assert!(err.message.contains("Expected identifier or '*' after 'void'"));
}

#[test]
fn negative_case_labels_are_rejected() {
    let err = parser_error("void f() { switch (x) { case -1: break; } }");
    assert!(err.message.contains("Expected integer literal after 'case'"));
}

#[test]
fn missing_close_paren_in_parameters() {
    let err = parser_error("int f(int a {");
    assert!(err.message.contains("Expected ')' after function parameters"));
}

#[test]
fn missing_struct_field_semicolon_aborts_parse() {
    let err = parser_error("struct S { int a } ;");
    assert!(err.message.contains("Expected ';' after struct field"));
}

#[test]
fn missing_expression_reports_statement_position() {
    let err = parser_error("int f() { return +; }");
    assert!(err.message.contains("Expected expression"));
}

#[test]
fn error_location_tracks_lines() {
    let err = parser_error("int a;\nint b\nint c;");
    assert!(err.message.contains("Expected ';'"));
    assert_eq!(err.location.line, 3);
    assert_eq!(err.location.column, 1);
}

#[test]
fn lexical_error_surfaces_through_parse() {
    let err = lexer_error("int x = @;");
    assert!(err.message.contains("Unexpected character"));
    assert_eq!(err.location.column, 9);
}

#[test]
fn unterminated_comment_surfaces_through_parse() {
    let err = lexer_error("int x; /* open");
    assert!(err.message.contains("Unclosed multi-line comment"));
}

#[test]
fn error_display_includes_location() {
    let err = parse_err("int x");
    let rendered = err.to_string();
    assert!(rendered.contains("parser error"));
    assert!(rendered.contains("<input>:1:6"));
}

#[test]
fn cast_requires_angle_brackets() {
    let err = parser_error("void f() { cast(int)(x); }");
    assert!(err.message.contains("Expected '<' after 'cast'"));
}
