//! # TinyC frontend
//!
//! Compiler frontend for TinyC, a small C-like teaching language. It turns
//! source text into a validated, location-annotated abstract syntax tree
//! that downstream backends consume, either directly or through the JSON
//! serialization.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → JSON / dump
//! ```
//!
//! 1. [`parser::lexer`] — tokenizes the source with maximal munch and exact
//!    per-character position tracking.
//! 2. [`parser::parse`] — predictive recursive descent with a single token
//!    of lookahead, pulled from the lexer on demand.
//! 3. [`parser::ast`] — the tagged-union node families the parser builds.
//! 4. [`json`] / [`dump`] — serializers over the finished tree.
//!
//! Errors are fail-fast: the first [`LexerError`] or [`ParserError`] aborts
//! the parse and is returned to the caller with its source location; no
//! partial AST is produced.
//!
//! ## Example
//!
//! ```
//! use tinyc::{Lexer, Parser};
//!
//! let lexer = Lexer::new("int main() { return 0; }");
//! let program = Parser::new(lexer)
//!     .and_then(|mut parser| parser.parse_program())
//!     .expect("valid program");
//! assert_eq!(program.declarations.len(), 1);
//! ```

pub mod dump;
pub mod json;
pub mod parser;

pub use parser::ast::{Program, SourceLocation};
pub use parser::lexer::{Lexer, LexerError, Token, TokenKind};
pub use parser::parse::{Error, Parser, ParserError};
