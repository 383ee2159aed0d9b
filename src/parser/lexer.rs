//! Lexer (tokenizer) for TinyC source code
//!
//! Converts raw source text into [`Token`]s consumed one at a time by the
//! parser. Multi-character operators are matched with maximal munch (`+++`
//! lexes as `++` then `+`, never `+` then `++`), and every token carries the
//! source position of its first character. Once the input is exhausted,
//! [`Lexer::next_token`] keeps returning end-of-file tokens.

use crate::parser::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords
    KwIf,
    KwElse,
    KwWhile,
    KwDo,
    KwFor,
    KwSwitch,
    KwCase,
    KwDefault,
    KwBreak,
    KwContinue,
    KwReturn,
    KwInt,
    KwDouble,
    KwChar,
    KwVoid,
    KwStruct,
    KwTypedef,
    KwCast,

    // Identifiers and literals
    Identifier,
    IntegerLiteral,
    DoubleLiteral,
    CharLiteral,
    StringLiteral,

    // Operators
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Eq,         // =
    EqEq,       // ==
    NotEq,      // !=
    Lt,         // <
    Le,         // <=
    Gt,         // >
    Ge,         // >=
    Amp,        // &
    Pipe,       // |
    AndAnd,     // &&
    OrOr,       // ||
    Bang,       // !
    Tilde,      // ~
    PlusPlus,   // ++
    MinusMinus, // --
    LtLt,       // <<
    GtGt,       // >>
    Arrow,      // ->
    Dot,        // .

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Colon,     // :
    Comma,     // ,

    // End of file
    Eof,
}

/// Decoded payload of a literal token. String literals carry no payload; the
/// parser uses their raw lexeme directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Double(f64),
    Char(char),
}

/// A lexical token: kind, raw source text, start position, and the decoded
/// literal value where one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
    pub value: Option<TokenValue>,
}

impl Token {
    fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
            value: None,
        }
    }

    fn with_value(
        kind: TokenKind,
        lexeme: impl Into<String>,
        location: SourceLocation,
        value: TokenValue,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
            value: Some(value),
        }
    }

    pub fn int_value(&self) -> Option<i64> {
        match self.value {
            Some(TokenValue::Int(v)) => Some(v),
            _ => None,
        }
    }

    pub fn double_value(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Double(v)) => Some(v),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<char> {
        match self.value {
            Some(TokenValue::Char(v)) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntegerLiteral => write!(f, "integer literal {}", self.lexeme),
            TokenKind::DoubleLiteral => write!(f, "double literal {}", self.lexeme),
            TokenKind::CharLiteral => write!(f, "char literal {}", self.lexeme),
            TokenKind::StringLiteral => write!(f, "string literal {}", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexical error: message plus the position of the offending character.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{location}: {message}")]
pub struct LexerError {
    pub message: String,
    pub location: SourceLocation,
}

static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("if", TokenKind::KwIf);
        map.insert("else", TokenKind::KwElse);
        map.insert("while", TokenKind::KwWhile);
        map.insert("do", TokenKind::KwDo);
        map.insert("for", TokenKind::KwFor);
        map.insert("switch", TokenKind::KwSwitch);
        map.insert("case", TokenKind::KwCase);
        map.insert("default", TokenKind::KwDefault);
        map.insert("break", TokenKind::KwBreak);
        map.insert("continue", TokenKind::KwContinue);
        map.insert("return", TokenKind::KwReturn);
        map.insert("int", TokenKind::KwInt);
        map.insert("double", TokenKind::KwDouble);
        map.insert("char", TokenKind::KwChar);
        map.insert("void", TokenKind::KwVoid);
        map.insert("struct", TokenKind::KwStruct);
        map.insert("typedef", TokenKind::KwTypedef);
        map.insert("cast", TokenKind::KwCast);
        map
    })
}

/// Single-pass lexer over one source string.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    filename: String,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a lexer with the default `<input>` filename.
    pub fn new(source: &str) -> Self {
        Self::with_filename(source, "<input>")
    }

    /// Create a lexer reporting positions against the given filename.
    pub fn with_filename(source: &str, filename: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            filename: filename.to_string(),
            line: 1,
            column: 1,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Produce the next token. Idempotently returns [`TokenKind::Eof`] tokens
    /// once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments()?;

        let start = self.current_location();
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, "", start)),
        };

        if c.is_ascii_alphabetic() || c == '_' {
            self.lex_identifier_or_keyword(start)
        } else if c.is_ascii_digit() {
            self.lex_number(start)
        } else if c == '\'' {
            self.lex_char_literal(start)
        } else if c == '"' {
            self.lex_string_literal(start)
        } else {
            self.lex_operator_or_punctuation(start)
        }
    }

    /// Tokenize the whole input, including the final EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn lex_identifier_or_keyword(&mut self, start: SourceLocation) -> Result<Token, LexerError> {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match keywords().get(lexeme.as_str()) {
            Some(&kind) => Ok(Token::new(kind, lexeme, start)),
            None => Ok(Token::new(TokenKind::Identifier, lexeme, start)),
        }
    }

    fn lex_number(&mut self, start: SourceLocation) -> Result<Token, LexerError> {
        let mut lexeme = String::new();
        let mut is_double = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            is_double = true;
            lexeme.push('.');
            self.advance();

            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    lexeme.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_double = true;
            lexeme.push(self.peek().unwrap_or('e'));
            self.advance();

            if matches!(self.peek(), Some('+') | Some('-')) {
                lexeme.push(self.peek().unwrap_or('+'));
                self.advance();
            }

            // The exponent needs at least one digit.
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(LexerError {
                    message: "Invalid number format".to_string(),
                    location: self.current_location(),
                });
            }

            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    lexeme.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if is_double {
            let value: f64 = lexeme.parse().map_err(|_| LexerError {
                message: format!("Invalid double literal: {}", lexeme),
                location: start.clone(),
            })?;
            Ok(Token::with_value(
                TokenKind::DoubleLiteral,
                lexeme,
                start,
                TokenValue::Double(value),
            ))
        } else {
            let value: i64 = lexeme.parse().map_err(|_| LexerError {
                message: format!("Invalid integer literal: {}", lexeme),
                location: start.clone(),
            })?;
            Ok(Token::with_value(
                TokenKind::IntegerLiteral,
                lexeme,
                start,
                TokenValue::Int(value),
            ))
        }
    }

    fn lex_char_literal(&mut self, start: SourceLocation) -> Result<Token, LexerError> {
        let mut lexeme = String::from("'");
        self.advance(); // opening quote

        let value = match self.peek() {
            None => {
                return Err(LexerError {
                    message: "Unterminated character literal".to_string(),
                    location: start,
                });
            }
            Some('\\') => {
                lexeme.push('\\');
                self.advance();
                let escaped = match self.peek() {
                    Some(c) => c,
                    None => {
                        return Err(LexerError {
                            message: "Unterminated character literal".to_string(),
                            location: start,
                        });
                    }
                };
                let value = self.unescape(escaped)?;
                lexeme.push(escaped);
                self.advance();
                value
            }
            Some(c) => {
                lexeme.push(c);
                self.advance();
                c
            }
        };

        if self.peek() != Some('\'') {
            return Err(LexerError {
                message: "Unterminated character literal".to_string(),
                location: start,
            });
        }
        lexeme.push('\'');
        self.advance(); // closing quote

        Ok(Token::with_value(
            TokenKind::CharLiteral,
            lexeme,
            start,
            TokenValue::Char(value),
        ))
    }

    fn lex_string_literal(&mut self, start: SourceLocation) -> Result<Token, LexerError> {
        let mut lexeme = String::from("\"");
        self.advance(); // opening quote

        while let Some(c) = self.peek() {
            if c == '"' {
                lexeme.push('"');
                self.advance();
                // The raw quoted lexeme is the token text; escapes were only
                // validated, not decoded.
                return Ok(Token::new(TokenKind::StringLiteral, lexeme, start));
            }

            if c == '\\' {
                lexeme.push('\\');
                self.advance();
                let escaped = match self.peek() {
                    Some(c) => c,
                    None => break,
                };
                self.unescape(escaped)?;
                lexeme.push(escaped);
                self.advance();
            } else {
                lexeme.push(c);
                self.advance();
            }
        }

        Err(LexerError {
            message: "Unterminated string literal".to_string(),
            location: start,
        })
    }

    fn unescape(&self, escaped: char) -> Result<char, LexerError> {
        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"' => Ok('"'),
            _ => Err(LexerError {
                message: format!("Invalid escape sequence: \\{}", escaped),
                location: self.current_location(),
            }),
        }
    }

    fn lex_operator_or_punctuation(&mut self, start: SourceLocation) -> Result<Token, LexerError> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, "", start)),
        };
        self.advance();

        let token = |kind: TokenKind, lexeme: &str| Ok(Token::new(kind, lexeme, start.clone()));

        match c {
            '(' => token(TokenKind::LParen, "("),
            ')' => token(TokenKind::RParen, ")"),
            '{' => token(TokenKind::LBrace, "{"),
            '}' => token(TokenKind::RBrace, "}"),
            '[' => token(TokenKind::LBracket, "["),
            ']' => token(TokenKind::RBracket, "]"),
            ';' => token(TokenKind::Semicolon, ";"),
            ':' => token(TokenKind::Colon, ":"),
            ',' => token(TokenKind::Comma, ","),
            '.' => token(TokenKind::Dot, "."),
            '+' => {
                if self.peek() == Some('+') {
                    self.advance();
                    token(TokenKind::PlusPlus, "++")
                } else {
                    token(TokenKind::Plus, "+")
                }
            }
            '-' => {
                if self.peek() == Some('-') {
                    self.advance();
                    token(TokenKind::MinusMinus, "--")
                } else if self.peek() == Some('>') {
                    self.advance();
                    token(TokenKind::Arrow, "->")
                } else {
                    token(TokenKind::Minus, "-")
                }
            }
            '*' => token(TokenKind::Star, "*"),
            '/' => token(TokenKind::Slash, "/"),
            '%' => token(TokenKind::Percent, "%"),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    token(TokenKind::EqEq, "==")
                } else {
                    token(TokenKind::Eq, "=")
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    token(TokenKind::NotEq, "!=")
                } else {
                    token(TokenKind::Bang, "!")
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    token(TokenKind::Le, "<=")
                } else if self.peek() == Some('<') {
                    self.advance();
                    token(TokenKind::LtLt, "<<")
                } else {
                    token(TokenKind::Lt, "<")
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    token(TokenKind::Ge, ">=")
                } else if self.peek() == Some('>') {
                    self.advance();
                    token(TokenKind::GtGt, ">>")
                } else {
                    token(TokenKind::Gt, ">")
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    token(TokenKind::AndAnd, "&&")
                } else {
                    token(TokenKind::Amp, "&")
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    token(TokenKind::OrOr, "||")
                } else {
                    token(TokenKind::Pipe, "|")
                }
            }
            '~' => token(TokenKind::Tilde, "~"),
            _ => Err(LexerError {
                message: format!("Unexpected character: '{}' (ASCII: {})", c, c as u32),
                location: start.clone(),
            }),
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexerError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            self.advance();
            if c == '\n' {
                break;
            }
        }
    }

    /// Skips a `/* ... */` comment. Block comments do not nest: the first
    /// `*/` closes the comment regardless of any `/*` inside it.
    fn skip_block_comment(&mut self) -> Result<(), LexerError> {
        let start = self.current_location();
        self.advance(); // '/'
        self.advance(); // '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexerError {
            message: "Unclosed multi-line comment".to_string(),
            location: start,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.filename.as_str(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        lexer
            .tokenize()
            .expect("tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::KwInt);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "main");
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::KwReturn);
        assert_eq!(tokens[6].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[6].int_value(), Some(0));
        assert_eq!(tokens[7].kind, TokenKind::Semicolon);
        assert_eq!(tokens[8].kind, TokenKind::RBrace);
        assert_eq!(tokens[9].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_maximal_munch() {
        assert_eq!(
            kinds("a+++b"),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusPlus,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= && || ++ -- << >> ->"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::LtLt,
                TokenKind::GtGt,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_locations() {
        let mut lexer = Lexer::new("int a;\ndouble b;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location.line, 1);
        assert_eq!(tokens[0].location.column, 1);
        assert_eq!(tokens[1].location.column, 5);
        // `double` starts the second line.
        assert_eq!(tokens[3].kind, TokenKind::KwDouble);
        assert_eq!(tokens[3].location.line, 2);
        assert_eq!(tokens[3].location.column, 1);
    }

    #[test]
    fn test_eof_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_double_literals() {
        let mut lexer = Lexer::new("3.14 1e5 2.5E-3 7.");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::DoubleLiteral);
        assert_eq!(tokens[0].double_value(), Some(3.14));
        assert_eq!(tokens[1].double_value(), Some(1e5));
        assert_eq!(tokens[2].double_value(), Some(2.5e-3));
        assert_eq!(tokens[3].double_value(), Some(7.0));
    }

    #[test]
    fn test_exponent_without_digits() {
        let mut lexer = Lexer::new("1e+");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Invalid number format"));
    }

    #[test]
    fn test_char_literals() {
        let mut lexer = Lexer::new(r"'a' '\n' '\0' '\\'");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].char_value(), Some('a'));
        assert_eq!(tokens[1].char_value(), Some('\n'));
        assert_eq!(tokens[2].char_value(), Some('\0'));
        assert_eq!(tokens[3].char_value(), Some('\\'));
    }

    #[test]
    fn test_invalid_escape() {
        let mut lexer = Lexer::new(r"'\q'");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Invalid escape sequence"));
    }

    #[test]
    fn test_string_literal_keeps_quotes() {
        let mut lexer = Lexer::new(r#""hello\nworld""#);
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, r#""hello\nworld""#);
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"abc");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated string literal"));
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("int x; // trailing\n/* block\ncomment */ int y;"),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        // The first */ closes the comment, so `int x;` is real code.
        assert_eq!(
            kinds("/* outer /* inner */ int x;"),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unclosed_block_comment() {
        let mut lexer = Lexer::new("int x; /* never closed");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Unclosed multi-line comment"));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let mut lexer = Lexer::new("If WHILE Int");
        let tokens = lexer.tokenize().unwrap();
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("int @x;");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.location.column, 5);
    }
}
