//! S-expression lexer and parser for the calculator language.
//!
//! The grammar is deliberately small: parenthesized lists, operator symbols,
//! and non-negative integer literals. The parser only checks shape; whether a
//! symbol is bound, a list is callable, or a literal fits the machine integer
//! width is decided during evaluation.

use std::fmt;

use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    /// A run of ASCII digits, kept as text until evaluation
    Literal(String),
    Symbol(String),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Literal(s) => write!(f, "{}", s),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// A pre-parsed expression tree.
///
/// `Literal` carries the raw digit string; turning it into a number (and
/// rejecting text that does not fit) happens in the evaluator, which reports
/// a dedicated failure for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal, as the digit characters from the source
    Literal(String),
    /// Operator name
    Symbol(String),
    /// Application: first element is the operator, the rest are operands
    Call(Vec<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(s) => write!(f, "{}", s),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Call(items) => write!(f, "({})", items.iter().format(" ")),
        }
    }
}

/// Hand-written lexer for calculator source text
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn read_literal(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_symbol(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == ';' {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }

    pub fn next_token(&mut self) -> Result<Token, String> {
        self.skip_whitespace();

        while self.current() == Some(';') {
            self.skip_line_comment();
            self.skip_whitespace();
        }

        match self.current() {
            None => Ok(Token::Eof),
            Some('(') => {
                self.advance();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RParen)
            }
            Some(ch) if ch.is_ascii_digit() => Ok(Token::Literal(self.read_literal())),
            Some(_) => {
                let sym = self.read_symbol();
                if sym.is_empty() {
                    let ch = self.advance().unwrap();
                    Err(format!(
                        "Unexpected character '{}' at line {}, column {}",
                        ch, self.line, self.column
                    ))
                } else {
                    Ok(Token::Symbol(sym))
                }
            }
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Recursive descent parser producing [`Expr`] trees
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn parse_expr(&mut self) -> Result<Expr, String> {
        match self.current() {
            Token::LParen => {
                self.advance();
                let mut items = Vec::new();
                loop {
                    match self.current() {
                        Token::RParen => {
                            self.advance();
                            break;
                        }
                        Token::Eof => return Err("Unexpected EOF, expected )".to_string()),
                        _ => items.push(self.parse_expr()?),
                    }
                }
                Ok(Expr::Call(items))
            }
            Token::Literal(s) => {
                let text = s.clone();
                self.advance();
                Ok(Expr::Literal(text))
            }
            Token::Symbol(s) => {
                let sym = s.clone();
                self.advance();
                Ok(Expr::Symbol(sym))
            }
            Token::RParen => Err("Unexpected )".to_string()),
            Token::Eof => Err("Unexpected end of input".to_string()),
        }
    }

    pub fn parse(&mut self) -> Result<Vec<Expr>, String> {
        let mut exprs = Vec::new();
        while self.current() != &Token::Eof {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }
}

/// Lex and parse a whole program into its top-level expressions.
pub fn parse_program(input: &str) -> Result<Vec<Expr>, String> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}
