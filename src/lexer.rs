// lexer.rs - Source tokenizer

use crate::errors::ForthError;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A numeric literal.
    Value(Value),
    /// A string literal (quotes stripped, whitespace kept).
    Str(String),
    /// Anything else; resolved against the vocabulary.
    Name(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset of the token in the source.
    pub offset: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ForthError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token, ForthError> {
        if self.peek() == Some('"') {
            return self.parse_string();
        }

        let offset = self.position;
        while let Some(ch) = self.peek() {
            if is_delimiter(ch) {
                break;
            }
            self.advance();
        }

        let word: String = self.input[offset..self.position].iter().collect();
        let kind = match parse_number(&word) {
            Some(v) => TokenKind::Value(v),
            None => TokenKind::Name(word),
        };

        Ok(Token { kind, offset })
    }

    /// A string runs to the matching quote and may span whitespace.
    /// No escapes.
    fn parse_string(&mut self) -> Result<Token, ForthError> {
        let offset = self.position;
        self.advance(); // consume opening "

        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch == '"' {
                let s: String = self.input[start..self.position].iter().collect();
                self.advance(); // consume closing "
                return Ok(Token {
                    kind: TokenKind::Str(s),
                    offset,
                });
            }
            self.advance();
        }

        Err(ForthError::UnterminatedString { offset })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if is_delimiter(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

/// Classify a token as a numeric literal: optional leading `-`, decimal
/// digits, optional `.fraction`, optional `e`/`E` exponent. Anything else
/// (`0BRANCH`, `1+`, a bare `-`) is a name.
pub fn parse_number(token: &str) -> Option<Value> {
    let body = token.strip_prefix('-').unwrap_or(token);
    let bytes = body.as_bytes();
    if bytes.is_empty() || !bytes[0].is_ascii_digit() {
        return None;
    }

    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }

    let mut is_float = false;
    if i < bytes.len() && bytes[i] == b'.' {
        is_float = true;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        is_float = true;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        if i >= bytes.len() || !bytes[i].is_ascii_digit() {
            return None;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }

    if i != bytes.len() {
        return None;
    }

    if !is_float {
        if let Ok(n) = token.parse::<i64>() {
            return Some(Value::Int(n));
        }
    }
    token.parse::<f64>().ok().map(Value::Float)
}
