use crate::error::ExprError;
use crate::types::{TokenKind, is_identifier, is_integer};

/// Longest token the lexer accepts.
pub const MAX_TOKEN_LENGTH: usize = 1000;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

/// The lexer struct, which produces whitespace-delimited tokens from a line.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn check_token_length(&self, start_pos: usize, end_pos: usize) -> Result<(), ExprError> {
        if end_pos - start_pos > MAX_TOKEN_LENGTH {
            return Err(ExprError::Tokenizer(format!(
                "Token too long: {} characters (maximum is {})",
                end_pos - start_pos,
                MAX_TOKEN_LENGTH
            )));
        }
        Ok(())
    }

    /// Get the next token from the input.
    pub fn next_token(&mut self) -> Option<Result<Token<'a>, ExprError>> {
        self.skip_whitespace();
        let start_pos = self.pos;
        self.peek()?;

        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            self.advance();
        }

        if let Err(e) = self.check_token_length(start_pos, self.pos) {
            return Some(Err(e));
        }

        let text = &self.input[start_pos..self.pos];
        Some(Ok(Token {
            kind: classify_token(text),
            text,
            position: start_pos,
        }))
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, ExprError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token?);
        }
        Ok(tokens)
    }
}

/// Decide how the evaluator treats a token.
pub fn classify_token(text: &str) -> TokenKind {
    match text {
        "+" | "-" | "*" | "/" | "^" => TokenKind::Operator,
        "=" | "+=" | "-=" | "*=" | "/=" => TokenKind::Assign,
        _ if is_integer(text) => TokenKind::Number,
        _ if is_identifier(text) => TokenKind::Variable,
        _ => TokenKind::Other,
    }
}
