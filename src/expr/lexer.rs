//! Lexer (tokenizer) for the expression language.

use crate::error::{NumkitError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal
    Number,
    /// A variable, constant or function name
    Identifier,
    /// '+'
    Plus,
    /// '-'
    Minus,
    /// '*'
    Star,
    /// '/'
    Slash,
    /// '^' or '**'
    Power,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// End of input
    Eof,
}

/// Lexer for tokenizing expression input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek() {
            Some(&(_, ch)) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    column: self.column,
                });
            }
        };

        let start_column = self.column;
        let single = |kind: TokenKind, text: &str| Token {
            kind,
            text: text.to_string(),
            column: start_column,
        };

        let token = match ch {
            '+' => {
                self.advance();
                single(TokenKind::Plus, "+")
            }
            '-' => {
                self.advance();
                single(TokenKind::Minus, "-")
            }
            '*' => {
                self.advance();
                if let Some(&(_, '*')) = self.chars.peek() {
                    self.advance();
                    single(TokenKind::Power, "**")
                } else {
                    single(TokenKind::Star, "*")
                }
            }
            '/' => {
                self.advance();
                single(TokenKind::Slash, "/")
            }
            '^' => {
                self.advance();
                single(TokenKind::Power, "^")
            }
            '(' => {
                self.advance();
                single(TokenKind::OpenParen, "(")
            }
            ')' => {
                self.advance();
                single(TokenKind::CloseParen, ")")
            }
            '0'..='9' | '.' => Token {
                kind: TokenKind::Number,
                text: self.read_number(),
                column: start_column,
            },
            _ if ch.is_alphabetic() || ch == '_' => Token {
                kind: TokenKind::Identifier,
                text: self.read_identifier(),
                column: start_column,
            },
            _ => {
                return Err(NumkitError::parse_failure(
                    start_column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Integer part
        self.read_digits(&mut text);

        // Decimal part
        if let Some(&(_, '.')) = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part, only when digits follow ("2e" alone is 2 times e)
        if let Some(&(_, ch)) = self.chars.peek() {
            if (ch == 'e' || ch == 'E') && self.exponent_follows() {
                text.push(ch);
                self.advance();
                if let Some(&(_, sign)) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        text
    }

    fn exponent_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        match ahead.next() {
            Some((_, d)) if d.is_ascii_digit() => true,
            Some((_, '+')) | Some((_, '-')) => {
                matches!(ahead.next(), Some((_, d)) if d.is_ascii_digit())
            }
            _ => false,
        }
    }
}

/// Tokenize the whole input, ending with an [`TokenKind::Eof`] token.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
