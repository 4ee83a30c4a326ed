//! Lexer for schema files.
//!
//! The lexer is pull-based: [`Lexer::next_token`] produces one token at a
//! time and keeps returning [`TokenKind::Eof`] once the input is exhausted.
//! Lexical problems never fail; they surface as [`TokenKind::Illegal`]
//! tokens or truncated literals for the parser to judge.

mod token;

pub use token::{Token, TokenKind};

/// Converts schema text into tokens.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let (start, line, column) = (self.pos, self.line, self.column);
        let Some(c) = self.bump() else {
            return Token::new(TokenKind::Eof, "", line, column);
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            '@' => {
                if self.peek() == Some('@') {
                    self.bump();
                    TokenKind::AtAt
                } else {
                    TokenKind::At
                }
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '=' => TokenKind::Equals,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '"' => return self.read_string(line, column),
            '-' if self.peek().is_some_and(|n| n.is_ascii_digit()) => {
                return self.read_number(start, line, column);
            }
            c if c.is_ascii_digit() => return self.read_number(start, line, column),
            c if c.is_alphabetic() || c == '_' => return self.read_ident(start, line, column),
            _ => TokenKind::Illegal,
        };

        Token::new(kind, &self.input[start..self.pos], line, column)
    }

    /// Collect every token up to and including the first EOF.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.is(TokenKind::Eof);
            tokens.push(tok);
            if done {
                return tokens;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skip whitespace and comments until neither is left.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(' ' | '\t' | '\r'), _) => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.bump();
                    self.bump();
                    // An unterminated block comment runs to the end of input.
                    loop {
                        match (self.peek(), self.peek_second()) {
                            (None, _) => break,
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            _ => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Read a string body after the opening quote.
    ///
    /// Escapes are kept verbatim. A newline or the end of input ends an
    /// unterminated literal.
    fn read_string(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        let mut end = start;

        while let Some(c) = self.peek() {
            match c {
                '"' => {
                    end = self.pos;
                    self.bump();
                    return Token::new(TokenKind::String, &self.input[start..end], line, column);
                }
                '\n' => break,
                '\\' => {
                    self.bump();
                    if self.peek().is_some_and(|n| n != '\n') {
                        self.bump();
                    }
                }
                _ => {
                    self.bump();
                }
            }
            end = self.pos;
        }

        Token::new(TokenKind::String, &self.input[start..end], line, column)
    }

    fn read_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        self.eat_digits();

        let mut kind = TokenKind::Int;
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.eat_digits();
            kind = TokenKind::Float;
        }

        Token::new(kind, &self.input[start..self.pos], line, column)
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn read_ident(&mut self, start: usize, line: usize, column: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }

        let literal = &self.input[start..self.pos];
        Token::new(TokenKind::lookup_ident(literal), literal, line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        (!tok.is(TokenKind::Eof)).then_some(tok)
    }
}
