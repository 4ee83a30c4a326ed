//! Token cursor shared by the grammar productions.

use smol_str::SmolStr;

use crate::error::SchemaError;
use crate::lexer::{Lexer, Token, TokenKind};

/// A position in the token stream with one token of lookahead.
///
/// Newline tokens are insignificant to the grammar and never surface here.
/// The cursor also tracks how many `{` are open so that error recovery can
/// find the end of a broken block.
#[derive(Debug)]
pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    depth: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor, pre-fetching the current and lookahead tokens.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = next_significant(&mut lexer);
        let peek = next_significant(&mut lexer);
        Self {
            lexer,
            current,
            peek,
            depth: 0,
        }
    }

    /// The current token.
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// The token after the current one.
    pub fn peek(&self) -> &Token {
        &self.peek
    }

    /// Kind of the current token.
    pub fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Check the kind of the current token.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Check the kind of the lookahead token.
    pub fn peek_at(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Number of braces opened and not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Advance and return the token that was current.
    pub fn bump(&mut self) -> Token {
        match self.current.kind {
            TokenKind::LBrace => self.depth += 1,
            TokenKind::RBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        let next = next_significant(&mut self.lexer);
        let peek = std::mem::replace(&mut self.peek, next);
        std::mem::replace(&mut self.current, peek)
    }

    /// Consume a token of the given kind, or fail without advancing.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, SchemaError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.expected(kind.describe()))
        }
    }

    /// Consume an identifier and return its text.
    pub fn expect_ident(&mut self) -> Result<SmolStr, SchemaError> {
        self.expect(TokenKind::Ident).map(|t| t.literal)
    }

    /// Consume an identifier or keyword used as a member name.
    pub fn expect_name(&mut self) -> Result<SmolStr, SchemaError> {
        if self.kind().is_name() {
            Ok(self.bump().literal)
        } else {
            Err(self.expected(TokenKind::Ident.describe()))
        }
    }

    /// Build an "expected X, found Y" error at the current token.
    pub fn expected(&self, expected: &str) -> SchemaError {
        SchemaError::syntax(
            expected,
            self.current.describe(),
            self.current.line,
            self.current.column,
        )
    }

    /// Build an "unexpected token" error at the current token.
    pub fn unexpected(&self) -> SchemaError {
        SchemaError::UnexpectedToken {
            found: self.current.describe(),
            line: self.current.line,
            column: self.current.column,
        }
    }
}

fn next_significant(lexer: &mut Lexer<'_>) -> Token {
    loop {
        let tok = lexer.next_token();
        if !tok.is(TokenKind::Newline) {
            return tok;
        }
    }
}
