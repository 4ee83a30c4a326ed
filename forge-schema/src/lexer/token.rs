//! Token definitions produced by the schema lexer.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Token kinds recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// A byte that starts no valid token.
    Illegal,
    /// A line break.
    Newline,

    /// An identifier.
    Ident,
    /// A string literal (literal text excludes the quotes).
    String,
    /// An integer literal.
    Int,
    /// A float literal.
    Float,
    /// `true` or `false`.
    Boolean,

    /// `@`
    At,
    /// `@@`
    AtAt,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `=`
    Equals,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,

    /// The `model` keyword.
    Model,
    /// The `enum` keyword.
    Enum,
    /// The `datasource` keyword.
    Datasource,
    /// The `generator` keyword.
    Generator,
    /// The `type` keyword.
    Type,
}

impl TokenKind {
    /// Look up an identifier in the keyword table.
    pub fn lookup_ident(ident: &str) -> Self {
        match ident {
            "model" => Self::Model,
            "enum" => Self::Enum,
            "datasource" => Self::Datasource,
            "generator" => Self::Generator,
            "type" => Self::Type,
            "true" | "false" => Self::Boolean,
            _ => Self::Ident,
        }
    }

    /// Check if this kind is a block keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Model | Self::Enum | Self::Datasource | Self::Generator | Self::Type
        )
    }

    /// Check if a token of this kind can serve as a member name.
    ///
    /// Keywords double as names inside blocks, e.g. a field called `type`.
    pub fn is_name(&self) -> bool {
        *self == Self::Ident || self.is_keyword()
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Illegal => "illegal character",
            Self::Newline => "newline",
            Self::Ident => "identifier",
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::At => "'@'",
            Self::AtAt => "'@@'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Equals => "'='",
            Self::Colon => "':'",
            Self::Question => "'?'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Model => "'model'",
            Self::Enum => "'enum'",
            Self::Datasource => "'datasource'",
            Self::Generator => "'generator'",
            Self::Type => "'type'",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single token with its source position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Source text of the token.
    pub literal: SmolStr,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, literal: impl Into<SmolStr>, line: usize, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    /// Check the token kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Describe the token for a "found ..." diagnostic.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof | TokenKind::Newline => self.kind.describe().to_string(),
            TokenKind::String => format!("\"{}\"", self.literal),
            _ => format!("'{}'", self.literal),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.describe())
    }
}
