//! # forge-schema
//!
//! Schema front end for the Forge client generator.
//!
//! This crate provides:
//! - A hand-written lexer and recursive-descent parser for `.prisma` schemas
//! - Abstract Syntax Tree (AST) types for schema representation
//! - Schema validation and semantic analysis
//! - Configuration parser for `forge.toml` files
//! - A thread-safe cache of parse results
//!
//! Parsing never stops at the first problem: syntax and validation errors
//! are collected and returned next to the (possibly partial) schema.
//!
//! ## Example
//!
//! ```rust
//! use forge_schema::parse;
//!
//! let parsed = parse(r#"
//!     datasource db {
//!       provider = "postgresql"
//!       url      = env("DATABASE_URL")
//!     }
//!
//!     model User {
//!       id    Int     @id @default(autoincrement())
//!       email String  @unique
//!       name  String?
//!     }
//! "#);
//!
//! assert!(parsed.errors.is_empty());
//! let user = parsed.schema.get_model("User").unwrap();
//! assert_eq!(user.fields.len(), 3);
//! ```

pub mod ast;
pub mod cache;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod validator;

pub use ast::*;
pub use cache::{CacheStats, SchemaCache};
pub use config::{ForgeConfig, ValidationConfig};
pub use error::{SchemaError, SchemaResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Parsed, Parser, parse, parse_and_validate, parse_file, parse_syntax, parse_with};
pub use validator::{Validator, validate};
