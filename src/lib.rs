//! # Forge
//!
//! Schema front end for a type-safe database client generator.
//!
//! Forge reads Prisma-style schema files and provides:
//! - A lexer and recursive-descent parser that keep going after errors
//! - A typed AST of datasources, generators, models, enums and composite types
//! - Semantic validation of providers, duplicates, attributes and relations
//! - `forge.toml` project configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use forge::prelude::*;
//!
//! let parsed = parse(r#"
//!     model User {
//!       id    Int    @id
//!       posts Post[]
//!     }
//!
//!     model Post {
//!       id       Int  @id
//!       authorId Int
//!       author   User @relation(fields: [authorId], references: [id])
//!     }
//! "#);
//!
//! assert!(parsed.is_ok());
//! let post = parsed.schema.get_model("Post").unwrap();
//! assert_eq!(post.relation_fields().len(), 1);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema parsing, validation and AST types.
pub mod schema {
    pub use forge_schema::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{
        ForgeConfig, Parsed, Schema, SchemaError, SchemaResult, Validator, parse,
        parse_and_validate, parse_file,
    };
}

// Re-export key types at the crate root
pub use schema::{Parsed, Schema, SchemaError};
