//! Abstract Syntax Tree (AST) types for schemas.
//!
//! The tree is built once by the parser and read by the validator and the
//! code generators; nothing mutates it afterwards.

mod attribute;
mod datasource;
mod model;
mod schema;
mod types;

pub use attribute::*;
pub use datasource::*;
pub use model::*;
pub use schema::*;
pub use types::*;
