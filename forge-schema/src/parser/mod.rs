//! Schema parser.
//!
//! [`Parser`] turns the token stream into a [`Schema`], collecting syntax
//! errors instead of stopping at the first one. The entry points
//! [`parse`], [`parse_file`] and [`parse_and_validate`] run the parser and
//! the [`Validator`] together.

mod cursor;
mod grammar;

use std::path::Path;

use tracing::debug;

use crate::ast::Schema;
use crate::error::{SchemaError, SchemaResult};
use crate::lexer::{Lexer, TokenKind};
use crate::validator::Validator;

pub use cursor::Cursor;
pub use grammar::{
    MAX_VALUE_DEPTH, parse_attribute, parse_composite_type, parse_datasource, parse_enum,
    parse_field_type, parse_generator, parse_model, parse_value, synchronize,
};

/// Drives the grammar over a whole schema.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser reading from the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            cursor: Cursor::new(lexer),
        }
    }

    /// Parse every top-level block.
    ///
    /// Returns the schema assembled from the blocks that parsed cleanly and
    /// the syntax errors of the ones that did not.
    pub fn parse_schema(mut self) -> (Schema, Vec<SchemaError>) {
        let mut schema = Schema::new();
        let mut errors = vec![];
        let cur = &mut self.cursor;

        loop {
            let base = cur.depth();
            let result = match cur.kind() {
                TokenKind::Eof => break,
                TokenKind::Illegal => {
                    cur.bump();
                    continue;
                }
                TokenKind::Datasource => grammar::parse_datasource(cur).map(|d| schema.add_datasource(d)),
                TokenKind::Generator => grammar::parse_generator(cur).map(|g| schema.add_generator(g)),
                TokenKind::Model => grammar::parse_model(cur).map(|m| schema.add_model(m)),
                TokenKind::Enum => grammar::parse_enum(cur).map(|e| schema.add_enum(e)),
                TokenKind::Type => grammar::parse_composite_type(cur).map(|t| schema.add_type(t)),
                _ => {
                    errors.push(cur.unexpected());
                    cur.bump();
                    continue;
                }
            };

            if let Err(err) = result {
                errors.push(err);
                grammar::synchronize(cur, base);
            }
        }

        (schema, errors)
    }
}

/// Outcome of [`parse`]: the schema plus every parser and validator message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// The schema, possibly missing blocks that failed to parse.
    pub schema: Schema,
    /// Syntax errors followed by validation errors.
    pub errors: Vec<String>,
}

impl Parsed {
    /// Check if parsing and validation found nothing to report.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail with [`SchemaError::InvalidSchema`] if any error was reported.
    pub fn check(&self) -> SchemaResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::InvalidSchema {
                count: self.errors.len(),
            })
        }
    }

    /// Get the schema, or a single error listing every message.
    pub fn into_result(self) -> SchemaResult<Schema> {
        if self.errors.is_empty() {
            Ok(self.schema)
        } else {
            Err(SchemaError::validation_failed(&self.errors))
        }
    }
}

/// Parse without semantic validation.
pub fn parse_syntax(input: &str) -> (Schema, Vec<SchemaError>) {
    Parser::new(Lexer::new(input)).parse_schema()
}

/// Parse and validate a schema using the default validation settings.
pub fn parse(input: &str) -> Parsed {
    parse_with(input, &Validator::default())
}

/// Parse and validate a schema with the given validator.
pub fn parse_with(input: &str, validator: &Validator) -> Parsed {
    let (schema, syntax_errors) = parse_syntax(input);
    let semantic_errors = validator.validate(&schema);

    debug!(
        "Parsed schema with {} models and {} enums ({} syntax errors, {} validation errors)",
        schema.models.len(),
        schema.enums.len(),
        syntax_errors.len(),
        semantic_errors.len()
    );

    let errors = syntax_errors
        .iter()
        .map(ToString::to_string)
        .chain(semantic_errors)
        .collect();

    Parsed { schema, errors }
}

/// Read a schema file and parse it.
///
/// Only failing to read the file is an error here; problems in the schema
/// itself are reported through [`Parsed::errors`].
pub fn parse_file(path: impl AsRef<Path>) -> SchemaResult<Parsed> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!("Read schema file {}", path.display());
    Ok(parse(&content))
}

/// Parse and validate, folding every message into one error.
pub fn parse_and_validate(input: &str) -> SchemaResult<Schema> {
    parse(input).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use pretty_assertions::assert_eq;

    // ==================== Basic Parsing ====================

    #[test]
    fn test_parse_simple_schema() {
        let parsed = parse(
            r#"
            datasource db { provider = "postgresql" }
            model User {
              id    Int    @id @default(autoincrement())
              email String @unique
              name  String?
            }
        "#,
        );

        assert_eq!(parsed.errors, Vec::<String>::new());
        let schema = &parsed.schema;

        assert_eq!(schema.datasources.len(), 1);
        assert_eq!(
            schema.datasources[0].provider(),
            Some(&Value::String("postgresql".into()))
        );

        let user = schema.get_model("User").unwrap();
        assert_eq!(user.fields.len(), 3);

        let id = user.get_field("id").unwrap();
        assert_eq!(
            id.attributes,
            vec![
                Attribute::simple("id"),
                Attribute::new(
                    "default",
                    vec![AttributeArg::positional(Value::call("autoincrement", vec![]))]
                ),
            ]
        );
        assert!(user.get_field("email").unwrap().is_unique());
        assert!(user.get_field("name").unwrap().field_type.is_optional);
    }

    #[test]
    fn test_parse_generator_block() {
        let parsed = parse(
            r#"
            generator client {
              provider        = "forge-client-go"
              output          = "./db"
              previewFeatures = ["fullTextSearch"]
            }
        "#,
        );

        assert!(parsed.is_ok());
        let generator = parsed.schema.get_generator("client").unwrap();
        assert_eq!(generator.output(), Some("./db"));
        assert_eq!(generator.get("previewFeatures").map(Value::arity), Some(1));
    }

    #[test]
    fn test_parse_composite_type() {
        let parsed = parse(
            r#"
            type Address {
              street String
              zip    String?
            }
        "#,
        );

        assert!(parsed.is_ok());
        let address = parsed.schema.get_type("Address").unwrap();
        assert_eq!(address.fields.len(), 2);
        assert!(address.get_field("zip").unwrap().is_optional());
    }

    #[test]
    fn test_parse_single_line_fields() {
        let parsed = parse("model A { id String @id  b B }");
        assert!(parsed.is_ok(), "{:?}", parsed.errors);

        let a = parsed.schema.get_model("A").unwrap();
        assert_eq!(a.fields.len(), 2);
        assert_eq!(a.get_field("b").unwrap().field_type.name, "B");
    }

    #[test]
    fn test_parse_empty_schema() {
        let parsed = parse("");
        assert!(parsed.is_ok());
        assert!(parsed.schema.is_empty());

        let parsed = parse("   \n\t  // only a comment\n /* and another */ ");
        assert!(parsed.is_ok());
        assert!(parsed.schema.is_empty());
    }

    #[test]
    fn test_parse_negative_default() {
        let parsed = parse("model Config { id Int @id\n minValue Int @default(-100) }");
        let config = parsed.schema.get_model("Config").unwrap();
        let default = config.get_field("minValue").unwrap().get_attribute("default");
        assert_eq!(default.and_then(Attribute::first_arg), Some(&Value::Int("-100".into())));
    }

    // ==================== Error Recovery ====================

    #[test]
    fn test_missing_model_name() {
        let (schema, errors) = parse_syntax("model { id Int }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("expected identifier"));
        assert!(schema.models.is_empty());
    }

    #[test]
    fn test_broken_block_does_not_hide_later_blocks() {
        let (schema, errors) = parse_syntax(
            r#"
            model Broken {
              id   Int @id
              name
            }
            model User {
              id Int @id
            }
            enum Role { USER }
        "#,
        );

        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("expected identifier, found '}'"));
        assert!(schema.get_model("Broken").is_none());
        assert!(schema.get_model("User").is_some());
        assert!(schema.get_enum("Role").is_some());
    }

    #[test]
    fn test_independent_errors_are_all_reported() {
        let (schema, errors) = parse_syntax(
            r#"
            model { id Int }
            model Good { id Int @id }
            enum { A }
            datasource db { provider "sqlite" }
        "#,
        );

        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert_eq!(schema.models.len(), 1);
        assert!(schema.get_model("Good").is_some());
        assert!(schema.enums.is_empty());
        assert!(schema.datasources.is_empty());
    }

    #[test]
    fn test_stray_top_level_tokens() {
        let (schema, errors) = parse_syntax("foo = 1\nmodel A { id Int }");
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(SchemaError::is_syntax));
        assert!(errors[0].to_string().starts_with("unexpected token 'foo'"));
        assert!(schema.get_model("A").is_some());
    }

    #[test]
    fn test_illegal_top_level_bytes_are_skipped() {
        let (schema, errors) = parse_syntax("# $ model A { id Int }");
        assert!(errors.is_empty());
        assert_eq!(schema.models.len(), 1);
    }

    #[test]
    fn test_unclosed_block_reports_once() {
        let (schema, errors) = parse_syntax("model User {\n  id Int @id\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "expected '}', found EOF at line 3, column 1"
        );
        assert!(schema.models.is_empty());
    }

    // ==================== Entry Points ====================

    #[test]
    fn test_parsed_check() {
        assert!(parse("model A { id Int @id }").check().is_ok());

        let parsed = parse("model A { id Int }\nmodel A { id Int }");
        match parsed.check() {
            Err(SchemaError::InvalidSchema { count }) => assert_eq!(count, parsed.errors.len()),
            other => panic!("Expected InvalidSchema, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_merges_syntax_and_validation_errors() {
        let parsed = parse("model { }\nmodel A { id Int }\nmodel A { id Int }");
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.errors[0].starts_with("expected identifier"));
        assert_eq!(parsed.errors[1], "duplicate model `A`");
    }

    #[test]
    fn test_parse_and_validate() {
        let schema = parse_and_validate("model A { id Int @id }").unwrap();
        assert_eq!(schema.models.len(), 1);

        let err = parse_and_validate("model A { id Int @default }").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("schema validation failed with 1 error(s):"));
        assert!(message.contains("@default"));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/definitely/not/here.prisma").unwrap_err();
        assert!(matches!(err, SchemaError::IoError { .. }));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = r#"
            datasource db { provider = "mysql" }
            model User { id Int @id  posts Post[] }
            model Post { id Int @id  author Foo @relation(fields: [a], references: [b, c]) }
            model { broken }
        "#;
        assert_eq!(parse(input), parse(input));
    }
}
