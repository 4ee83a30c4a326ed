//! Error types for schema parsing and validation.

// Variant fields are only read through the derive macros.
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur during schema parsing and validation.
///
/// The parser and validator report problems as values of this type; the
/// string diagnostics handed to callers are their `Display` renderings.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(forge::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A specific token was required but another one was found.
    #[error("expected {expected}, found {found} at line {line}, column {column}")]
    #[diagnostic(code(forge::schema::syntax_error))]
    Syntax {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A token that cannot start any construct at this position.
    #[error("unexpected token {found} at line {line}, column {column}")]
    #[diagnostic(code(forge::schema::unexpected_token))]
    UnexpectedToken {
        found: String,
        line: usize,
        column: usize,
    },

    /// A datasource or generator block without a `provider` field.
    #[error("{kind} `{name}` is missing required field `provider`")]
    #[diagnostic(code(forge::schema::missing_provider))]
    MissingProvider { kind: &'static str, name: String },

    /// A datasource provider outside the allowed set.
    #[error("datasource `{datasource}` has unsupported provider `{provider}` (expected one of: {allowed})")]
    #[diagnostic(code(forge::schema::unsupported_provider))]
    UnsupportedProvider {
        datasource: String,
        provider: String,
        allowed: String,
    },

    /// Duplicate top-level definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(forge::schema::duplicate))]
    Duplicate { kind: &'static str, name: String },

    /// Duplicate member inside a model, type or enum.
    #[error("duplicate {kind} `{name}` in `{owner}`")]
    #[diagnostic(code(forge::schema::duplicate_member))]
    DuplicateMember {
        kind: &'static str,
        owner: String,
        name: String,
    },

    /// A field whose type has no name.
    #[error("field `{model}.{field}` has an empty type name")]
    #[diagnostic(code(forge::schema::empty_type))]
    EmptyTypeName { model: String, field: String },

    /// An attribute with the wrong argument shape.
    #[error("invalid attribute `@{attribute}` on `{target}`: {message}")]
    #[diagnostic(code(forge::schema::invalid_attribute))]
    InvalidAttribute {
        attribute: String,
        target: String,
        message: String,
    },

    /// A definition without a name.
    #[error("{kind} is missing a name")]
    #[diagnostic(code(forge::schema::missing_name))]
    MissingName { kind: &'static str },

    /// An enum without any value.
    #[error("enum `{name}` must declare at least one value")]
    #[diagnostic(code(forge::schema::empty_enum))]
    EmptyEnum { name: String },

    /// A `@relation` pointing at a model that is not declared.
    #[error("relation `{model}.{field}` references unknown model `{target}`")]
    #[diagnostic(code(forge::schema::unknown_relation_target))]
    UnknownRelationTarget {
        model: String,
        field: String,
        target: String,
    },

    /// `fields` and `references` lists of different lengths.
    #[error(
        "relation `{model}.{field}` has {fields} field(s) but {references} reference(s)"
    )]
    #[diagnostic(code(forge::schema::relation_arity))]
    RelationArity {
        model: String,
        field: String,
        fields: usize,
        references: usize,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(forge::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(forge::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Parsing or validation produced diagnostics.
    #[error("schema has {count} error(s)")]
    #[diagnostic(code(forge::schema::invalid_schema))]
    InvalidSchema { count: usize },

    /// Validation failed; `details` lists every diagnostic, one per line.
    #[error("schema validation failed with {count} error(s):\n{details}")]
    #[diagnostic(code(forge::schema::validation_failed))]
    ValidationFailed { count: usize, details: String },
}

impl SchemaError {
    /// Create a syntax error.
    pub fn syntax(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Syntax {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            name: name.into(),
        }
    }

    /// Create a duplicate member error.
    pub fn duplicate_member(
        kind: &'static str,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::DuplicateMember {
            kind,
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(
        attribute: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Collapse a list of diagnostics into a single error.
    pub fn validation_failed(errors: &[String]) -> Self {
        let details = errors
            .iter()
            .map(|e| format!("  - {e}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self::ValidationFailed {
            count: errors.len(),
            details,
        }
    }

    /// Check if this error was produced by the parser.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. } | Self::UnexpectedToken { .. })
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SchemaError::syntax("identifier", "'{'", 1, 7);
        assert_eq!(
            err.to_string(),
            "expected identifier, found '{' at line 1, column 7"
        );
        assert!(err.is_syntax());
    }

    #[test]
    fn test_unexpected_token_display() {
        let err = SchemaError::UnexpectedToken {
            found: "'='".to_string(),
            line: 3,
            column: 2,
        };
        assert_eq!(err.to_string(), "unexpected token '=' at line 3, column 2");
    }

    #[test]
    fn test_duplicate_display() {
        let err = SchemaError::duplicate("model", "User");
        let display = err.to_string();
        assert!(display.contains("duplicate"));
        assert!(display.contains("model"));
        assert!(display.contains("User"));
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_duplicate_member_display() {
        let err = SchemaError::duplicate_member("field", "User", "id");
        assert_eq!(err.to_string(), "duplicate field `id` in `User`");
    }

    #[test]
    fn test_invalid_attribute_display() {
        let err = SchemaError::invalid_attribute(
            "default",
            "User.createdAt",
            "expected at least one argument",
        );
        assert_eq!(
            err.to_string(),
            "invalid attribute `@default` on `User.createdAt`: expected at least one argument"
        );
    }

    #[test]
    fn test_relation_errors_display() {
        let err = SchemaError::UnknownRelationTarget {
            model: "Post".to_string(),
            field: "author".to_string(),
            target: "Foo".to_string(),
        };
        assert!(err.to_string().contains("Post.author"));
        assert!(err.to_string().contains("Foo"));

        let err = SchemaError::RelationArity {
            model: "Post".to_string(),
            field: "author".to_string(),
            fields: 1,
            references: 2,
        };
        assert_eq!(
            err.to_string(),
            "relation `Post.author` has 1 field(s) but 2 reference(s)"
        );
    }

    #[test]
    fn test_validation_failed_collapses_messages() {
        let err = SchemaError::validation_failed(&[
            "duplicate model `User`".to_string(),
            "enum `Role` must declare at least one value".to_string(),
        ]);

        match &err {
            SchemaError::ValidationFailed { count, details } => {
                assert_eq!(*count, 2);
                assert_eq!(details.lines().count(), 2);
            }
            _ => panic!("Expected ValidationFailed"),
        }

        let display = err.to_string();
        assert!(display.starts_with("schema validation failed with 2 error(s):"));
        assert!(display.contains("  - duplicate model `User`"));
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SchemaError::IoError {
            path: "schema.prisma".to_string(),
            source: io_err,
        };
        assert!(err.to_string().contains("schema.prisma"));
    }

    #[test]
    fn test_error_debug() {
        let err = SchemaError::MissingProvider {
            kind: "datasource",
            name: "db".to_string(),
        };
        let debug = format!("{:?}", err);
        assert!(debug.contains("MissingProvider"));
        assert!(debug.contains("db"));
    }
}
