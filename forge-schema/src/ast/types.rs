//! Field type definitions for the schema AST.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// Text.
    String,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Floating point number.
    Float,
    /// Arbitrary precision decimal.
    Decimal,
    /// Boolean.
    Boolean,
    /// Timestamp.
    DateTime,
    /// JSON document.
    Json,
    /// Binary data.
    Bytes,
}

impl ScalarType {
    /// Every built-in scalar, in declaration order.
    pub const ALL: [ScalarType; 9] = [
        Self::String,
        Self::Int,
        Self::BigInt,
        Self::Float,
        Self::Decimal,
        Self::Boolean,
        Self::DateTime,
        Self::Json,
        Self::Bytes,
    ];

    /// Parse a scalar type from its schema name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Get the type name as written in a schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Int",
            Self::BigInt => "BigInt",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Json => "Json",
            Self::Bytes => "Bytes",
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a model field.
///
/// `name` is a built-in scalar, an enum, a composite type or another model.
/// Which one it is can only be decided against the whole schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    /// Base type name.
    pub name: SmolStr,
    /// `Type[]`
    pub is_array: bool,
    /// `Type?`
    pub is_optional: bool,
    /// `Unsupported("...")`
    pub is_unsupported: bool,
    /// Raw native column type of an unsupported type.
    pub unsupported_value: Option<String>,
}

impl FieldType {
    /// Create a required, non-list type.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            is_array: false,
            is_optional: false,
            is_unsupported: false,
            unsupported_value: None,
        }
    }

    /// Create an `Unsupported("raw")` type.
    pub fn unsupported(raw: impl Into<String>) -> Self {
        Self {
            is_unsupported: true,
            unsupported_value: Some(raw.into()),
            ..Self::new("Unsupported")
        }
    }

    /// Mark the type as a list.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark the type as optional.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Get the built-in scalar this type names, if any.
    pub fn scalar(&self) -> Option<ScalarType> {
        if self.is_unsupported {
            return None;
        }
        ScalarType::from_str(&self.name)
    }

    /// Check if this is a built-in scalar type.
    pub fn is_scalar(&self) -> bool {
        self.scalar().is_some()
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.unsupported_value {
            Some(raw) if self.is_unsupported => write!(f, "Unsupported(\"{raw}\")")?,
            _ => f.write_str(&self.name)?,
        }
        if self.is_array {
            f.write_str("[]")?;
        }
        if self.is_optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_from_str() {
        assert_eq!(ScalarType::from_str("Int"), Some(ScalarType::Int));
        assert_eq!(ScalarType::from_str("DateTime"), Some(ScalarType::DateTime));
        assert_eq!(ScalarType::from_str("Bytes"), Some(ScalarType::Bytes));
        assert_eq!(ScalarType::from_str("int"), None);
        assert_eq!(ScalarType::from_str("User"), None);
    }

    #[test]
    fn test_scalar_round_trips_through_name() {
        for scalar in ScalarType::ALL {
            assert_eq!(ScalarType::from_str(scalar.as_str()), Some(scalar));
        }
    }

    #[test]
    fn test_field_type_classification() {
        assert!(FieldType::new("String").is_scalar());
        assert!(!FieldType::new("Post").is_scalar());
        assert!(!FieldType::unsupported("circle").is_scalar());
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::new("Int").to_string(), "Int");
        assert_eq!(FieldType::new("String").optional().to_string(), "String?");
        assert_eq!(FieldType::new("Post").array().to_string(), "Post[]");
        assert_eq!(
            FieldType::new("String").array().optional().to_string(),
            "String[]?"
        );
        assert_eq!(
            FieldType::unsupported("polygon").optional().to_string(),
            "Unsupported(\"polygon\")?"
        );
    }
}
