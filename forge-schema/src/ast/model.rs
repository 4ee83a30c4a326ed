//! Model, field, composite type and enum definitions.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::{Attribute, FieldType};

/// A field declared inside a model or composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelField {
    /// Field name.
    pub name: SmolStr,
    /// Declared type.
    pub field_type: FieldType,
    /// Field-level attributes (prefixed with `@`).
    pub attributes: Vec<Attribute>,
}

impl ModelField {
    /// Create a new field.
    pub fn new(name: impl Into<SmolStr>, field_type: FieldType, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            field_type,
            attributes,
        }
    }

    /// Get the field name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the field is optional.
    pub fn is_optional(&self) -> bool {
        self.field_type.is_optional
    }

    /// Check if the field is a list.
    pub fn is_list(&self) -> bool {
        self.field_type.is_array
    }

    /// Check if the field has a specific attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// Check if this field is the primary key.
    pub fn is_id(&self) -> bool {
        self.has_attribute("id")
    }

    /// Check if this field has a unique constraint.
    pub fn is_unique(&self) -> bool {
        self.has_attribute("unique")
    }

    /// Check if this field carries an explicit `@relation`.
    pub fn is_relation(&self) -> bool {
        self.has_attribute("relation")
    }

    /// Get the column name (from `@map` or the field name).
    pub fn column_name(&self) -> &str {
        self.get_attribute("map")
            .and_then(|a| a.first_arg())
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| self.name())
    }
}

/// A model definition (maps to a database table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: SmolStr,
    /// Fields in declaration order.
    pub fields: Vec<ModelField>,
    /// Model-level attributes (prefixed with `@@`).
    pub attributes: Vec<Attribute>,
}

impl Model {
    /// Create a new, empty model.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
            attributes: vec![],
        }
    }

    /// Get the model name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a field to the model.
    pub fn add_field(&mut self, field: ModelField) {
        self.fields.push(field);
    }

    /// Get the first field with the given name.
    pub fn get_field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get the primary key field(s).
    pub fn id_fields(&self) -> Vec<&ModelField> {
        self.fields.iter().filter(|f| f.is_id()).collect()
    }

    /// Get all fields carrying `@relation`.
    pub fn relation_fields(&self) -> Vec<&ModelField> {
        self.fields.iter().filter(|f| f.is_relation()).collect()
    }

    /// Check if this model has a specific model-level attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.is(name))
    }

    /// Get a model-level attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.is(name))
    }

    /// Get the database table name (from `@@map` or model name).
    pub fn table_name(&self) -> &str {
        self.get_attribute("map")
            .and_then(|a| a.first_arg())
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| self.name())
    }
}

/// A composite type definition (`type Address { ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeType {
    /// Type name.
    pub name: SmolStr,
    /// Fields in declaration order.
    pub fields: Vec<ModelField>,
    /// Type-level attributes.
    pub attributes: Vec<Attribute>,
}

impl CompositeType {
    /// Create a new, empty composite type.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
            attributes: vec![],
        }
    }

    /// Get the type name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a field by name.
    pub fn get_field(&self, name: &str) -> Option<&ModelField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Enum name.
    pub name: SmolStr,
    /// Values in declaration order.
    pub values: Vec<EnumValue>,
    /// Enum-level attributes (prefixed with `@@`).
    pub attributes: Vec<Attribute>,
}

impl Enum {
    /// Create a new, empty enum.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            values: vec![],
            attributes: vec![],
        }
    }

    /// Get the enum name as a string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a value to the enum.
    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    /// Get a value by name.
    pub fn get_value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Get the database type name (from `@@map` or enum name).
    pub fn db_name(&self) -> &str {
        self.attributes
            .iter()
            .find(|a| a.is("map"))
            .and_then(|a| a.first_arg())
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| self.name())
    }
}

/// A single enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name.
    pub name: SmolStr,
    /// Value-level attributes.
    pub attributes: Vec<Attribute>,
}

impl EnumValue {
    /// Create a new enum value.
    pub fn new(name: impl Into<SmolStr>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Get the value stored in the database (from `@map` or the name).
    pub fn db_value(&self) -> &str {
        self.attributes
            .iter()
            .find(|a| a.is("map"))
            .and_then(|a| a.first_arg())
            .and_then(|v| v.as_str())
            .unwrap_or(self.name.as_str())
    }
}
