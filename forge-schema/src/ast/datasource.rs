//! Datasource and generator block definitions.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::Value;

/// Database provider named by a datasource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseProvider {
    /// PostgreSQL database.
    PostgreSQL,
    /// MySQL database.
    MySQL,
    /// SQLite database.
    SQLite,
}

impl DatabaseProvider {
    /// Every supported provider.
    pub const ALL: [DatabaseProvider; 3] = [Self::PostgreSQL, Self::MySQL, Self::SQLite];

    /// Parse a provider from its schema spelling.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Get the provider as written in a schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::SQLite => "sqlite",
        }
    }
}

impl std::fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `key = value` entry of a datasource or generator block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Entry name.
    pub name: SmolStr,
    /// Entry value.
    pub value: Value,
}

impl ConfigField {
    /// Create a new entry.
    pub fn new(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

fn find_field<'a>(fields: &'a [ConfigField], name: &str) -> Option<&'a Value> {
    fields.iter().find(|f| f.name == name).map(|f| &f.value)
}

/// A `datasource name { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasource {
    /// Block name.
    pub name: SmolStr,
    /// Entries in declaration order.
    pub fields: Vec<ConfigField>,
}

impl Datasource {
    /// Create a new, empty datasource.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    /// Get an entry value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        find_field(&self.fields, name)
    }

    /// Get the `provider` entry.
    pub fn provider(&self) -> Option<&Value> {
        self.get("provider")
    }

    /// Get the provider when it is a plain, known string.
    pub fn database_provider(&self) -> Option<DatabaseProvider> {
        self.provider()
            .and_then(Value::as_str)
            .and_then(DatabaseProvider::from_str)
    }

    /// Get the `url` entry.
    pub fn url(&self) -> Option<&Value> {
        self.get("url")
    }
}

/// A `generator name { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generator {
    /// Block name.
    pub name: SmolStr,
    /// Entries in declaration order.
    pub fields: Vec<ConfigField>,
}

impl Generator {
    /// Create a new, empty generator.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    /// Get an entry value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        find_field(&self.fields, name)
    }

    /// Get the `provider` entry.
    pub fn provider(&self) -> Option<&Value> {
        self.get("provider")
    }

    /// Get the `output` path, when given as a string.
    pub fn output(&self) -> Option<&str> {
        self.get("output").and_then(Value::as_str)
    }
}
