//! Top-level schema definition.

use serde::{Deserialize, Serialize};

use super::{CompositeType, Datasource, Enum, Generator, Model};

/// A complete parsed schema.
///
/// Blocks keep their declaration order. Duplicate names are kept as written
/// so the validator can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// All datasource blocks.
    pub datasources: Vec<Datasource>,
    /// All generator blocks.
    pub generators: Vec<Generator>,
    /// All models.
    pub models: Vec<Model>,
    /// All enums.
    pub enums: Vec<Enum>,
    /// All composite types.
    pub types: Vec<CompositeType>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a datasource to the schema.
    pub fn add_datasource(&mut self, datasource: Datasource) {
        self.datasources.push(datasource);
    }

    /// Add a generator to the schema.
    pub fn add_generator(&mut self, generator: Generator) {
        self.generators.push(generator);
    }

    /// Add a model to the schema.
    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    /// Add an enum to the schema.
    pub fn add_enum(&mut self, e: Enum) {
        self.enums.push(e);
    }

    /// Add a composite type to the schema.
    pub fn add_type(&mut self, t: CompositeType) {
        self.types.push(t);
    }

    /// Get a datasource by name.
    pub fn get_datasource(&self, name: &str) -> Option<&Datasource> {
        self.datasources.iter().find(|d| d.name == name)
    }

    /// Get a generator by name.
    pub fn get_generator(&self, name: &str) -> Option<&Generator> {
        self.generators.iter().find(|g| g.name == name)
    }

    /// Get a model by name.
    pub fn get_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Get an enum by name.
    pub fn get_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Get a composite type by name.
    pub fn get_type(&self, name: &str) -> Option<&CompositeType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Check if a type name exists (model, enum, or composite type).
    pub fn type_exists(&self, name: &str) -> bool {
        self.get_model(name).is_some()
            || self.get_enum(name).is_some()
            || self.get_type(name).is_some()
    }

    /// Get all model names.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name())
    }

    /// Get all enum names.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|e| e.name())
    }

    /// Check if the schema declares nothing.
    pub fn is_empty(&self) -> bool {
        self.datasources.is_empty()
            && self.generators.is_empty()
            && self.models.is_empty()
            && self.enums.is_empty()
            && self.types.is_empty()
    }
}

/// Schema statistics for debugging/info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStats {
    /// Number of datasources.
    pub datasource_count: usize,
    /// Number of generators.
    pub generator_count: usize,
    /// Number of models.
    pub model_count: usize,
    /// Number of enums.
    pub enum_count: usize,
    /// Number of composite types.
    pub type_count: usize,
    /// Total number of fields across all models.
    pub field_count: usize,
    /// Number of fields carrying `@relation`.
    pub relation_count: usize,
}

impl Schema {
    /// Get statistics about the schema.
    pub fn stats(&self) -> SchemaStats {
        SchemaStats {
            datasource_count: self.datasources.len(),
            generator_count: self.generators.len(),
            model_count: self.models.len(),
            enum_count: self.enums.len(),
            type_count: self.types.len(),
            field_count: self.models.iter().map(|m| m.fields.len()).sum(),
            relation_count: self.models.iter().map(|m| m.relation_fields().len()).sum(),
        }
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "Schema({} datasources, {} generators, {} models, {} enums, {} types, {} fields, {} relations)",
            stats.datasource_count,
            stats.generator_count,
            stats.model_count,
            stats.enum_count,
            stats.type_count,
            stats.field_count,
            stats.relation_count
        )
    }
}
