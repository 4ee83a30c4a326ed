//! Schema validation and semantic analysis.
//!
//! This module checks parsed schemas for semantic problems:
//! - Datasources and generators declare a provider
//! - No duplicate models, fields or enum values
//! - Attributes carry the arguments they need
//! - Explicit relations point at declared models with matching key lists
//!
//! Checks never stop early; every problem found is reported.

use indexmap::IndexSet;
use tracing::debug;

use crate::ast::*;
use crate::config::ValidationConfig;
use crate::error::SchemaError;

/// Semantic checker for parsed schemas.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with the given settings.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the validation settings.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a schema, returning one message per problem.
    pub fn validate(&self, schema: &Schema) -> Vec<String> {
        self.diagnose(schema)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Validate a schema, returning typed errors.
    pub fn diagnose(&self, schema: &Schema) -> Vec<SchemaError> {
        let mut errors = self.check_datasources(schema);
        errors.extend(check_generators(schema));
        errors.extend(check_model_names(schema));
        errors.extend(schema.models.iter().flat_map(check_model));
        errors.extend(check_composite_types(schema));
        errors.extend(schema.enums.iter().flat_map(check_enum));
        errors.extend(check_relations(schema));

        debug!("Validated schema: {} error(s)", errors.len());
        errors
    }

    /// Every datasource needs a provider; a plain string one must be allowed.
    fn check_datasources(&self, schema: &Schema) -> Vec<SchemaError> {
        let mut errors = vec![];

        for ds in &schema.datasources {
            match ds.provider() {
                None => errors.push(SchemaError::MissingProvider {
                    kind: "datasource",
                    name: ds.name.to_string(),
                }),
                Some(Value::String(provider)) if !self.config.allows(provider) => {
                    errors.push(SchemaError::UnsupportedProvider {
                        datasource: ds.name.to_string(),
                        provider: provider.clone(),
                        allowed: self.config.providers.join(", "),
                    });
                }
                Some(_) => {}
            }
        }

        errors
    }
}

/// Validate a schema with the default settings.
pub fn validate(schema: &Schema) -> Vec<String> {
    Validator::default().validate(schema)
}

/// Names that occur more than once, one entry per repeat.
fn duplicates<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = IndexSet::new();
    names.into_iter().filter(|name| !seen.insert(*name)).collect()
}

fn check_generators(schema: &Schema) -> Vec<SchemaError> {
    schema
        .generators
        .iter()
        .filter(|g| g.provider().is_none())
        .map(|g| SchemaError::MissingProvider {
            kind: "generator",
            name: g.name.to_string(),
        })
        .collect()
}

fn check_model_names(schema: &Schema) -> Vec<SchemaError> {
    duplicates(schema.model_names())
        .into_iter()
        .map(|name| SchemaError::duplicate("model", name))
        .collect()
}

fn check_model(model: &Model) -> Vec<SchemaError> {
    let mut errors = check_fields(model.name(), &model.fields);

    for attr in &model.attributes {
        if matches!(attr.name(), "id" | "unique" | "index") && attr.args.is_empty() {
            errors.push(SchemaError::invalid_attribute(
                format!("@{}", attr.name),
                model.name(),
                "expected a list of fields",
            ));
        }
    }

    errors
}

/// Duplicate names, empty types and attribute shapes of a field list.
fn check_fields(owner: &str, fields: &[ModelField]) -> Vec<SchemaError> {
    let mut errors: Vec<_> = duplicates(fields.iter().map(ModelField::name))
        .into_iter()
        .map(|name| SchemaError::duplicate_member("field", owner, name))
        .collect();

    for field in fields {
        let target = format!("{owner}.{}", field.name);

        // Any other name is a forward reference resolved against the schema later.
        if field.field_type.name.is_empty() {
            errors.push(SchemaError::EmptyTypeName {
                model: owner.to_string(),
                field: field.name.to_string(),
            });
        }

        for attr in &field.attributes {
            match attr.name() {
                "default" if attr.args.is_empty() => {
                    errors.push(SchemaError::invalid_attribute(
                        "default",
                        &target,
                        "expected at least one argument",
                    ));
                }
                "relation" if attr.has_arg("fields") != attr.has_arg("references") => {
                    errors.push(SchemaError::invalid_attribute(
                        "relation",
                        &target,
                        "`fields` and `references` must be given together",
                    ));
                }
                _ => {}
            }
        }
    }

    errors
}

fn check_composite_types(schema: &Schema) -> Vec<SchemaError> {
    let mut errors: Vec<_> = duplicates(schema.types.iter().map(CompositeType::name))
        .into_iter()
        .map(|name| SchemaError::duplicate("type", name))
        .collect();

    for t in &schema.types {
        errors.extend(check_fields(t.name(), &t.fields));
    }

    errors
}

fn check_enum(e: &Enum) -> Vec<SchemaError> {
    let mut errors = vec![];

    if e.name.is_empty() {
        errors.push(SchemaError::MissingName { kind: "enum" });
    }
    if e.values.is_empty() {
        errors.push(SchemaError::EmptyEnum {
            name: e.name.to_string(),
        });
    }

    errors.extend(
        duplicates(e.values.iter().map(|v| v.name.as_str()))
            .into_iter()
            .map(|name| SchemaError::duplicate_member("enum value", e.name(), name)),
    );

    errors
}

/// Resolve every explicit `@relation` against the declared models.
fn check_relations(schema: &Schema) -> Vec<SchemaError> {
    let mut errors = vec![];

    for model in &schema.models {
        for field in &model.fields {
            let Some(relation) = field.get_attribute("relation") else {
                continue;
            };

            let target = relation
                .get_arg("model")
                .and_then(Value::as_name)
                .unwrap_or(field.field_type.name.as_str());

            if schema.get_model(target).is_none() {
                errors.push(SchemaError::UnknownRelationTarget {
                    model: model.name.to_string(),
                    field: field.name.to_string(),
                    target: target.to_string(),
                });
            }

            if let (Some(fields), Some(references)) =
                (relation.get_arg("fields"), relation.get_arg("references"))
            {
                if fields.arity() != references.arity() {
                    errors.push(SchemaError::RelationArity {
                        model: model.name.to_string(),
                        field: field.name.to_string(),
                        fields: fields.arity(),
                        references: references.arity(),
                    });
                }
            }
        }
    }

    errors
}
