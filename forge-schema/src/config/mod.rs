//! Configuration file parsing for `forge.toml`.

use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::parser::{Parsed, parse_with};
use crate::validator::Validator;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "forge.toml";

/// Main configuration structure for `forge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ForgeConfig {
    /// Schema file configuration.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Directory the configuration was loaded from.
    #[serde(skip)]
    root: Option<PathBuf>,
}

impl ForgeConfig {
    /// Load configuration from a file path.
    ///
    /// A relative schema path is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config = Self::from_str(&content)?;
        config.root = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Load `forge.toml` from a project directory.
    pub fn load(dir: impl AsRef<Path>) -> SchemaResult<Self> {
        Self::from_file(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content)?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })?;
        config.validation.check()?;
        Ok(config)
    }

    /// Path of the schema file, resolved against the config directory.
    pub fn schema_path(&self) -> PathBuf {
        match &self.root {
            Some(root) => root.join(&self.schema.path),
            None => PathBuf::from(&self.schema.path),
        }
    }

    /// Build a validator from the validation settings.
    pub fn validator(&self) -> Validator {
        Validator::new(self.validation.clone())
    }

    /// Read, parse and validate the configured schema file.
    pub fn parse_schema(&self) -> SchemaResult<Parsed> {
        let path = self.schema_path();
        let content = std::fs::read_to_string(&path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!("Parsing schema {}", path.display());
        Ok(parse_with(&content, &self.validator()))
    }
}

/// Schema file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Path to the schema file.
    #[serde(default = "default_schema_path")]
    pub path: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            path: default_schema_path(),
        }
    }
}

fn default_schema_path() -> String {
    "schema.prisma".to_string()
}

/// Validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Datasource providers accepted when written as a plain string.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
        }
    }
}

impl ValidationConfig {
    /// Check if a provider string is allowed.
    pub fn allows(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider)
    }

    fn check(&self) -> SchemaResult<()> {
        if self.providers.is_empty() {
            return Err(SchemaError::ConfigError {
                message: "`validation.providers` must list at least one provider".to_string(),
            });
        }
        Ok(())
    }
}

fn default_providers() -> Vec<String> {
    crate::ast::DatabaseProvider::ALL
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

/// Replace `${VAR}` with the value of the environment variable.
///
/// Unset variables are left untouched.
fn expand_env_vars(content: &str) -> SchemaResult<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchemaError::ConfigError {
        message: e.to_string(),
    })?;

    let expanded = re.replace_all(content, |caps: &Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(expanded.into_owned())
}
