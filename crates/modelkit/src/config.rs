//! Declarative schemas: field tables written in TOML (or any serde format)
//! and built into `Schema`s at runtime.
//!
//! ```toml
//! name = "User"
//!
//! [fields.email]
//! kind = "email"
//!
//! [fields.age]
//! kind = "integer"
//! optional = true
//! min = 0
//! ```

use crate::{
    base::field::{
        BooleanField, EmailField, EmailParams, EnumField, EnumParams, IntegerField, IntegerParams,
        NumberField, NumberParams, StringField, StringParams,
    },
    core::prelude::*,
};
use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// ConfigLoadError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ConfigLoadError {
    #[error("field '{field}': {source}")]
    Field { field: String, source: Error },

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid schema configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ConfigLoadError {
    fn field(field: &str, source: impl Into<Error>) -> Self {
        Self::Field {
            field: field.to_string(),
            source: source.into(),
        }
    }
}

/// Read, parse and build a schema file in one step.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Arc<Schema>, ConfigLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = SchemaConfig::from_toml_str(&text)?;
    let schema = config.build()?;

    tracing::debug!(path = %path.display(), schema = %config.name, "loaded schema");

    Ok(schema)
}

///
/// SchemaConfig
///

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub name: String,

    #[serde(deserialize_with = "ordered_fields")]
    pub fields: Vec<(String, FieldConfig)>,
}

impl SchemaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigLoadError> {
        Ok(toml::from_str(text)?)
    }

    /// Build a schema directly on top of the base schema.
    pub fn build(&self) -> Result<Arc<Schema>, ConfigLoadError> {
        self.extend(&Schema::base())
    }

    /// Build a schema that inherits from `parent`.
    pub fn extend(&self, parent: &Arc<Schema>) -> Result<Arc<Schema>, ConfigLoadError> {
        let decl = declaration("", &self.fields)?;

        Ok(parent.extend(self.name.clone(), decl)?)
    }
}

fn declaration(
    prefix: &str,
    fields: &[(String, FieldConfig)],
) -> Result<Declaration, ConfigLoadError> {
    fields.iter().try_fold(Declaration::new(), |decl, (name, config)| {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        Ok(decl.shared(name.clone(), config.build(&path)?))
    })
}

// Keeps table entries in document order; a plain map type would not.
fn ordered_fields<'de, D>(de: D) -> Result<Vec<(String, FieldConfig)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, FieldConfig)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of field configurations")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry()? {
                fields.push(entry);
            }

            Ok(fields)
        }
    }

    de.deserialize_map(FieldsVisitor)
}

///
/// FieldConfig
///

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[remain::sorted]
pub enum FieldConfig {
    Array(ArrayConfig),
    Boolean(BooleanConfig),
    Email(EmailConfig),
    Enum(EnumConfig),
    Integer(IntegerConfig),
    Model(ModelConfig),
    Number(NumberConfig),
    Object(ObjectConfig),
    String(StringConfig),
}

impl FieldConfig {
    /// Build the configured field. `path` names the field in errors.
    pub fn build(&self, path: &str) -> Result<FieldRef, ConfigLoadError> {
        let field: FieldRef = match self {
            Self::Array(c) => {
                let params = ArrayParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    min_length: length(path, c.min_length.as_ref(), "Min length")?,
                    max_length: length(path, c.max_length.as_ref(), "Max length")?,
                };
                let child = c.of.build(path)?;

                Arc::new(ArrayField::from_ref(child, params).map_err(|e| ConfigLoadError::field(path, e))?)
            }
            Self::Boolean(c) => Arc::new(
                BooleanField::new(field_params(c.optional, c.default.as_ref()))
                    .map_err(|e| ConfigLoadError::field(path, e))?,
            ),
            Self::Email(c) => {
                let params = EmailParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    case_sensitive: c.case_sensitive,
                };

                Arc::new(EmailField::new(params).map_err(|e| ConfigLoadError::field(path, e))?)
            }
            Self::Enum(c) => {
                let params = EnumParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    case_sensitive: c.case_sensitive,
                };

                Arc::new(
                    EnumField::from_values(&c.choices, params)
                        .map_err(|e| ConfigLoadError::field(path, e))?,
                )
            }
            Self::Integer(c) => {
                let params = IntegerParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    min: integer(path, c.min.as_ref(), "Min value")?,
                    max: integer(path, c.max.as_ref(), "Max value")?,
                };

                Arc::new(IntegerField::new(params).map_err(|e| ConfigLoadError::field(path, e))?)
            }
            Self::Model(c) => {
                let decl = declaration(path, &c.fields)?;

                Arc::new(
                    ModelField::new(decl, field_params(c.optional, c.default.as_ref()))
                        .map_err(|e| ConfigLoadError::field(path, e))?,
                )
            }
            Self::Number(c) => {
                let params = NumberParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    min: number(path, c.min.as_ref(), "Min value")?,
                    max: number(path, c.max.as_ref(), "Max value")?,
                };

                Arc::new(NumberField::new(params).map_err(|e| ConfigLoadError::field(path, e))?)
            }
            Self::Object(c) => {
                let child = c.of.build(path)?;

                Arc::new(
                    ObjectField::from_ref(child, field_params(c.optional, c.default.as_ref()))
                        .map_err(|e| ConfigLoadError::field(path, e))?,
                )
            }
            Self::String(c) => {
                let params = StringParams {
                    field: field_params(c.optional, c.default.as_ref()),
                    min_length: length(path, c.min_length.as_ref(), "Min length")?,
                    max_length: length(path, c.max_length.as_ref(), "Max length")?,
                    trim: c.trim,
                };

                Arc::new(StringField::new(params).map_err(|e| ConfigLoadError::field(path, e))?)
            }
        };

        Ok(field)
    }
}

fn field_params(optional: bool, default: Option<&Value>) -> FieldParams {
    FieldParams {
        default: default.cloned(),
        optional,
    }
}

fn length(path: &str, value: Option<&Value>, what: &str) -> Result<Option<usize>, ConfigLoadError> {
    value
        .map(|v| {
            v.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    ConfigLoadError::field(
                        path,
                        ConfigError::invalid(format!("{what} must be a positive integer")),
                    )
                })
        })
        .transpose()
}

fn number(path: &str, value: Option<&Value>, what: &str) -> Result<Option<f64>, ConfigLoadError> {
    value
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                ConfigLoadError::field(path, ConfigError::invalid(format!("{what} must be a number")))
            })
        })
        .transpose()
}

#[allow(clippy::cast_possible_truncation)]
fn integer(path: &str, value: Option<&Value>, what: &str) -> Result<Option<i64>, ConfigLoadError> {
    value
        .map(|v| {
            if let Some(n) = v.as_i64() {
                return Ok(n);
            }

            let message = match v.as_f64() {
                Some(n) if n.fract() == 0.0 && n.abs() < 9.2e18 => return Ok(n as i64),
                Some(_) => format!("{what} must be an integer"),
                None => format!("{what} must be a number"),
            };

            Err(ConfigLoadError::field(path, ConfigError::invalid(message)))
        })
        .transpose()
}

//
// Kind-specific tables
//

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub min_length: Option<Value>,
    pub max_length: Option<Value>,
    pub of: Box<FieldConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BooleanConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub choices: Vec<Value>,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegerConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    #[serde(deserialize_with = "ordered_fields")]
    pub fields: Vec<(String, FieldConfig)>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub of: Box<FieldConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringConfig {
    #[serde(default)]
    pub optional: bool,
    pub default: Option<Value>,
    pub min_length: Option<Value>,
    pub max_length: Option<Value>,
    #[serde(default)]
    pub trim: bool,
}

///
/// TESTS
///
