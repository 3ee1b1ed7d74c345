//! The field contract and the blank-value policy every field kind shares.

mod array;
mod model;
mod object;

pub use array::{ArrayField, ArrayParams};
pub use model::{ModelField, ModelSource};
pub use object::ObjectField;

use crate::{
    Value,
    error::{ConfigError, Error},
    options::Options,
};
use std::{fmt, sync::Arc};

/// Shared handle to a field; fields are immutable once built.
pub type FieldRef = Arc<dyn Field>;

/// Message reported when a required field receives a blank value.
pub const EMPTY_MESSAGE: &str = "Value cannot be empty";

///
/// Field
///
/// A validator/converter for one value. `Schema` and the composite fields only
/// call `deserialize` for input that `is_blank` rejected; blank input goes to
/// `deserialize_blank` instead.
///

pub trait Field: fmt::Debug + Send + Sync {
    fn params(&self) -> &FieldParams;

    fn is_blank(&self, value: &Value) -> bool {
        is_blank(value)
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error>;

    fn deserialize_blank(&self, _options: &Options) -> Result<Value, Error> {
        self.params().deserialize_blank()
    }

    fn serialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        Ok(value.clone())
    }

    fn serialize_blank(&self, _options: &Options) -> Result<Value, Error> {
        Ok(Value::Null)
    }
}

/// Default blank policy: `null` (or a missing key) and the empty string.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

///
/// FieldParams
///
/// Configuration every field kind shares. Once a field is built its params
/// are never mutated; `default` then holds the validated form of whatever the
/// caller configured.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldParams {
    pub default: Option<Value>,
    pub optional: bool,
}

impl FieldParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_default(default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..Self::default()
        }
    }

    /// Blank policy: default, then null when optional, otherwise a
    /// validation failure. The default is not re-validated here.
    pub fn deserialize_blank(&self) -> Result<Value, Error> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }

        if self.optional {
            Ok(Value::Null)
        } else {
            Err(Error::invalid(EMPTY_MESSAGE))
        }
    }

    /// Run the configured default through `field`'s own `deserialize`,
    /// returning params that hold the validated default.
    ///
    /// A validation failure becomes `ConfigError::InvalidDefault`; any other
    /// error is returned unchanged.
    pub fn settle(&self, field: &dyn Field) -> Result<Self, Error> {
        let Some(default) = &self.default else {
            return Ok(self.clone());
        };

        match field.deserialize(default, &Options::default()) {
            Ok(value) => Ok(Self {
                default: Some(value),
                optional: self.optional,
            }),
            Err(Error::Validation(err)) => {
                tracing::debug!(?field, %err, "rejected field default");

                Err(ConfigError::InvalidDefault(err.to_string().to_lowercase()).into())
            }
            Err(other) => Err(other),
        }
    }
}

///
/// AnyField
///
/// Accepts any non-blank value unchanged; only the blank policy applies.
///

#[derive(Clone, Debug)]
pub struct AnyField {
    params: FieldParams,
}

impl AnyField {
    pub fn new(params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { params };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }
}

impl Field for AnyField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        Ok(value.clone())
    }
}

///
/// TESTS
///
