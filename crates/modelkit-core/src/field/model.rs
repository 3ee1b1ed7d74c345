use crate::{
    Value,
    error::{ConfigError, Error, SchemaError},
    field::{Field, FieldParams},
    options::Options,
    schema::{Declaration, Schema},
};
use std::sync::Arc;

///
/// ModelSource
///
/// What a `ModelField` wraps: an existing schema, or a bare declaration that
/// becomes an anonymous schema.
///

#[derive(Clone, Debug)]
pub enum ModelSource {
    Declaration(Declaration),
    Schema(Arc<Schema>),
}

impl From<Arc<Schema>> for ModelSource {
    fn from(schema: Arc<Schema>) -> Self {
        Self::Schema(schema)
    }
}

impl From<&Arc<Schema>> for ModelSource {
    fn from(schema: &Arc<Schema>) -> Self {
        Self::Schema(Arc::clone(schema))
    }
}

impl From<Declaration> for ModelSource {
    fn from(decl: Declaration) -> Self {
        Self::Declaration(decl)
    }
}

///
/// ModelField
///
/// Validates a nested object against a schema. The nested schema's error map
/// becomes this field's error, so error trees follow the data's nesting.
/// Defaults are not supported on nested objects.
///

#[derive(Debug)]
pub struct ModelField {
    schema: Arc<Schema>,
    params: FieldParams,
}

impl ModelField {
    pub fn new(source: impl Into<ModelSource>, params: FieldParams) -> Result<Self, Error> {
        if params.default.is_some() {
            return Err(ConfigError::unsupported("Model fields do not support default values").into());
        }

        let schema = match source.into() {
            ModelSource::Schema(schema) => schema,
            ModelSource::Declaration(decl) => Schema::anonymous(decl)?,
        };

        if schema.is_base() {
            return Err(SchemaError::BaseSchema.into());
        }

        Ok(Self { schema, params })
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

impl Field for ModelField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        if !value.is_object() {
            return Err(Error::invalid("Value must be an object"));
        }

        self.schema.deserialize(value, options).map(Value::Object)
    }

    fn serialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::Object(map) = value else {
            return Err(Error::invalid("Value must be an object"));
        };

        self.schema.serialize(map, options).map(Value::Object)
    }
}

///
/// TESTS
///
