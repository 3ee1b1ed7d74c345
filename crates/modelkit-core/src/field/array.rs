use crate::{
    Value,
    error::{ConfigError, Error},
    field::{Field, FieldParams, FieldRef},
    options::Options,
    validate::ErrorTree,
};
use std::sync::Arc;

///
/// ArrayParams
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArrayParams {
    pub field: FieldParams,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

///
/// ArrayField
///
/// Applies a child field to every element. Element failures are collected by
/// index into one nested error; the array-level length checks run first.
///

#[derive(Debug)]
pub struct ArrayField {
    child: FieldRef,
    params: ArrayParams,
}

impl ArrayField {
    pub fn new(child: impl Field + 'static, params: ArrayParams) -> Result<Self, Error> {
        Self::from_ref(Arc::new(child), params)
    }

    pub fn from_ref(child: FieldRef, params: ArrayParams) -> Result<Self, Error> {
        if let (Some(min), Some(max)) = (params.min_length, params.max_length)
            && min > max
        {
            return Err(ConfigError::invalid("Max length must be greater than min length").into());
        }

        let mut field = Self { child, params };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }

    #[must_use]
    pub fn child(&self) -> &dyn Field {
        self.child.as_ref()
    }
}

impl Field for ArrayField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::Array(items) = value else {
            return Err(Error::invalid("Value must be an array"));
        };

        if let Some(min) = self.params.min_length
            && items.len() < min
        {
            return Err(Error::invalid(format!(
                "Value must have at least {min} elements"
            )));
        }

        if let Some(max) = self.params.max_length
            && items.len() > max
        {
            return Err(Error::invalid(format!(
                "Value must have at most {max} elements"
            )));
        }

        let mut errors = ErrorTree::new();
        let mut out = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            if let Some(v) = errors.capture(i, self.child.deserialize(item, options))? {
                out.push(v);
            }
        }

        errors.result()?;

        Ok(Value::Array(out))
    }

    fn serialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::Array(items) = value else {
            return Err(Error::invalid("Value must be an array"));
        };

        items
            .iter()
            .map(|item| self.child.serialize(item, options))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

///
/// TESTS
///
