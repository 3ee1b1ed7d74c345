//! Minimal field kinds for exercising the core without the leaf fields.

use crate::{
    Value,
    error::Error,
    field::{Field, FieldParams},
    options::Options,
};

///
/// TextField
/// Requires a string and trims it.
///

#[derive(Debug)]
pub(crate) struct TextField {
    params: FieldParams,
}

impl TextField {
    pub(crate) fn new(params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { params };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }

    pub(crate) fn required() -> Self {
        Self {
            params: FieldParams::new(),
        }
    }
}

impl Field for TextField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        match value {
            Value::String(s) => Ok(Value::String(s.trim().to_string())),
            _ => Err(Error::invalid("Value must be a string")),
        }
    }
}

///
/// CountField
/// Accepts non-negative integers and integer strings; serializes to strings.
///

#[derive(Debug)]
pub(crate) struct CountField {
    params: FieldParams,
}

impl CountField {
    pub(crate) fn new(params: FieldParams) -> Self {
        Self { params }
    }

    pub(crate) fn required() -> Self {
        Self::new(FieldParams::new())
    }
}

impl Field for CountField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        let parsed = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse::<u64>().ok(),
            _ => None,
        };

        parsed
            .map(Value::from)
            .ok_or_else(|| Error::invalid("Value must be a number"))
    }

    fn serialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        Ok(Value::String(value.to_string()))
    }
}

///
/// FailingField
/// Rejects every non-blank value with a fixed message.
///

#[derive(Debug)]
pub(crate) struct FailingField {
    params: FieldParams,
    message: &'static str,
}

impl FailingField {
    pub(crate) fn new(message: &'static str, params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { params, message };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }
}

impl Field for FailingField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, _value: &Value, _options: &Options) -> Result<Value, Error> {
        Err(Error::invalid(self.message))
    }
}

///
/// BrokenField
/// Fails with a non-validation error, standing in for a buggy custom field.
///

#[derive(Debug)]
pub(crate) struct BrokenField {
    params: FieldParams,
}

impl BrokenField {
    pub(crate) fn new(params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { params };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }

    pub(crate) fn required() -> Self {
        Self {
            params: FieldParams::new(),
        }
    }
}

impl Field for BrokenField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, _value: &Value, _options: &Options) -> Result<Value, Error> {
        Err(Error::custom("boom"))
    }

    fn serialize(&self, _value: &Value, _options: &Options) -> Result<Value, Error> {
        Err(Error::custom("boom"))
    }
}

///
/// EchoOptionField
/// Returns the value of the `tag` option, proving options reach children.
///

#[derive(Debug)]
pub(crate) struct EchoOptionField {
    params: FieldParams,
}

impl EchoOptionField {
    pub(crate) fn new() -> Self {
        Self {
            params: FieldParams::new(),
        }
    }
}

impl Field for EchoOptionField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, _value: &Value, options: &Options) -> Result<Value, Error> {
        Ok(options.get("tag").cloned().unwrap_or(Value::Null))
    }

    fn deserialize_blank(&self, options: &Options) -> Result<Value, Error> {
        Ok(options.get("tag").cloned().unwrap_or(Value::Null))
    }

    fn serialize(&self, _value: &Value, options: &Options) -> Result<Value, Error> {
        Ok(options.get("tag").cloned().unwrap_or(Value::Null))
    }
}
