use super::{StringField, StringParams};
use crate::{base::validator::is_valid_email_syntax, core::prelude::*};

///
/// EmailParams
///

#[derive(Clone, Debug, Default)]
pub struct EmailParams {
    pub field: FieldParams,
    pub case_sensitive: bool,
}

impl EmailParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldParams) -> Self {
        self.field = field;
        self
    }
}

///
/// EmailField
///
/// A trimmed string that must look like an email address. Addresses are
/// lowercased unless `case_sensitive` is set.
///

#[derive(Clone, Debug)]
pub struct EmailField {
    string: StringField,
    params: EmailParams,
}

impl EmailField {
    pub fn new(params: EmailParams) -> Result<Self, Error> {
        let string = StringField::new(StringParams::trimmed().with_field(params.field.clone()))?;

        let mut field = Self { string, params };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }
}

impl Field for EmailField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let value = self.string.deserialize(value, options)?;

        // blank after trimming: the string field already applied the blank policy
        let Value::String(s) = value else {
            return Ok(value);
        };

        let s = if self.params.case_sensitive {
            s
        } else {
            s.to_lowercase()
        };

        if !is_valid_email_syntax(&s) {
            return Err(Error::invalid("Value must be a valid email address"));
        }

        Ok(Value::String(s))
    }
}

///
/// TESTS
///
