use crate::core::prelude::*;

///
/// StringParams
///

#[derive(Clone, Debug, Default)]
pub struct StringParams {
    pub field: FieldParams,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub trim: bool,
}

impl StringParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn trimmed() -> Self {
        Self {
            trim: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldParams) -> Self {
        self.field = field;
        self
    }
}

///
/// StringField
///
/// Accepts strings only. Length bounds count characters, not bytes. With
/// `trim`, a value that trims to nothing is handled as a blank value.
///

#[derive(Clone, Debug)]
pub struct StringField {
    params: StringParams,
}

impl StringField {
    pub fn new(params: StringParams) -> Result<Self, Error> {
        if let (Some(min), Some(max)) = (params.min_length, params.max_length)
            && min > max
        {
            return Err(ConfigError::invalid("Max length must be greater than min length").into());
        }

        let mut field = Self { params };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }

    #[must_use]
    pub const fn string_params(&self) -> &StringParams {
        &self.params
    }
}

impl Field for StringField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::String(s) = value else {
            return Err(Error::invalid("Value must be a string"));
        };

        let s = if self.params.trim {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return self.deserialize_blank(options);
            }
            trimmed
        } else {
            s.as_str()
        };

        let len = s.chars().count();

        if let Some(min) = self.params.min_length
            && len < min
        {
            return Err(Error::invalid(format!(
                "Value's length cannot be less than {min}"
            )));
        }

        if let Some(max) = self.params.max_length
            && len > max
        {
            return Err(Error::invalid(format!(
                "Value's length cannot be greater than {max}"
            )));
        }

        Ok(Value::String(s.to_string()))
    }
}

///
/// TESTS
///
