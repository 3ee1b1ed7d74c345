use super::{format_number, number_value, parse_number};
use crate::core::prelude::*;

///
/// NumberParams
///

#[derive(Clone, Debug, Default)]
pub struct NumberParams {
    pub field: FieldParams,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldParams) -> Self {
        self.field = field;
        self
    }
}

///
/// NumberField
///
/// Double precision numbers. Numeric strings are parsed strictly: the whole
/// string (ignoring surrounding whitespace) must be a decimal literal.
///

#[derive(Clone, Debug)]
pub struct NumberField {
    params: NumberParams,
}

impl NumberField {
    pub fn new(params: NumberParams) -> Result<Self, Error> {
        check_range(params.min, params.max)?;

        let mut field = Self { params };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }

    #[must_use]
    pub const fn number_params(&self) -> &NumberParams {
        &self.params
    }

    /// Parse and bound-check without converting back into a `Value`.
    pub(crate) fn deserialize_f64(&self, value: &Value) -> Result<f64, Error> {
        let n = parse_number(value)
            .filter(|n| n.is_finite())
            .ok_or_else(|| Error::invalid("Value must be a number"))?;

        if let Some(min) = self.params.min
            && n < min
        {
            return Err(Error::invalid(format!(
                "Value cannot be less than {}",
                format_number(min)
            )));
        }

        if let Some(max) = self.params.max
            && n > max
        {
            return Err(Error::invalid(format!(
                "Value cannot be greater than {}",
                format_number(max)
            )));
        }

        Ok(n)
    }
}

impl Field for NumberField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        self.deserialize_f64(value).map(number_value)
    }
}

fn check_range(min: Option<f64>, max: Option<f64>) -> Result<(), ConfigError> {
    if min.is_some_and(|n| !n.is_finite()) {
        return Err(ConfigError::invalid("Min value must be a number"));
    }
    if max.is_some_and(|n| !n.is_finite()) {
        return Err(ConfigError::invalid("Max value must be a number"));
    }
    if let (Some(min), Some(max)) = (min, max)
        && max < min
    {
        return Err(ConfigError::invalid(
            "Max value must be greater than min value",
        ));
    }

    Ok(())
}

///
/// TESTS
///
