use super::{NumberField, NumberParams};
use crate::core::prelude::*;

// 2^63: the first integral f64 that no longer fits in an i64.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

///
/// IntegerParams
///

#[derive(Clone, Debug, Default)]
pub struct IntegerParams {
    pub field: FieldParams,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntegerParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
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
/// IntegerField
///
/// A `NumberField` that also requires a mathematical integer. JSON integers
/// keep their exact `i64` value; everything else goes through the number
/// conversion first, and must land in `i64` range so the output is always a
/// JSON integer.
///

#[derive(Clone, Debug)]
pub struct IntegerField {
    number: NumberField,
    params: IntegerParams,
}

impl IntegerField {
    #[allow(clippy::cast_precision_loss)]
    pub fn new(params: IntegerParams) -> Result<Self, Error> {
        let number = NumberField::new(
            NumberParams::new().with_range(params.min.map(|n| n as f64), params.max.map(|n| n as f64)),
        )?;

        let mut field = Self { number, params };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }

    #[must_use]
    pub const fn integer_params(&self) -> &IntegerParams {
        &self.params
    }
}

impl Field for IntegerField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    #[allow(clippy::cast_possible_truncation)]
    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        if let Some(n) = value.as_i64() {
            // exact path, bounds compared as integers
            if let Some(min) = self.params.min
                && n < min
            {
                return Err(Error::invalid(format!("Value cannot be less than {min}")));
            }
            if let Some(max) = self.params.max
                && n > max
            {
                return Err(Error::invalid(format!("Value cannot be greater than {max}")));
            }

            return Ok(Value::from(n));
        }

        let n = self.number.deserialize_f64(value)?;
        if n.fract() != 0.0 || !(-I64_LIMIT..I64_LIMIT).contains(&n) {
            return Err(Error::invalid("Value must be an integer"));
        }

        Ok(Value::from(n as i64))
    }
}

///
/// TESTS
///
