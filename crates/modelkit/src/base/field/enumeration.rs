use crate::core::prelude::*;
use std::collections::HashMap;

///
/// EnumParams
///

#[derive(Clone, Debug, Default)]
pub struct EnumParams {
    pub field: FieldParams,
    pub case_sensitive: bool,
}

impl EnumParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldParams) -> Self {
        self.field = field;
        self
    }
}

///
/// EnumField
///
/// Accepts one of a fixed set of strings. Input is trimmed (and lowercased
/// unless case sensitive) before lookup; the result is always the choice
/// exactly as it was configured.
///

#[derive(Clone, Debug)]
pub struct EnumField {
    choices: Vec<String>,
    lookup: HashMap<String, usize>,
    params: EnumParams,
}

impl EnumField {
    pub fn new<I, S>(choices: I, params: EnumParams) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(ConfigError::invalid("Choices list cannot be empty").into());
        }

        let mut lookup = HashMap::with_capacity(choices.len());
        for (i, choice) in choices.iter().enumerate() {
            let key = normalize(choice, params.case_sensitive);
            if lookup.insert(key, i).is_some() {
                return Err(ConfigError::invalid("Choices cannot be doubled").into());
            }
        }

        let mut field = Self {
            choices,
            lookup,
            params,
        };
        field.params.field = field.params.field.settle(&field)?;

        Ok(field)
    }

    /// Build from loosely typed choices, as they arrive from configuration.
    pub fn from_values(choices: &[Value], params: EnumParams) -> Result<Self, Error> {
        let choices = choices
            .iter()
            .map(|c| c.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ConfigError::invalid("All choices must be strings"))?;

        Self::new(choices, params)
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    fn not_a_choice(&self) -> Error {
        Error::invalid(format!(
            "Value must be one of allowed choices: {}",
            self.choices.join(", ")
        ))
    }
}

impl Field for EnumField {
    fn params(&self) -> &FieldParams {
        &self.params.field
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        let Value::String(s) = value else {
            return Err(self.not_a_choice());
        };

        self.lookup
            .get(&normalize(s, self.params.case_sensitive))
            .map(|&i| Value::String(self.choices[i].clone()))
            .ok_or_else(|| self.not_a_choice())
    }
}

fn normalize(s: &str, case_sensitive: bool) -> String {
    let s = s.trim();

    if case_sensitive {
        s.to_string()
    } else {
        s.to_lowercase()
    }
}

///
/// TESTS
///
