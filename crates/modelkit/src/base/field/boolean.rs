use crate::core::prelude::*;

const TRUE_LITERALS: [&str; 4] = ["y", "yes", "on", "true"];
const FALSE_LITERALS: [&str; 4] = ["n", "no", "off", "false"];

///
/// BooleanField
/// Booleans, plus the usual yes/no words as strings (any letter case).
///

#[derive(Clone, Debug)]
pub struct BooleanField {
    params: FieldParams,
}

impl BooleanField {
    pub fn new(params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { params };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }
}

impl Field for BooleanField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, _options: &Options) -> Result<Value, Error> {
        match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if matches_any(s, &TRUE_LITERALS) => Ok(Value::Bool(true)),
            Value::String(s) if matches_any(s, &FALSE_LITERALS) => Ok(Value::Bool(false)),
            _ => Err(Error::invalid("Value must be a boolean")),
        }
    }
}

fn matches_any(s: &str, literals: &[&str]) -> bool {
    literals.iter().any(|lit| s.eq_ignore_ascii_case(lit))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field() -> BooleanField {
        BooleanField::new(FieldParams::new()).unwrap()
    }

    #[test]
    fn booleans_pass_through() {
        let opts = Options::new();

        assert_eq!(field().deserialize(&json!(true), &opts).unwrap(), json!(true));
        assert_eq!(field().deserialize(&json!(false), &opts).unwrap(), json!(false));
    }

    #[test]
    fn literal_strings_convert() {
        let opts = Options::new();

        for s in ["y", "Y", "yes", "Yes", "YES", "on", "ON", "true", "True"] {
            assert_eq!(field().deserialize(&json!(s), &opts).unwrap(), json!(true), "{s}");
        }
        for s in ["n", "N", "no", "NO", "off", "Off", "false", "FALSE"] {
            assert_eq!(field().deserialize(&json!(s), &opts).unwrap(), json!(false), "{s}");
        }
    }

    #[test]
    fn anything_else_is_rejected() {
        for value in [json!("123"), json!("yess"), json!(" yes"), json!(1), json!(0), json!([])] {
            let err = field().deserialize(&value, &Options::new()).unwrap_err();
            assert_eq!(err.to_string(), "Value must be a boolean", "{value}");
        }
    }

    #[test]
    fn false_is_not_blank() {
        let f = field();

        assert!(!f.is_blank(&json!(false)));
        assert!(f.is_blank(&json!("")));
    }

    #[test]
    fn blank_uses_default() {
        let f = BooleanField::new(FieldParams::with_default(true)).unwrap();

        assert_eq!(f.deserialize_blank(&Options::new()).unwrap(), json!(true));
    }

    #[test]
    fn string_default_is_canonicalized() {
        let f = BooleanField::new(FieldParams::with_default("off")).unwrap();

        assert_eq!(f.params().default, Some(json!(false)));
    }
}
