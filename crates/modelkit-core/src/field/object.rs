use crate::{
    Value, ValueMap,
    error::Error,
    field::{Field, FieldParams, FieldRef},
    options::Options,
    validate::ErrorTree,
};
use std::sync::Arc;

///
/// ObjectField
///
/// Applies a child field to every property of an object, collecting failures
/// by property name.
///

#[derive(Debug)]
pub struct ObjectField {
    child: FieldRef,
    params: FieldParams,
}

impl ObjectField {
    pub fn new(child: impl Field + 'static, params: FieldParams) -> Result<Self, Error> {
        Self::from_ref(Arc::new(child), params)
    }

    pub fn from_ref(child: FieldRef, params: FieldParams) -> Result<Self, Error> {
        let mut field = Self { child, params };
        field.params = field.params.settle(&field)?;

        Ok(field)
    }

    #[must_use]
    pub fn child(&self) -> &dyn Field {
        self.child.as_ref()
    }
}

impl Field for ObjectField {
    fn params(&self) -> &FieldParams {
        &self.params
    }

    fn deserialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::Object(props) = value else {
            return Err(Error::invalid("Value must be an object"));
        };

        let mut errors = ErrorTree::new();
        let mut out = ValueMap::new();

        for (key, prop) in props {
            if let Some(v) = errors.capture(key.as_str(), self.child.deserialize(prop, options))? {
                out.insert(key.clone(), v);
            }
        }

        errors.result()?;

        Ok(Value::Object(out))
    }

    fn serialize(&self, value: &Value, options: &Options) -> Result<Value, Error> {
        let Value::Object(props) = value else {
            return Err(Error::invalid("Value must be an object"));
        };

        let mut out = ValueMap::new();
        for (key, prop) in props {
            out.insert(key.clone(), self.child.serialize(prop, options)?);
        }

        Ok(Value::Object(out))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BrokenField, CountField, EchoOptionField};
    use serde_json::json;

    fn counts() -> ObjectField {
        ObjectField::new(CountField::required(), FieldParams::new()).unwrap()
    }

    #[test]
    fn deserializes_every_property() {
        assert_eq!(
            counts()
                .deserialize(&json!({ "foo": 1, "bar": "2" }), &Options::new())
                .unwrap(),
            json!({ "foo": 1, "bar": 2 })
        );
    }

    #[test]
    fn reports_failing_properties_by_name() {
        let err = counts()
            .deserialize(&json!({ "foo": 1, "bar": "x", "baz": [] }), &Options::new())
            .unwrap_err()
            .into_validation()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "bar": "Value must be a number", "baz": "Value must be a number" })
        );
    }

    #[test]
    fn rejects_non_objects() {
        for value in [json!([1]), json!("foo"), json!(3)] {
            let err = counts().deserialize(&value, &Options::new()).unwrap_err();
            assert_eq!(err.to_string(), "Value must be an object");
        }
    }

    #[test]
    fn unexpected_child_error_aborts() {
        let field = ObjectField::new(BrokenField::required(), FieldParams::new()).unwrap();
        let err = field
            .deserialize(&json!({ "a": 1 }), &Options::new())
            .unwrap_err();

        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn serializes_through_child() {
        assert_eq!(
            counts()
                .serialize(&json!({ "a": 1, "b": 2 }), &Options::new())
                .unwrap(),
            json!({ "a": "1", "b": "2" })
        );
    }

    #[test]
    fn options_reach_children() {
        let field = ObjectField::new(EchoOptionField::new(), FieldParams::new()).unwrap();
        let opts = Options::new().with("tag", 7);

        assert_eq!(
            field.deserialize(&json!({ "a": 1 }), &opts).unwrap(),
            json!({ "a": 7 })
        );
    }

    #[test]
    fn empty_object_is_valid() {
        let field = counts();

        assert!(!field.is_blank(&json!({})));
        assert_eq!(
            field.deserialize(&json!({}), &Options::new()).unwrap(),
            json!({})
        );
    }
}
