use crate::{
    Value, ValueMap,
    error::{Error, SchemaError},
    options::Options,
    schema::Schema,
    validate::{ErrorKey, ValidationError},
};
use serde::{Serialize, Serializer, ser::Error as _};
use std::sync::Arc;

///
/// Model
///
/// One input record validated against a schema. Construction never fails for
/// bad input: validation failures are kept in `errors()`, failed fields hold
/// `null`, and fields that did validate keep their values.
///

#[derive(Clone, Debug)]
pub struct Model {
    schema: Arc<Schema>,
    values: ValueMap,
    errors: Option<ValidationError>,
    raw: Value,
    options: Options,
}

impl Model {
    /// Validate `data` against `schema`.
    ///
    /// Fails only for the base schema or for a non-validation error raised by
    /// a field.
    pub fn new(schema: &Arc<Schema>, data: Value, options: Options) -> Result<Self, Error> {
        if schema.is_base() {
            return Err(SchemaError::BaseSchema.into());
        }

        let (values, errors) = schema.deserialize_parts(&data, &options)?;

        Ok(Self {
            schema: Arc::clone(schema),
            values,
            errors,
            raw: data,
            options,
        })
    }

    /// Aggregated validation errors, `None` when the input was valid.
    #[must_use]
    pub const fn errors(&self) -> Option<&ValidationError> {
        self.errors.as_ref()
    }

    /// The error reported for one field, if any.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&ValidationError> {
        self.errors
            .as_ref()
            .and_then(|err| err.get(ErrorKey::from(name)))
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// The input exactly as it was handed to `new`.
    #[must_use]
    pub const fn raw_data(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    #[must_use]
    pub const fn values(&self) -> &ValueMap {
        &self.values
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[must_use]
    pub fn into_values(self) -> ValueMap {
        self.values
    }

    /// Serialize the validated values with the options used at construction.
    pub fn to_json(&self) -> Result<Value, Error> {
        self.schema
            .serialize(&self.values, &self.options)
            .map(Value::Object)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        field::{AnyField, FieldParams},
        schema::Declaration,
        test_support::{BrokenField, CountField, FailingField, TextField},
    };
    use serde_json::json;

    fn person() -> Arc<Schema> {
        Schema::base()
            .extend(
                "Person",
                Declaration::new()
                    .field("name", TextField::required())
                    .field("age", CountField::new(FieldParams::optional())),
            )
            .unwrap()
    }

    #[test]
    fn base_schema_cannot_be_instantiated() {
        let err = Model::new(&Schema::base(), json!({}), Options::new()).unwrap_err();

        assert!(matches!(err, Error::Schema(SchemaError::BaseSchema)));
    }

    #[test]
    fn empty_derived_schema_can_be_instantiated() {
        let schema = Schema::base().extend("Empty", Declaration::new()).unwrap();
        let model = Model::new(&schema, json!({}), Options::new()).unwrap();

        assert!(model.is_valid());
        assert!(model.values().is_empty());
    }

    #[test]
    fn valid_input_has_no_errors() {
        let model = Model::new(&person(), json!({ "name": "Ann", "age": "31" }), Options::new())
            .unwrap();

        assert!(model.errors().is_none());
        assert_eq!(model.get("name"), Some(&json!("Ann")));
        assert_eq!(model.get("age"), Some(&json!(31)));
    }

    #[test]
    fn invalid_input_is_kept_not_thrown() {
        let model = Model::new(&person(), json!({ "age": "x" }), Options::new()).unwrap();

        assert!(!model.is_valid());
        assert_eq!(
            serde_json::to_value(model.errors().unwrap()).unwrap(),
            json!({ "name": "Value cannot be empty", "age": "Value must be a number" })
        );
        assert_eq!(model.get("name"), Some(&Value::Null));
        assert_eq!(model.get("age"), Some(&Value::Null));
        assert_eq!(
            model.error("age").and_then(ValidationError::message),
            Some("Value must be a number")
        );
    }

    #[test]
    fn valid_siblings_keep_their_values() {
        let model = Model::new(&person(), json!({ "name": "", "age": 5 }), Options::new())
            .unwrap();

        assert!(model.error("name").is_some());
        assert!(model.error("age").is_none());
        assert_eq!(model.get("age"), Some(&json!(5)));
    }

    #[test]
    fn validation_errors_are_intercepted() {
        let schema = Schema::base()
            .extend(
                "Failing",
                Declaration::new().field(
                    "field",
                    FailingField::new("nope", FieldParams::new()).unwrap(),
                ),
            )
            .unwrap();

        assert!(Model::new(&schema, json!({ "field": true }), Options::new()).is_ok());
    }

    #[test]
    fn other_errors_are_not_intercepted() {
        let schema = Schema::base()
            .extend("Broken", Declaration::new().field("field", BrokenField::required()))
            .unwrap();
        let err = Model::new(&schema, json!({ "field": true }), Options::new()).unwrap_err();

        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn non_object_input_is_a_validation_error() {
        let model = Model::new(&person(), json!([1, 2]), Options::new()).unwrap();

        assert_eq!(
            model.errors().and_then(ValidationError::message),
            Some("Value must be an object")
        );
        assert!(model.values().is_empty());
    }

    #[test]
    fn keeps_raw_data_and_options() {
        let data = json!({ "name": "Ann", "foo": "bar" });
        let opts = Options::new().with("option", "option");
        let model = Model::new(&person(), data.clone(), opts.clone()).unwrap();

        assert_eq!(model.raw_data(), &data);
        assert_eq!(model.options(), &opts);
        assert_eq!(model.schema().name(), Some("Person"));
    }

    #[test]
    fn options_default_to_empty() {
        let model = Model::new(&person(), json!({ "name": "Ann" }), Options::default()).unwrap();

        assert_eq!(model.options(), &Options::new());
    }

    #[test]
    fn to_json_uses_schema_serialize() {
        let model = Model::new(&person(), json!({ "name": "Ann", "age": 4 }), Options::new())
            .unwrap();

        assert_eq!(model.to_json().unwrap(), json!({ "name": "Ann", "age": "4" }));
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "name": "Ann", "age": "4" })
        );
    }

    #[test]
    fn to_json_respects_partial_options() {
        let model = Model::new(&person(), json!({ "name": "Ann" }), Options::partial()).unwrap();

        assert!(model.get("age").is_none());
        assert_eq!(model.to_json().unwrap(), json!({ "name": "Ann" }));
    }

    #[test]
    fn blank_fields_serialize_blank() {
        let schema = Schema::base()
            .extend(
                "Mixed",
                Declaration::new()
                    .field("any", AnyField::new(FieldParams::new()).unwrap())
                    .field("broken", BrokenField::new(FieldParams::optional()).unwrap()),
            )
            .unwrap();
        let model = Model::new(&schema, json!({ "any": 1 }), Options::new()).unwrap();

        assert!(model.is_valid());
        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({ "any": 1, "broken": null })
        );

        let mut values = model.into_values();
        values.insert("broken".to_string(), json!(true));
        assert!(schema.serialize(&values, &Options::new()).is_err());
    }
}
