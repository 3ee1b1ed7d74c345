//! Core runtime for modelkit: the field contract, composite fields, schemas,
//! validated models, and the errors they report.
//!
//! Leaf field kinds (strings, numbers, enums, ...) live in the `modelkit`
//! facade crate; everything here is kind-agnostic.
#![warn(unreachable_pub)]

pub mod error;
pub mod field;
pub mod model;
pub mod options;
pub mod schema;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;
pub use serde_json::Value;

/// Plain value map produced by deserialization and consumed by serialization.
pub type ValueMap = serde_json::Map<String, Value>;

///
/// Prelude
///
/// Vocabulary needed to declare schemas and write custom fields.
///

pub mod prelude {
    pub use crate::{
        Value, ValueMap,
        error::{ConfigError, Error, SchemaError},
        field::{
            AnyField, ArrayField, ArrayParams, Field, FieldParams, FieldRef, ModelField,
            ModelSource, ObjectField,
        },
        model::Model,
        options::Options,
        schema::{Declaration, Schema},
        validate::{ErrorKey, ValidationError},
    };
}
