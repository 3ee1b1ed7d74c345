//! ## Crate layout
//! - `core`: the field contract, composite fields, schemas, and models.
//! - `base`: builtin leaf fields (string, number, integer, boolean, enum,
//!   email) and the email syntax predicate.
//! - `config`: build schemas from declarative TOML (or any serde format).
//!
//! The `prelude` module covers everything needed to declare a schema and
//! validate data against it.

pub use modelkit_core as core;

pub mod base;
pub mod config;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{Error, Value, ValueMap};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        base::{
            field::{
                BooleanField, EmailField, EmailParams, EnumField, EnumParams, IntegerField,
                IntegerParams, NumberField, NumberParams, StringField, StringParams,
            },
            validator::is_valid_email_syntax,
        },
        config::{ConfigLoadError, FieldConfig, SchemaConfig, load_schema},
        core::prelude::*,
    };
}
