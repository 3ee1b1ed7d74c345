use crate::validate::ValidationError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Every fallible field and schema operation returns this type.
/// Only `Validation` is ever caught and aggregated by composite fields and
/// schemas; every other variant aborts the current call unchanged.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unexpected failure raised by a custom field implementation.
    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Wrap an arbitrary error raised by a custom field.
    pub fn custom(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(err.into())
    }

    /// Shorthand for a single-message validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message))
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Split a validation failure from every other kind of error.
    pub fn into_validation(self) -> Result<ValidationError, Self> {
        match self {
            Self::Validation(err) => Ok(err),
            other => Err(other),
        }
    }
}

///
/// ConfigError
///
/// Raised synchronously by field constructors for invalid static configuration.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[error("Default value is invalid: {0}")]
    InvalidDefault(String),

    #[error("{0}")]
    Unsupported(String),
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }
}

///
/// SchemaError
///
/// Misuse of schema declaration or instantiation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("the base schema cannot be instantiated; derive one with Schema::extend")]
    BaseSchema,

    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("field names cannot be empty")]
    EmptyFieldName,
}

///
/// TESTS
///
