use crate::{Value, ValueMap};
use serde::{Deserialize, Serialize};

///
/// Options
///
/// Passed unmodified through the whole field tree on every (de)serialize call.
/// `partial` is the only key the framework itself reads; anything else is
/// carried opaquely for custom fields.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Options {
    #[serde(default)]
    partial: bool,

    #[serde(flatten)]
    extra: ValueMap,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with partial mode switched on.
    #[must_use]
    pub fn partial() -> Self {
        Self {
            partial: true,
            ..Self::default()
        }
    }

    /// Omit blank or absent fields instead of defaulting or nulling them.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.partial
    }

    #[must_use]
    pub const fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Attach an opaque option for custom fields.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    #[must_use]
    pub const fn extra(&self) -> &ValueMap {
        &self.extra
    }
}

///
/// TESTS
///
