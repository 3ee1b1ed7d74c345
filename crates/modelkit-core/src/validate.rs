use crate::error::Error;
use derive_more::Display;
use serde::{Serialize, Serializer, ser::SerializeMap};
use indexmap::IndexMap;
use std::fmt;

/// Nested validation failures keyed by array index or property name, in the
/// order the failures were recorded.
pub type ErrorMap = IndexMap<ErrorKey, ValidationError>;

///
/// ErrorKey
///
/// One step into a composite value: a property/field name or an array index.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum ErrorKey {
    #[display("{_0}")]
    Field(String),

    #[display("{_0}")]
    Index(usize),
}

impl From<&str> for ErrorKey {
    fn from(s: &str) -> Self {
        Self::Field(s.to_string())
    }
}

impl From<String> for ErrorKey {
    fn from(s: String) -> Self {
        Self::Field(s)
    }
}

impl From<usize> for ErrorKey {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

///
/// ValidationError
///
/// Expected, reportable failure of untrusted input. Leaf fields produce a
/// `Message`; composite fields and schemas produce a `Nested` map whose shape
/// mirrors the invalid substructure.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    Message(String),
    Nested(ErrorMap),
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    #[must_use]
    pub const fn nested(errors: ErrorMap) -> Self {
        Self::Nested(errors)
    }

    /// The leaf message, if this is not a nested error.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            Self::Nested(_) => None,
        }
    }

    #[must_use]
    pub const fn children(&self) -> Option<&ErrorMap> {
        match self {
            Self::Message(_) => None,
            Self::Nested(map) => Some(map),
        }
    }

    /// Child error under `key`, if this is a nested error.
    #[must_use]
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&Self> {
        self.children().and_then(|map| map.get(&key.into()))
    }

    /// Flatten the tree into `(path, message)` pairs in recorded order.
    #[must_use]
    pub fn issues(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        collect_issues(self, &mut path, &mut out);

        out
    }
}

fn collect_issues<'a>(
    err: &'a ValidationError,
    path: &mut Vec<&'a ErrorKey>,
    out: &mut Vec<(String, String)>,
) {
    match err {
        ValidationError::Message(msg) => out.push((render_path(path), msg.clone())),
        ValidationError::Nested(map) => {
            for (key, child) in map {
                path.push(key);
                collect_issues(child, path, out);
                path.pop();
            }
        }
    }
}

fn render_path(path: &[&ErrorKey]) -> String {
    use std::fmt::Write;

    let mut out = String::new();

    for (i, key) in path.iter().enumerate() {
        match key {
            ErrorKey::Field(s) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(s);
            }
            ErrorKey::Index(idx) => {
                let _ = write!(out, "[{idx}]");
            }
        }
    }

    out
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues = self.issues();

        if issues.is_empty() {
            return f.write_str("validation failed");
        }

        for (i, (path, msg)) in issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if path.is_empty() {
                f.write_str(msg)?;
            } else {
                write!(f, "{path}: {msg}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Message(msg) => serializer.serialize_str(msg),
            Self::Nested(errors) => {
                let mut map = serializer.serialize_map(Some(errors.len()))?;
                for (key, child) in errors {
                    map.serialize_entry(&key.to_string(), child)?;
                }
                map.end()
            }
        }
    }
}

///
/// ErrorTree
///
/// Collects sibling failures within one aggregation scope (one array, one
/// object, one schema level).
///

#[derive(Debug, Default)]
pub struct ErrorTree {
    errors: ErrorMap,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<ErrorKey>, err: ValidationError) {
        self.errors.insert(key.into(), err);
    }

    /// Record a validation failure under `key` and yield `None`; pass
    /// successes through as `Some`. Any other error is returned untouched.
    pub fn capture<T>(
        &mut self,
        key: impl Into<ErrorKey>,
        result: Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(Error::Validation(err)) => {
                self.add(key, err);
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(ValidationError::Nested(self.errors))
        }
    }

    pub fn result(self) -> Result<(), ValidationError> {
        self.into_error().map_or(Ok(()), Err)
    }
}

///
/// TESTS
///
