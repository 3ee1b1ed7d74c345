use crate::{
    error::SchemaError,
    field::{Field, FieldRef},
};
use std::{collections::HashSet, sync::Arc};

///
/// Declaration
///
/// The fields one schema declares on top of its parent, in declaration order.
/// An entry either sets a field (adding it or replacing the inherited one)
/// or removes an inherited field from the effective set.
///

#[derive(Clone, Debug, Default)]
pub struct Declaration {
    entries: Vec<(String, Entry)>,
}

#[derive(Clone, Debug)]
pub(crate) enum Entry {
    Field(FieldRef),
    Remove,
}

impl Declaration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(self, name: impl Into<String>, field: impl Field + 'static) -> Self {
        self.shared(name, Arc::new(field))
    }

    /// Declare a field instance that is shared with other schemas or fields.
    #[must_use]
    pub fn shared(mut self, name: impl Into<String>, field: FieldRef) -> Self {
        self.entries.push((name.into(), Entry::Field(field)));
        self
    }

    /// Shadow an inherited field so it drops out of the effective set.
    #[must_use]
    pub fn remove(mut self, name: impl Into<String>) -> Self {
        self.entries.push((name.into(), Entry::Remove));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the declaration, rejecting empty or repeated names.
    pub(crate) fn into_entries(self) -> Result<Vec<(String, Entry)>, SchemaError> {
        let mut seen = HashSet::with_capacity(self.entries.len());

        for (name, _) in &self.entries {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
        }

        Ok(self.entries)
    }
}

impl<N: Into<String>> FromIterator<(N, FieldRef)> for Declaration {
    fn from_iter<I: IntoIterator<Item = (N, FieldRef)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |decl, (name, field)| decl.shared(name, field))
    }
}
