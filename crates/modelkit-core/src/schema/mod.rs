//! Schemas: named, ordered field tables with single inheritance, and the
//! (de)serialization walk over them.

mod declaration;


pub use declaration::Declaration;

use crate::{
    Value, ValueMap,
    error::{Error, SchemaError},
    field::{Field, FieldRef},
    options::Options,
    validate::{ErrorTree, ValidationError},
};
use declaration::Entry;
use std::{
    fmt,
    sync::{Arc, LazyLock},
};

static BASE: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema {
        name: None,
        parent: None,
        fields: Vec::new(),
    })
});

///
/// Schema
///
/// The effective field table is computed when the schema is derived and
/// never changes afterwards. Every schema descends from `Schema::base()`,
/// which itself declares nothing and cannot back a `Model`.
///

pub struct Schema {
    name: Option<String>,
    parent: Option<Arc<Self>>,
    fields: Vec<(String, FieldRef)>,
}

impl Schema {
    /// The root of every schema lineage.
    #[must_use]
    pub fn base() -> Arc<Self> {
        Arc::clone(&BASE)
    }

    /// Derive an unnamed schema straight from the base.
    pub fn anonymous(decl: Declaration) -> Result<Arc<Self>, SchemaError> {
        Self::base().derive(None, decl)
    }

    /// Derive a named child schema. The child's effective fields are this
    /// schema's effective fields overridden entry by entry by `decl`.
    pub fn extend(
        self: &Arc<Self>,
        name: impl Into<String>,
        decl: Declaration,
    ) -> Result<Arc<Self>, SchemaError> {
        self.derive(Some(name.into()), decl)
    }

    fn derive(
        self: &Arc<Self>,
        name: Option<String>,
        decl: Declaration,
    ) -> Result<Arc<Self>, SchemaError> {
        let mut fields = self.fields.clone();

        for (key, entry) in decl.into_entries()? {
            match entry {
                Entry::Field(field) => {
                    match fields.iter_mut().find(|(existing, _)| *existing == key) {
                        Some(slot) => slot.1 = field,
                        None => fields.push((key, field)),
                    }
                }
                Entry::Remove => fields.retain(|(existing, _)| *existing != key),
            }
        }

        let schema = Self {
            name,
            parent: Some(Arc::clone(self)),
            fields,
        };

        tracing::debug!(
            schema = schema.display_name(),
            parent = self.display_name(),
            fields = schema.fields.len(),
            "derived schema"
        );

        Ok(Arc::new(schema))
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn display_name(&self) -> &str {
        match (&self.name, &self.parent) {
            (Some(name), _) => name,
            (None, None) => "<base>",
            (None, Some(_)) => "<anonymous>",
        }
    }

    /// True only for the root returned by `Schema::base()`.
    #[must_use]
    pub const fn is_base(&self) -> bool {
        self.parent.is_none()
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Whether `ancestor` is this schema or appears anywhere in its lineage.
    #[must_use]
    pub fn descends_from(&self, ancestor: &Self) -> bool {
        let mut current = Some(self);

        while let Some(schema) = current {
            if std::ptr::eq(schema, ancestor) {
                return true;
            }
            current = schema.parent.as_deref();
        }

        false
    }

    /// Effective fields in declaration order, parents first.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &dyn Field)> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.as_ref()))
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field.as_ref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `data` against every effective field.
    ///
    /// Sibling failures are aggregated into one nested `ValidationError`
    /// keyed by field name; any other error aborts immediately.
    pub fn deserialize(&self, data: &Value, options: &Options) -> Result<ValueMap, Error> {
        let (values, errors) = self.deserialize_parts(data, options)?;

        match errors {
            Some(err) => Err(err.into()),
            None => Ok(values),
        }
    }

    /// Deserialize without discarding the fields that did validate. Failed
    /// fields hold `null` in the returned map.
    pub(crate) fn deserialize_parts(
        &self,
        data: &Value,
        options: &Options,
    ) -> Result<(ValueMap, Option<ValidationError>), Error> {
        let Value::Object(input) = data else {
            return Ok((
                ValueMap::new(),
                Some(ValidationError::new("Value must be an object")),
            ));
        };

        let mut values = ValueMap::new();
        let mut errors = ErrorTree::new();

        for (name, field) in &self.fields {
            let value = input.get(name).unwrap_or(&Value::Null);

            let result = if field.is_blank(value) {
                if options.is_partial() {
                    continue;
                }
                field.deserialize_blank(options)
            } else {
                field.deserialize(value, options)
            };

            let value = errors.capture(name.as_str(), result)?;
            values.insert(name.clone(), value.unwrap_or(Value::Null));
        }

        if !errors.is_empty() {
            tracing::trace!(
                schema = self.display_name(),
                failed = errors.len(),
                "schema validation collected failures"
            );
        }

        Ok((values, errors.into_error()))
    }

    /// Convert a value map back into plain data, one key per effective field.
    /// Keys absent from `data` are treated as blank.
    pub fn serialize(&self, data: &ValueMap, options: &Options) -> Result<ValueMap, Error> {
        let mut out = ValueMap::new();

        for (name, field) in &self.fields {
            let value = data.get(name).unwrap_or(&Value::Null);

            let serialized = if field.is_blank(value) {
                if options.is_partial() {
                    continue;
                }
                field.serialize_blank(options)?
            } else {
                field.serialize(value, options)?
            };

            out.insert(name.clone(), serialized);
        }

        Ok(out)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.display_name())
            .field(
                "fields",
                &self.fields.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
