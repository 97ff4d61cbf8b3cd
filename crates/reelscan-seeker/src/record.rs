//! Field-mapping records.
//!
//! A [`Record`] maps field names to [`FieldValue`]s. Field sets are expected
//! to be homogeneous across a collection, but nothing here enforces it; the
//! sort routines report a missing key when they meet one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{FieldValue, Value};

/// A single row of a collection, keyed by field name.
///
/// ```
/// use reelscan_seeker::{Record, Seekable, Value, Number};
///
/// let record = Record::new()
///     .with("title", "Midnight Mass")
///     .with("release_year", 2021);
///
/// assert_eq!(record.seeker_field_value("title"), Value::String("Midnight Mass"));
/// assert_eq!(record.seeker_field_value("release_year"), Value::Number(Number::I64(2021)));
/// assert_eq!(record.seeker_field_value("cast"), Value::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Returns the stored value of a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Returns `true` if the record has the field (even if it is null).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Seekable for Record {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        self.fields
            .get(field)
            .map_or(Value::Missing, FieldValue::as_value)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
