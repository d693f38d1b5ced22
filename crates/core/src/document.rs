use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Field name every stored record must carry, holding the parsed ingestion time.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Field map of one record, in the order the fields appeared in the source.
pub type Fields = IndexMap<String, FieldValue>;

/// A document is a flat key-value map with a mandatory parsed timestamp.
///
/// Immutable once stored; serializes back to the plain JSON object it was
/// ingested as, with the timestamp in normalized RFC 3339 form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    fields: Fields,
}

/// Typed field values: the JSON scalars plus the normalized timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Extract as string, returning None for every other variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Document {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// The parsed ingestion timestamp. Validated documents always have one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self.fields.get(TIMESTAMP_FIELD) {
            Some(FieldValue::Timestamp(ts)) => Some(*ts),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }
}
