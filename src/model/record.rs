//! Indexable record model.
//!
//! # Responsibility
//! - Define the `(objectID, fields)` pair the record source hands to the
//!   index for each searchable row.
//! - Provide small constructors so batch call sites stay readable.
//!
//! # Invariants
//! - `object_id` is stable and never reused for another record within the
//!   same index. Numeric primary keys are rendered as decimal strings.
//! - `fields` keeps the submission order of its keys; the serialized entry
//!   depends on that order staying intact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-defined identifier for a record within one index.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// The persisted column is text, so integer keys are stored in their
/// decimal rendering.
pub type ObjectId = String;

/// Insertion-ordered mapping from field name to searchable value.
///
/// Values are arbitrary JSON scalars, sequences or mappings; the index
/// never interprets them beyond serialization.
pub type FieldMap = serde_json::Map<String, Value>;

/// One searchable record as submitted by the record source.
///
/// The core stores a serialized snapshot of `fields`; it never reads the
/// record source's own storage. A record with an empty `fields` map is
/// accepted but skipped on upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier unique within the target index.
    #[serde(rename = "objectID")]
    pub object_id: ObjectId,
    /// Searchable fields in submission order.
    pub fields: FieldMap,
}

impl Record {
    /// Creates a record from an already-built field map.
    pub fn new(object_id: impl Into<ObjectId>, fields: FieldMap) -> Self {
        Self {
            object_id: object_id.into(),
            fields,
        }
    }

    /// Creates a record from `(name, value)` pairs, preserving pair order.
    ///
    /// Later duplicates of a field name overwrite earlier ones, matching
    /// JSON object semantics.
    pub fn from_pairs<N, V>(
        object_id: impl Into<ObjectId>,
        pairs: impl IntoIterator<Item = (N, V)>,
    ) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        let mut fields = FieldMap::new();
        for (name, value) in pairs {
            fields.insert(name.into(), value.into());
        }
        Self::new(object_id, fields)
    }

    /// Returns whether this record carries no searchable fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Record;
    use serde_json::json;

    #[test]
    fn from_pairs_preserves_submission_order() {
        let record = Record::from_pairs("7", [("title", json!("a")), ("body", json!("b"))]);
        let keys: Vec<_> = record.fields.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "body"]);
    }

    #[test]
    fn duplicate_field_names_keep_last_value() {
        let record = Record::from_pairs("7", [("title", json!("old")), ("title", json!("new"))]);
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields["title"], json!("new"));
    }

    #[test]
    fn empty_record_is_reported_empty() {
        let record = Record::from_pairs::<&str, serde_json::Value>("7", []);
        assert!(record.is_empty());
    }
}
