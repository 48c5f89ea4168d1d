//! Canonical entry serialization.
//!
//! # Responsibility
//! - Turn an ordered field map into the stored `entry` text.
//! - Render single-field fragments used by equality filters.
//!
//! # Invariants
//! - Serialization is deterministic for identical input; filter fragments
//!   must appear verbatim inside full entries serialized from the same
//!   fields.
//! - Fragment matching is syntactic, not semantic: a numeric filter value
//!   only matches a field that was stored numeric, a string value only a
//!   field stored as a string. This coupling to formatting is the
//!   compatibility contract with existing serialized entries, kept on
//!   purpose.

use crate::model::record::FieldMap;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SerializeResult<T> = Result<T, SerializeError>;

/// Serialization-layer error.
#[derive(Debug)]
pub enum SerializeError {
    Json(serde_json::Error),
}

impl Display for SerializeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "entry serialization failed: {err}"),
        }
    }
}

impl Error for SerializeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Canonical serialization contract for stored entries.
///
/// Implementations must be deterministic: the same field map always
/// yields the same text, and a single field rendered via
/// [`EntrySerializer::field_fragment`] must be locatable as a contiguous
/// substring of any entry serialized from a map containing that field.
pub trait EntrySerializer {
    /// Serializes an ordered field map into entry text.
    fn serialize_entry(&self, fields: &FieldMap) -> SerializeResult<String>;

    /// Renders the `"field":value` fragment for one field.
    ///
    /// Default implementation serializes a one-field map and strips the
    /// enclosing object braces.
    fn field_fragment(&self, field: &str, value: &Value) -> SerializeResult<String> {
        let mut single = FieldMap::new();
        single.insert(field.to_string(), value.clone());
        let rendered = self.serialize_entry(&single)?;

        let inner = rendered
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(&rendered);
        Ok(inner.to_string())
    }
}

/// JSON implementation of the canonical entry format.
///
/// Uses compact `serde_json` output with key order preserved, matching
/// the format entries were historically written in.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntrySerializer;

impl EntrySerializer for JsonEntrySerializer {
    fn serialize_entry(&self, fields: &FieldMap) -> SerializeResult<String> {
        Ok(serde_json::to_string(fields)?)
    }
}
