//! Index store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide upsert / delete / scan primitives over the `scout_index`
//!   table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `("index", "objectID")` is a unique key; upsert replaces the stored
//!   entry wholesale.
//! - Scan order is rowid order: insertion order, stable for a given
//!   store state (the upsert conflict path keeps the original rowid).
//! - Indexes are implicit; explicit creation is rejected loudly.

use crate::db::DbError;
use crate::model::record::{FieldMap, ObjectId};
use crate::serialize::{EntrySerializer, JsonEntrySerializer, SerializeError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for index mutations and scans.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(SerializeError),
    /// Raised by operations the store deliberately does not support.
    Unsupported { operation: &'static str },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
            Self::Unsupported { operation } => write!(
                f,
                "unsupported operation `{operation}`: indexes are created automatically when objects are added"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unsupported { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<SerializeError> for RepoError {
    fn from(value: SerializeError) -> Self {
        Self::Serialize(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of an upsert call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Entry was inserted or replaced.
    Stored,
    /// Record had no searchable fields; nothing was written or removed.
    SkippedEmpty,
}

/// One stored row as produced by [`IndexStore::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    pub index: String,
    pub object_id: ObjectId,
    pub entry: String,
}

/// Storage contract for serialized search entries.
pub trait IndexStore {
    /// Serializes `fields` and inserts or replaces the entry for
    /// `(index, object_id)`. Empty `fields` is a silent no-op.
    fn upsert(&self, index: &str, object_id: &str, fields: &FieldMap) -> RepoResult<UpsertOutcome>;

    /// Removes entries of `index` whose objectID is in `object_ids`.
    /// Missing ids are not errors. Returns the removed row count.
    fn delete_by_ids(&self, index: &str, object_ids: &[ObjectId]) -> RepoResult<usize>;

    /// Removes every entry of `index`. Returns the removed row count.
    fn delete_index(&self, index: &str) -> RepoResult<usize>;

    /// Always fails: indexes are created implicitly on first upsert.
    /// The explicit rejection keeps provisioning mismatches visible.
    fn create_index(&self, name: &str) -> RepoResult<()>;

    /// Streams rows in rowid order, optionally scoped to one index,
    /// returning those accepted by `predicate`. Finite and restartable;
    /// each call re-runs the underlying statement.
    fn scan(&self, scope: Option<&str>, predicate: &dyn Fn(&ScanRow) -> bool)
        -> RepoResult<Vec<ScanRow>>;

    /// The serializer used for stored entries. Query planning renders
    /// filter fragments through this so formatting always matches.
    fn serializer(&self) -> &dyn EntrySerializer;
}

const UPSERT_SQL: &str = "INSERT INTO scout_index (\"index\", \"objectID\", \"entry\")
 VALUES (?1, ?2, ?3)
 ON CONFLICT(\"index\", \"objectID\") DO UPDATE SET \"entry\" = excluded.\"entry\";";

const SCAN_SELECT_SQL: &str = "SELECT \"index\", \"objectID\", \"entry\" FROM scout_index";

/// SQLite-backed index store.
pub struct SqliteIndexStore<'conn, Z = JsonEntrySerializer> {
    conn: &'conn Connection,
    serializer: Z,
}

impl<'conn> SqliteIndexStore<'conn> {
    /// Creates a store using the canonical JSON entry serializer.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_serializer(conn, JsonEntrySerializer)
    }
}

impl<'conn, Z: EntrySerializer> SqliteIndexStore<'conn, Z> {
    /// Creates a store with a caller-provided serializer.
    ///
    /// The serializer must stay consistent with already-stored entries,
    /// otherwise filter fragments stop matching.
    pub fn with_serializer(conn: &'conn Connection, serializer: Z) -> Self {
        Self { conn, serializer }
    }
}

impl<Z: EntrySerializer> IndexStore for SqliteIndexStore<'_, Z> {
    fn upsert(&self, index: &str, object_id: &str, fields: &FieldMap) -> RepoResult<UpsertOutcome> {
        if fields.is_empty() {
            return Ok(UpsertOutcome::SkippedEmpty);
        }

        let entry = self.serializer.serialize_entry(fields)?;
        self.conn
            .execute(UPSERT_SQL, params![index, object_id, entry])?;

        Ok(UpsertOutcome::Stored)
    }

    fn delete_by_ids(&self, index: &str, object_ids: &[ObjectId]) -> RepoResult<usize> {
        if object_ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; object_ids.len()].join(", ");
        let sql = format!(
            "DELETE FROM scout_index WHERE \"index\" = ? AND \"objectID\" IN ({placeholders});"
        );

        let mut bind_values: Vec<Value> = Vec::with_capacity(object_ids.len() + 1);
        bind_values.push(Value::Text(index.to_string()));
        bind_values.extend(object_ids.iter().map(|id| Value::Text(id.clone())));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        Ok(changed)
    }

    fn delete_index(&self, index: &str) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM scout_index WHERE \"index\" = ?1;", [index])?;
        Ok(changed)
    }

    fn create_index(&self, _name: &str) -> RepoResult<()> {
        Err(RepoError::Unsupported {
            operation: "create_index",
        })
    }

    fn scan(
        &self,
        scope: Option<&str>,
        predicate: &dyn Fn(&ScanRow) -> bool,
    ) -> RepoResult<Vec<ScanRow>> {
        let mut sql = String::from(SCAN_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(index) = scope {
            sql.push_str(" WHERE \"index\" = ?");
            bind_values.push(Value::Text(index.to_string()));
        }

        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut matches = Vec::new();

        while let Some(row) = rows.next()? {
            let scan_row = ScanRow {
                index: row.get("index")?,
                object_id: row.get("objectID")?,
                entry: row.get("entry")?,
            };
            if predicate(&scan_row) {
                matches.push(scan_row);
            }
        }

        Ok(matches)
    }

    fn serializer(&self) -> &dyn EntrySerializer {
        &self.serializer
    }
}
