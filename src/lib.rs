//! Embedded substring search core over a single SQLite table.
//! This crate is the single source of truth for index storage and
//! query semantics; record materialization stays with the caller.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod serialize;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{FieldMap, ObjectId, Record};
pub use repo::index_repo::{
    IndexStore, RepoError, RepoResult, ScanRow, SqliteIndexStore, UpsertOutcome,
};
pub use search::mapper::{map_ids, reconcile, reconcile_lazy};
pub use search::substring::{
    paginate, search, RawPredicate, SearchError, SearchHit, SearchQuery, SearchResult,
    SearchResults,
};
pub use serialize::{EntrySerializer, JsonEntrySerializer, SerializeError};
pub use service::index_service::IndexService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
