//! Index lifecycle service.
//!
//! # Responsibility
//! - Provide batch-oriented entry points for record sources: index,
//!   delete, purge, search, paginate.
//! - Delegate persistence to the store contract.
//!
//! # Invariants
//! - Service APIs never bypass the store's empty-record and atomicity
//!   contracts.
//! - The service stays storage-agnostic; any `IndexStore` works.

use crate::model::record::{ObjectId, Record};
use crate::repo::index_repo::{IndexStore, RepoResult, UpsertOutcome};
use crate::search::substring::{self, SearchQuery, SearchResult, SearchResults};

/// Use-case facade over an index store.
pub struct IndexService<S: IndexStore> {
    store: S,
}

impl<S: IndexStore> IndexService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Upserts a batch of records into `index`.
    ///
    /// Records without searchable fields are skipped, matching the
    /// store's empty-record no-op. Returns how many records were
    /// actually stored.
    pub fn index_records(&self, index: &str, records: &[Record]) -> RepoResult<usize> {
        let mut stored = 0;
        for record in records {
            if self.store.upsert(index, &record.object_id, &record.fields)?
                == UpsertOutcome::Stored
            {
                stored += 1;
            }
        }
        Ok(stored)
    }

    /// Removes the given objectIDs from `index`.
    ///
    /// Missing ids are not errors. Returns the removed row count.
    pub fn delete_records(&self, index: &str, object_ids: &[ObjectId]) -> RepoResult<usize> {
        self.store.delete_by_ids(index, object_ids)
    }

    /// Removes every entry of `index`. Returns the removed row count.
    pub fn purge_index(&self, index: &str) -> RepoResult<usize> {
        self.store.delete_index(index)
    }

    /// Explicit index provisioning; always rejected, since indexes are
    /// created implicitly on first upsert.
    pub fn create_index(&self, name: &str) -> RepoResult<()> {
        self.store.create_index(name)
    }

    /// Runs a query, honoring any pagination window set on it.
    pub fn search(&self, query: &SearchQuery) -> SearchResult<SearchResults> {
        substring::search(&self.store, query)
    }

    /// Runs a query with an explicit pagination window.
    pub fn paginate(
        &self,
        query: &SearchQuery,
        per_page: u32,
        page: u32,
    ) -> SearchResult<SearchResults> {
        substring::paginate(&self.store, query, per_page, page)
    }
}
