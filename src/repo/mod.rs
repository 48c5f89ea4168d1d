//! Persistence layer for the search index.
//!
//! # Responsibility
//! - Define the storage contract for serialized entries.
//! - Isolate SQLite query details from search orchestration.
//!
//! # Invariants
//! - Every mutation is a single atomic replace-or-insert or delete; a
//!   reader never observes a partially written entry.
//! - Missing rows are not errors on delete paths; they resolve to a
//!   zero affected count.

pub mod index_repo;
