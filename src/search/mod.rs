//! Search entry points.
//!
//! # Responsibility
//! - Turn structured queries into scan predicates and run them against
//!   the index store.
//! - Reconcile raw hits with caller-supplied candidate records.
//!
//! # Invariants
//! - Results carry no relevance ranking; scan order is preserved from
//!   store to mapper output.
//! - `total` always reflects the full match count, never the pagination
//!   window.

pub mod mapper;
pub mod substring;
