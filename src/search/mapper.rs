//! Result-to-record reconciliation.
//!
//! # Responsibility
//! - Extract objectIDs from a result set in scan order.
//! - Join hits against caller-supplied candidate records, tolerating
//!   candidates that lag behind the index.
//!
//! # Invariants
//! - Output order always matches hit order, regardless of the candidate
//!   source's own order.
//! - Missing candidates are omitted, never an error.

use crate::model::record::ObjectId;
use crate::search::substring::SearchResults;
use std::collections::HashMap;

/// Returns the objectIDs of `results` in scan order.
pub fn map_ids(results: &SearchResults) -> Vec<ObjectId> {
    results
        .hits
        .iter()
        .map(|hit| hit.object_id.clone())
        .collect()
}

/// Joins hits against candidates keyed by objectID.
///
/// For each hit in scan order the matching candidate is emitted; ids
/// without a candidate are silently dropped. An empty result set
/// short-circuits without touching `candidates`.
pub fn reconcile<R: Clone>(
    results: &SearchResults,
    candidates: &HashMap<ObjectId, R>,
) -> Vec<R> {
    if results.is_empty() {
        return Vec::new();
    }

    results
        .hits
        .iter()
        .filter_map(|hit| candidates.get(&hit.object_id).cloned())
        .collect()
}

/// Streaming variant of [`reconcile`] for candidate sources with their
/// own ordering.
///
/// Filters `candidates` down to ids present in `results` and re-sorts by
/// the hit's original position, so output order matches scan order even
/// when the source yields records in a different order.
pub fn reconcile_lazy<R, I, K>(results: &SearchResults, candidates: I, key_of: K) -> Vec<R>
where
    I: IntoIterator<Item = R>,
    K: Fn(&R) -> ObjectId,
{
    if results.is_empty() {
        return Vec::new();
    }

    let positions: HashMap<&str, usize> = results
        .hits
        .iter()
        .enumerate()
        .map(|(position, hit)| (hit.object_id.as_str(), position))
        .collect();

    let mut matched: Vec<(usize, R)> = candidates
        .into_iter()
        .filter_map(|record| {
            positions
                .get(key_of(&record).as_str())
                .map(|&position| (position, record))
        })
        .collect();

    matched.sort_by_key(|(position, _)| *position);
    matched.into_iter().map(|(_, record)| record).collect()
}
