//! Substring search over serialized entries.
//!
//! # Responsibility
//! - Plan a structured query into a scan predicate.
//! - Execute the scan and apply the optional pagination window.
//!
//! # Invariants
//! - The free-text term matches as a raw substring anywhere in the
//!   stored entry; an empty term matches everything.
//! - Equality filters match the field's serialized `"field":value`
//!   fragment verbatim, so value formatting must line up with how the
//!   field was stored.
//! - A raw predicate replaces the whole plan, index scope included.

use crate::model::record::ObjectId;
use crate::repo::index_repo::{IndexStore, RepoError, ScanRow};
use crate::serialize::{EntrySerializer, SerializeError};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for planning and scan execution.
#[derive(Debug)]
pub enum SearchError {
    Repo(RepoError),
    Serialize(SerializeError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SerializeError> for SearchError {
    fn from(value: SerializeError) -> Self {
        Self::Serialize(value)
    }
}

/// Caller-supplied predicate that fully replaces the planned one.
pub type RawPredicate = Arc<dyn Fn(&ScanRow) -> bool + Send + Sync>;

/// Structured query built per search call.
#[derive(Clone)]
pub struct SearchQuery {
    /// Target collection.
    pub index: String,
    /// Free-text substring; empty matches every entry of the index.
    pub term: String,
    /// Exact-value filters in submission order.
    pub filters: Vec<(String, Value)>,
    /// 1-based page; values below 1 are clamped to 1. Only meaningful
    /// together with `per_page`.
    pub page: Option<u32>,
    /// Page size; `Some(0)` yields an empty window.
    pub per_page: Option<u32>,
    /// Escape hatch: overrides term, filters and index scope entirely.
    pub raw: Option<RawPredicate>,
}

impl SearchQuery {
    /// Creates a query with no filters, no pagination and no raw override.
    pub fn new(index: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            term: term.into(),
            filters: Vec::new(),
            page: None,
            per_page: None,
            raw: None,
        }
    }

    /// Adds an exact-value filter on `field`.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sets the pagination window.
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Installs a raw predicate, bypassing the planner entirely.
    pub fn with_raw(mut self, predicate: RawPredicate) -> Self {
        self.raw = Some(predicate);
        self
    }
}

impl Debug for SearchQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchQuery")
            .field("index", &self.index)
            .field("term", &self.term)
            .field("filters", &self.filters)
            .field("page", &self.page)
            .field("per_page", &self.per_page)
            .field("raw", &self.raw.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}

/// Planned predicate plus the scan scope it expects.
pub struct Plan<'q> {
    /// Index to scope the scan to; `None` for raw predicates, which see
    /// every row.
    pub scope: Option<&'q str>,
    pub predicate: Predicate<'q>,
}

pub type Predicate<'q> = Box<dyn Fn(&ScanRow) -> bool + 'q>;

/// Builds the scan predicate for a query.
///
/// With a raw predicate installed it is returned verbatim and unscoped.
/// Otherwise the plan scopes the scan to `query.index` and requires the
/// entry to contain the term and every filter fragment.
pub fn plan<'q>(
    query: &'q SearchQuery,
    serializer: &dyn EntrySerializer,
) -> SearchResult<Plan<'q>> {
    if let Some(raw) = &query.raw {
        let raw = Arc::clone(raw);
        return Ok(Plan {
            scope: None,
            predicate: Box::new(move |row| raw(row)),
        });
    }

    let mut fragments = Vec::with_capacity(query.filters.len());
    for (field, value) in &query.filters {
        fragments.push(serializer.field_fragment(field, value)?);
    }

    let term = query.term.as_str();
    Ok(Plan {
        scope: Some(query.index.as_str()),
        predicate: Box::new(move |row| {
            row.entry.contains(term)
                && fragments
                    .iter()
                    .all(|fragment| row.entry.contains(fragment.as_str()))
        }),
    })
}

/// Single hit returned by [`search`], in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub object_id: ObjectId,
    /// Stored serialized entry, handed back so callers can reconcile or
    /// inspect without a second lookup.
    pub entry: String,
}

/// Ordered hits plus the window-independent total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    total: usize,
}

impl SearchResults {
    pub(crate) fn new(hits: Vec<SearchHit>, total: usize) -> Self {
        Self { hits, total }
    }

    /// Full match count, independent of any pagination window.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Runs a query against the store.
///
/// One scan produces both the full match count and, when `per_page` is
/// set, the offset/limit window over the matched set.
pub fn search<S: IndexStore + ?Sized>(store: &S, query: &SearchQuery) -> SearchResult<SearchResults> {
    let plan = plan(query, store.serializer())?;
    let rows = store.scan(plan.scope, plan.predicate.as_ref())?;

    let total = rows.len();
    let (start, end) = page_window(total, query.page, query.per_page);
    let hits = rows
        .into_iter()
        .skip(start)
        .take(end - start)
        .map(|row| SearchHit {
            object_id: row.object_id,
            entry: row.entry,
        })
        .collect();

    Ok(SearchResults::new(hits, total))
}

/// Runs a query with an explicit pagination window.
pub fn paginate<S: IndexStore + ?Sized>(
    store: &S,
    query: &SearchQuery,
    per_page: u32,
    page: u32,
) -> SearchResult<SearchResults> {
    let windowed = query.clone().with_page(page, per_page);
    search(store, &windowed)
}

fn page_window(total: usize, page: Option<u32>, per_page: Option<u32>) -> (usize, usize) {
    let Some(per_page) = per_page else {
        return (0, total);
    };

    let per_page = per_page as usize;
    let page = page.unwrap_or(1).max(1) as usize;
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::{page_window, plan, SearchQuery};
    use crate::repo::index_repo::ScanRow;
    use crate::serialize::JsonEntrySerializer;
    use serde_json::json;
    use std::sync::Arc;

    fn row(index: &str, object_id: &str, entry: &str) -> ScanRow {
        ScanRow {
            index: index.to_string(),
            object_id: object_id.to_string(),
            entry: entry.to_string(),
        }
    }

    #[test]
    fn empty_term_matches_any_entry() {
        let query = SearchQuery::new("posts", "");
        let plan = plan(&query, &JsonEntrySerializer).unwrap();
        assert_eq!(plan.scope, Some("posts"));
        assert!((plan.predicate)(&row("posts", "1", r#"{"title":"x"}"#)));
    }

    #[test]
    fn filters_are_conjunctive() {
        let query = SearchQuery::new("posts", "")
            .with_filter("name", json!("a"))
            .with_filter("views", json!(3));
        let plan = plan(&query, &JsonEntrySerializer).unwrap();

        assert!((plan.predicate)(&row(
            "posts",
            "1",
            r#"{"name":"a","views":3}"#
        )));
        assert!(!(plan.predicate)(&row(
            "posts",
            "2",
            r#"{"name":"a","views":4}"#
        )));
    }

    #[test]
    fn quoted_filter_value_does_not_match_numeric_field() {
        let query = SearchQuery::new("posts", "").with_filter("views", json!("3"));
        let plan = plan(&query, &JsonEntrySerializer).unwrap();
        assert!(!(plan.predicate)(&row("posts", "1", r#"{"views":3}"#)));
    }

    #[test]
    fn raw_predicate_is_unscoped() {
        let query = SearchQuery::new("posts", "ignored")
            .with_raw(Arc::new(|row| row.object_id == "42"));
        let plan = plan(&query, &JsonEntrySerializer).unwrap();
        assert_eq!(plan.scope, None);
        assert!((plan.predicate)(&row("other", "42", "{}")));
        assert!(!(plan.predicate)(&row("posts", "1", "{}")));
    }

    #[test]
    fn page_window_clamps_to_total() {
        assert_eq!(page_window(5, Some(1), Some(2)), (0, 2));
        assert_eq!(page_window(5, Some(3), Some(2)), (4, 5));
        assert_eq!(page_window(5, Some(9), Some(2)), (5, 5));
    }

    #[test]
    fn page_window_without_per_page_returns_everything() {
        assert_eq!(page_window(7, Some(2), None), (0, 7));
        assert_eq!(page_window(7, None, None), (0, 7));
    }

    #[test]
    fn page_below_one_is_clamped() {
        assert_eq!(page_window(5, Some(0), Some(2)), (0, 2));
    }
}
