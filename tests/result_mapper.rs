use serde_json::json;
use std::collections::HashMap;
use tablescout_core::db::open_db_in_memory;
use tablescout_core::{
    map_ids, reconcile, reconcile_lazy, search, IndexStore, SearchQuery, SqliteIndexStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    id: String,
    name: &'static str,
}

#[test]
fn map_ids_returns_ids_in_scan_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteIndexStore::new(&conn);
    index_in_order(&store, &["3", "1", "2"]);

    let results = search(&store, &SearchQuery::new("posts", "")).unwrap();

    assert_eq!(map_ids(&results), vec!["3", "1", "2"]);
}

#[test]
fn reconcile_preserves_scan_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteIndexStore::new(&conn);
    index_in_order(&store, &["3", "1", "2"]);
    let results = search(&store, &SearchQuery::new("posts", "")).unwrap();

    let candidates = HashMap::from([
        ("1".to_string(), "A"),
        ("2".to_string(), "B"),
        ("3".to_string(), "C"),
    ]);

    assert_eq!(reconcile(&results, &candidates), vec!["C", "A", "B"]);
}

#[test]
fn missing_candidates_are_omitted() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteIndexStore::new(&conn);
    index_in_order(&store, &["1", "2"]);
    let results = search(&store, &SearchQuery::new("posts", "")).unwrap();

    let candidates = HashMap::from([("1".to_string(), "A")]);

    assert_eq!(reconcile(&results, &candidates), vec!["A"]);
}

#[test]
fn empty_results_short_circuit() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteIndexStore::new(&conn);

    let results = search(&store, &SearchQuery::new("posts", "anything")).unwrap();
    let candidates = HashMap::from([("1".to_string(), "A")]);

    assert!(reconcile(&results, &candidates).is_empty());
    assert!(
        reconcile_lazy(&results, vec![Candidate { id: "1".into(), name: "A" }], |c| c
            .id
            .clone())
        .is_empty()
    );
}

#[test]
fn reconcile_lazy_resorts_by_hit_position() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteIndexStore::new(&conn);
    index_in_order(&store, &["3", "1", "2"]);
    let results = search(&store, &SearchQuery::new("posts", "")).unwrap();

    // Candidate source yields records in its own (id-sorted) order and
    // includes one record the index never matched.
    let candidates = vec![
        Candidate { id: "1".into(), name: "A" },
        Candidate { id: "2".into(), name: "B" },
        Candidate { id: "3".into(), name: "C" },
        Candidate { id: "9".into(), name: "stale" },
    ];

    let reconciled = reconcile_lazy(&results, candidates, |candidate| candidate.id.clone());
    let names: Vec<_> = reconciled.iter().map(|candidate| candidate.name).collect();

    assert_eq!(names, vec!["C", "A", "B"]);
}

fn index_in_order(store: &impl IndexStore, object_ids: &[&str]) {
    for object_id in object_ids {
        let fields = json!({"title": format!("entry {object_id}")});
        store
            .upsert("posts", object_id, fields.as_object().unwrap())
            .unwrap();
    }
}
