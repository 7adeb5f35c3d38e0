use std::collections::HashSet;

use pretty_assertions::assert_eq;
use proptest::collection::vec;
use proptest::prelude::*;
use serde_json::{json, Value};
use sitesearch_core::{normalize, ResultSet};

fn contents(set: &ResultSet) -> Vec<&str> {
    set.iter().map(|result| result.content.as_str()).collect()
}

fn as_raw(set: &ResultSet) -> Vec<Value> {
    set.iter()
        .map(|result| serde_json::to_value(result).unwrap())
        .collect()
}

#[test]
fn normalizing_twice_drops_nothing_more() {
    let raw = vec![
        json!({ "content": "a", "match_score": 90, "html": "<p>a</p>", "path": "/a" }),
        json!({ "content": "b", "match_score": 80, "html": "<p>b</p>", "path": "/b" }),
        json!({ "content": "a", "match_score": 70, "html": "<p>a2</p>", "path": "/a2" }),
        json!(null),
        json!({ "content": "" }),
        json!({ "content": "c", "match_score": 60.5 }),
        json!({ "content": "b" }),
    ];

    let once = normalize(raw);
    let twice = normalize(as_raw(&once));

    assert_eq!(contents(&once), vec!["a", "b", "c"]);
    assert_eq!(once, twice);
}

#[test]
fn distinct_contents_keep_backend_order() {
    let raw: Vec<Value> = ["zeta", "alpha", "mid", "beta"]
        .iter()
        .enumerate()
        .map(|(i, content)| json!({ "content": content, "match_score": i }))
        .collect();

    let set = normalize(raw);
    assert_eq!(contents(&set), vec!["zeta", "alpha", "mid", "beta"]);
}

#[test]
fn first_occurrence_wins() {
    let set = normalize(vec![
        json!({ "content": "a", "x": 1, "match_score": 10, "path": "first" }),
        json!({ "content": "a", "x": 2, "match_score": 99, "path": "second" }),
    ]);

    assert_eq!(set.len(), 1);
    let kept = set.get(0).unwrap();
    assert_eq!(kept.content, "a");
    assert_eq!(kept.match_score, 10.0);
    assert_eq!(kept.path, "first");
}

#[test]
fn empty_content_is_excluded() {
    let set = normalize(vec![json!({ "content": "" }), json!({ "content": "b" })]);
    assert_eq!(contents(&set), vec!["b"]);
}

#[test]
fn missing_content_is_excluded() {
    let set = normalize(vec![
        json!({ "match_score": 50, "html": "<p>x</p>" }),
        json!({ "content": null }),
        json!({ "content": "kept" }),
    ]);
    assert_eq!(contents(&set), vec!["kept"]);
}

#[test]
fn empty_input_is_empty_set() {
    let set = normalize(Vec::<Value>::new());
    assert!(set.is_empty());
}

/// Droppable entries mixed with valid ones from a small content pool, so duplicates are common.
fn raw_entry() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!({ "content": "" })),
        Just(json!({ "match_score": 1, "html": "<p>orphan</p>" })),
        any::<i64>().prop_map(|n| json!(n)),
        (0u8..6, 0u32..100).prop_map(|(content, score)| json!({
            "content": format!("c{content}"),
            "match_score": score,
            "html": format!("<p>{score}</p>"),
            "path": format!("/{score}"),
        })),
    ]
}

fn raw_content(entry: &Value) -> Option<&str> {
    entry
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in vec(raw_entry(), 0..40)) {
        let once = normalize(raw);
        let twice = normalize(as_raw(&once));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn kept_results_are_first_occurrences_in_input_order(raw in vec(raw_entry(), 0..40)) {
        let set = normalize(raw.clone());

        let mut last_index = None;
        for kept in &set {
            let index = raw
                .iter()
                .position(|entry| raw_content(entry) == Some(kept.content.as_str()));
            prop_assert!(index.is_some(), "{} not in input", kept.content);
            let index = index.unwrap();
            prop_assert!(last_index.map_or(true, |last| index > last));
            last_index = Some(index);

            let first = &raw[index];
            prop_assert_eq!(first["match_score"].as_f64(), Some(kept.match_score));
            prop_assert_eq!(first["path"].as_str(), Some(kept.path.as_str()));
        }

        let expected: HashSet<&str> = raw.iter().filter_map(raw_content).collect();
        let kept: HashSet<&str> = contents(&set).into_iter().collect();
        prop_assert_eq!(kept, expected);
    }
}
