//! Integration tests covering ranking, capping and grouping of query results.
#![allow(clippy::tests_outside_test_module)]

mod utils;

use std::collections::HashSet;

use libsymdex::{GroupBy, SearchOptions, load_json_str, normalize};
use pretty_assertions::assert_eq;
use utils::{exiv2_index, labels};

#[test]
fn prefix_results_are_lexicographic_without_exact_match() {
    let index = load_json_str(
        r#"[
            ["getdouble_4", ["getDouble", [["ns.html#getdouble", "Exiv2"]]]],
            ["getb_1", ["getb", [["basicio.html#getb", "Exiv2::BasicIo"]]]],
            ["getdate_3", ["getDate", [["datevalue.html#getdate", "Exiv2::DateValue"]]]],
            ["getboolean_2", ["GetBoolean", [["inireader.html#getboolean", "Exiv2::INIReader"]]]]
        ]"#,
    )
    .unwrap();
    let options = SearchOptions::new().with_group_by_scope(false);

    let response = index.search("get", &options);
    assert_eq!(
        labels(&response),
        vec!["getb", "GetBoolean", "getDate", "getDouble"]
    );

    let response = index.search("getb", &options);
    assert_eq!(labels(&response), vec!["getb", "GetBoolean"]);
}

#[test]
fn exact_match_ranks_above_longer_keys() {
    let index = exiv2_index();
    let options = SearchOptions::new().with_group_by(GroupBy::None);
    let response = index.search("GET", &options);
    assert_eq!(
        labels(&response),
        vec![
            "Get",
            "getb",
            "GetBoolean",
            "getDate",
            "getDouble",
            "getType",
            "getType< double >"
        ]
    );
}

#[test]
fn overloads_keep_their_insertion_order() {
    let index = exiv2_index();
    let response = index.search("gettype", &SearchOptions::default());
    let entry = response
        .entries()
        .find(|entry| entry.label == "getType")
        .expect("getType result");
    let references: Vec<&str> = entry
        .occurrences
        .iter()
        .map(|occurrence| occurrence.reference.as_str())
        .collect();
    assert_eq!(
        references,
        vec![
            "../classExiv2_1_1ImageFactory.html#a9338",
            "../classExiv2_1_1ImageFactory.html#a5b0f",
            "../classExiv2_1_1ImageFactory.html#abd5d",
        ]
    );
    assert_eq!(response.entries().filter(|e| e.label == "getType").count(), 1);
}

#[test]
fn longer_queries_narrow_the_candidate_set() {
    let index = exiv2_index();
    let typed = "groupname";
    let mut previous: Option<HashSet<String>> = None;
    for end in 1..=typed.len() {
        let query = normalize(&typed[..end]).unwrap();
        let candidates: HashSet<String> = index
            .prefix_scan(&query)
            .map(|entry| entry.id.clone())
            .collect();
        if let Some(previous) = &previous {
            assert!(
                candidates.is_subset(previous),
                "{query} widened the candidate set"
            );
        }
        previous = Some(candidates);
    }
    assert_eq!(previous.map(|set| set.len()), Some(1));
}

#[test]
fn identical_queries_yield_identical_output() {
    let index = exiv2_index();
    let options = SearchOptions::default();
    assert_eq!(index.search("ge", &options), index.search("ge", &options));
    assert_eq!(index.search("  GE ", &options), index.search("ge", &options));
}

#[test]
fn whitespace_input_is_an_empty_result() {
    let index = exiv2_index();
    for raw in ["", " ", "\t\n", "()"] {
        let response = index.search(raw, &SearchOptions::default());
        assert!(response.is_empty(), "{raw:?} returned results");
        assert!(!response.has_more);
    }
}

#[test]
fn cap_is_respected_for_every_prefix() {
    let index = exiv2_index();
    for prefix in ["g", "ge", "get", "getb", "go", "gr", "x"] {
        let query = normalize(prefix).unwrap();
        let available = index.prefix_scan(&query).count();
        for cap in 0..=available + 1 {
            let options = SearchOptions::new().with_max_results(cap);
            let response = index.search(prefix, &options);
            assert!(response.total <= cap);
            assert_eq!(response.total, available.min(cap));
            assert_eq!(
                response.has_more,
                available > cap,
                "prefix {prefix:?} cap {cap}"
            );
        }
    }
}

#[test]
fn groups_follow_first_occurrence_scope() {
    let index = exiv2_index();
    let response = index.search("go", &SearchOptions::default());
    let groups: Vec<(&str, Vec<&str>)> = response
        .groups
        .iter()
        .map(|group| {
            (
                group.scope_label.as_str(),
                group.entries.iter().map(|e| e.label.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        groups,
        vec![
            ("Exiv2::Internal::TiffVisitor", vec!["go"]),
            ("Exiv2::Image", vec!["good"]),
        ]
    );
}

#[test]
fn shared_labels_stay_distinct_entries() {
    let index = load_json_str(
        r#"[
            ["size_1", ["size", [["a.html#size", "Exiv2::DataBuf"]]]],
            ["size_2", ["size", [["b.html#size", "Exiv2::Value"]]]]
        ]"#,
    )
    .unwrap();
    let response = index.search("size", &SearchOptions::new().with_group_by_scope(false));
    assert_eq!(response.total, 2);
    assert_eq!(labels(&response), vec!["size", "size"]);
    let scopes: Vec<&str> = response
        .entries()
        .map(|entry| entry.occurrences[0].scope_label.as_str())
        .collect();
    assert_eq!(scopes, vec!["Exiv2::DataBuf", "Exiv2::Value"]);
}

#[test]
fn large_index_terminates_early_at_the_cap() {
    let payload: Vec<serde_json::Value> = (0..20_000)
        .map(|i| {
            serde_json::json!([
                format!("symbol{i:05}_{i}"),
                [format!("symbol{i:05}"), [[format!("s.html#{i}"), "Scope"]]]
            ])
        })
        .collect();
    let index = load_json_str(&serde_json::to_string(&payload).unwrap()).unwrap();
    assert_eq!(index.len(), 20_000);

    let response = index.search("symbol1", &SearchOptions::default());
    assert_eq!(response.total, 50);
    assert!(response.has_more);
    assert_eq!(
        response.entries().next().map(|entry| entry.label.as_str()),
        Some("symbol10000")
    );
}
