//! Tests for facet reshaping

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn parse_nodes(v: serde_json::Value) -> Vec<PivotNode> {
    serde_json::from_value(v).unwrap()
}

#[test]
fn test_flatten_emits_parent_and_leaf_rows() {
    // Exactly the two-row output for a one-branch tree of depth 2.
    let nodes = parse_nodes(json!([
        {"field": "sourceType", "value": "HDFS", "count": 5,
         "pivot": [{"field": "type", "value": "FILE", "count": 5}]}
    ]));

    let rows = flatten_pivot(&nodes, 2);
    assert_eq!(
        rows,
        vec![
            PivotRow {
                values: vec!["HDFS".to_string(), " ".to_string()],
                count: 5
            },
            PivotRow {
                values: vec!["HDFS".to_string(), "FILE".to_string()],
                count: 5
            },
        ]
    );
}

#[test]
fn test_flatten_preserves_server_order() {
    let nodes = parse_nodes(json!([
        {"value": "hive", "count": 9, "pivot": [
            {"value": "table", "count": 6},
            {"value": "view", "count": 3}
        ]},
        {"value": "hdfs", "count": 4, "pivot": [
            {"value": "file", "count": 4}
        ]}
    ]));

    let rows = flatten_pivot(&nodes, 2);
    let paths: Vec<Vec<&str>> = rows
        .iter()
        .map(|r| r.values.iter().map(String::as_str).collect())
        .collect();
    assert_eq!(
        paths,
        vec![
            vec!["hive", " "],
            vec!["hive", "table"],
            vec!["hive", "view"],
            vec!["hdfs", " "],
            vec!["hdfs", "file"],
        ]
    );
    assert_eq!(
        rows.iter().map(|r| r.count).collect::<Vec<_>>(),
        vec![9, 6, 3, 4, 4]
    );
}

#[test]
fn test_flatten_pads_shorter_branches() {
    let nodes = parse_nodes(json!([
        {"value": "a", "count": 10, "pivot": [
            {"value": "b", "count": 10, "pivot": [
                {"value": "c", "count": 10}
            ]}
        ]},
        {"value": "x", "count": 1}
    ]));

    let rows = flatten_pivot(&nodes, 3);
    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.values.len(), 3);
    }
    assert_eq!(rows[0].values, vec!["a", PAD, PAD]);
    assert_eq!(rows[2].values, vec!["a", "b", "c"]);
    assert_eq!(rows[3].values, vec!["x", PAD, PAD]);
}

#[test]
fn test_flatten_childless_node_emits_one_row() {
    let nodes = parse_nodes(json!([{"value": "solo", "count": 2}]));
    let rows = flatten_pivot(&nodes, 1);
    assert_eq!(
        rows,
        vec![PivotRow {
            values: vec!["solo".to_string()],
            count: 2
        }]
    );
}

#[test]
fn test_flatten_non_string_values() {
    let nodes = parse_nodes(json!([{"value": true, "count": 3}, {"value": 42, "count": 1}]));
    let rows = flatten_pivot(&nodes, 1);
    assert_eq!(rows[0].values, vec!["true"]);
    assert_eq!(rows[1].values, vec!["42"]);
}

#[test]
fn test_pair_counts() {
    let data = vec![json!("alpha"), json!(3), json!("beta"), json!(1)];
    let pairs = pair_counts(&data).unwrap();
    assert_eq!(
        pairs,
        vec![("alpha".to_string(), 3), ("beta".to_string(), 1)]
    );
}

#[test]
fn test_pair_counts_bad_count_is_shape_error() {
    let data = vec![json!("alpha"), json!("oops")];
    assert!(pair_counts(&data).is_err());
}

#[test]
fn test_pair_counts_empty() {
    assert!(pair_counts(&[]).unwrap().is_empty());
}
