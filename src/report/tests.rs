//! Tests for report tables and bucket derivation

use super::analyzer::{deletion_age_buckets, field_str, file_system_path, range_label};
use super::table::{ColumnGroup, Table};
use crate::types::Cell;
use pretty_assertions::assert_eq;
use serde_json::json;

const DAY: i64 = 86_400_000;

#[test]
fn test_buckets_cover_full_range() {
    // Three years of deletions: all six range buckets appear.
    let max = 1_700_000_000_000;
    let min = max - 3 * 365 * DAY;
    let buckets = deletion_age_buckets(min, max);

    assert_eq!(buckets.len(), 6);
    assert_eq!(buckets[0].label, "1 day");
    assert_eq!(buckets[0].upper, max);
    assert_eq!(buckets[0].lower, max - DAY);
    assert_eq!(buckets[5].label, "2 years");
    assert_eq!(buckets[5].lower, max - 730 * DAY);
}

#[test]
fn test_buckets_boundaries_monotonically_decreasing() {
    let max = 1_700_000_000_000;
    let min = max - 1000 * DAY;
    let buckets = deletion_age_buckets(min, max);

    for pair in buckets.windows(2) {
        assert!(pair[1].upper < pair[0].upper);
        assert!(pair[1].lower < pair[0].lower);
        // Adjacent buckets share a boundary exactly: (l, u] tiling.
        assert_eq!(pair[1].upper, pair[0].lower);
    }
}

#[test]
fn test_buckets_lower_bound_never_below_minimum() {
    // Minimum sits inside the "1 month" bucket; the loop stops there.
    let max = 1_700_000_000_000;
    let min = max - 20 * DAY;
    let buckets = deletion_age_buckets(min, max);

    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[2].label, "1 month");
    assert_eq!(buckets[2].lower, min);
    for bucket in &buckets {
        assert!(bucket.lower >= min);
    }
}

#[test]
fn test_buckets_boundaries_are_exact_day_multiples() {
    let max = 1_700_000_000_000;
    let min = max - 1000 * DAY;
    for bucket in deletion_age_buckets(min, max) {
        assert_eq!((max - bucket.upper) % DAY, 0);
        if bucket.lower != min {
            assert_eq!((max - bucket.lower) % DAY, 0);
        }
    }
}

#[test]
fn test_buckets_degenerate_range() {
    // Everything deleted at the same instant: one empty range bucket,
    // the catch-all (<= min) picks the documents up.
    let ts = 1_700_000_000_000;
    let buckets = deletion_age_buckets(ts, ts);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].lower, ts);
    assert_eq!(buckets[0].upper, ts);
}

#[test]
fn test_table_push_and_lookup() {
    let mut table = Table::new(vec!["stats".to_string()], vec!["size".to_string()]);
    table.push_row(vec!["max".to_string()], vec![Cell::Int(10)]);
    table.push_row(vec!["sum".to_string()], vec![Cell::Int(99)]);

    assert_eq!(table.width(), 1);
    assert!(!table.is_grouped());
    let row = table.row(&["sum".to_string()]).unwrap();
    assert_eq!(row.cells, vec![Cell::Int(99)]);
}

#[test]
fn test_merge_side_by_side() {
    let mut t1 = Table::new(vec!["Date Range".to_string()], vec!["Deleted".to_string()]);
    t1.push_row(vec!["1 day".to_string()], vec![Cell::Int(5)]);
    t1.push_row(vec!["1 week".to_string()], vec![Cell::Int(9)]);

    let mut t2 = Table::new(vec!["Date Range".to_string()], vec!["Deleted".to_string()]);
    t2.push_row(vec!["1 day".to_string()], vec![Cell::Int(2)]);
    t2.push_row(vec!["1 month".to_string()], vec![Cell::Int(7)]);

    let merged = Table::merge(vec![
        ("customer1".to_string(), t1),
        ("customer2".to_string(), t2),
    ]);

    assert!(merged.is_grouped());
    assert_eq!(
        merged.groups,
        vec![
            ColumnGroup {
                name: "customer1".to_string(),
                columns: vec!["Deleted".to_string()]
            },
            ColumnGroup {
                name: "customer2".to_string(),
                columns: vec!["Deleted".to_string()]
            },
        ]
    );

    // Union of row keys in first-seen order.
    let keys: Vec<&str> = merged.rows.iter().map(|r| r.key[0].as_str()).collect();
    assert_eq!(keys, vec!["1 day", "1 week", "1 month"]);

    // Rows missing from one deployment get empty cells.
    let week = merged.row(&["1 week".to_string()]).unwrap();
    assert_eq!(week.cells, vec![Cell::Int(9), Cell::Empty]);
    let month = merged.row(&["1 month".to_string()]).unwrap();
    assert_eq!(month.cells, vec![Cell::Empty, Cell::Int(7)]);
}

#[test]
fn test_merge_multi_column_tables() {
    let mut t1 = Table::new(
        vec!["stats".to_string()],
        vec!["nav_elements".to_string(), "nav_relations".to_string()],
    );
    t1.push_row(
        vec!["numDocs".to_string()],
        vec![Cell::Int(100), Cell::Int(40)],
    );

    let mut t2 = Table::new(
        vec!["stats".to_string()],
        vec!["nav_elements".to_string(), "nav_relations".to_string()],
    );
    t2.push_row(
        vec!["numDocs".to_string()],
        vec![Cell::Int(7), Cell::Int(3)],
    );

    let merged = Table::merge(vec![("a".to_string(), t1), ("b".to_string(), t2)]);
    assert_eq!(merged.width(), 4);
    assert_eq!(
        merged.rows[0].cells,
        vec![Cell::Int(100), Cell::Int(40), Cell::Int(7), Cell::Int(3)]
    );
}

#[test]
fn test_field_str_variants() {
    let doc: crate::types::Document = serde_json::from_value(json!({
        "parentPath": "/default",
        "tags": ["a", "b"],
        "size": 42
    }))
    .unwrap();

    assert_eq!(field_str(&doc, "parentPath").unwrap(), "/default");
    assert_eq!(field_str(&doc, "tags").unwrap(), "a");
    assert_eq!(field_str(&doc, "size").unwrap(), "42");
    assert!(field_str(&doc, "missing").is_err());
}

#[test]
fn test_range_label_renders_calendar_dates() {
    assert_eq!(range_label("2025-07-01T00:00:00Z"), "2025-07-01");
    assert_eq!(range_label("not a date"), "not a date");
}

#[test]
fn test_file_system_path_strips_authority() {
    assert_eq!(
        file_system_path("hdfs://Enchilada/user/hive/warehouse").unwrap(),
        "/user/hive/warehouse"
    );
    assert!(file_system_path("file:///tmp/x").is_err());
}
