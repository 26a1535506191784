//! Layout summaries derived from JSON declarations.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::fs;

use cellgrid::summary::{layout_json, SpanSummary};
use cellgrid::GridProps;

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{name}")).expect("Failed to read fixture")
}

#[test]
fn test_frozen_panes_fixture() {
    let summary = layout_json(&fixture("frozen_panes.json")).unwrap();

    assert_eq!((summary.rows, summary.columns), (4, 5));
    // 60 + 200 + 150 + 150 + 120
    assert_eq!(summary.width, 680.0);
    assert_eq!(summary.height, 100.0);
    assert_eq!(summary.sticky_top.indexes, Some([0, 0]));
    assert_eq!(summary.sticky_bottom.indexes, Some([3, 3]));
    assert_eq!(summary.sticky_left.indexes, Some([0, 0]));
    assert_eq!(summary.sticky_right.indexes, Some([4, 4]));
    assert_eq!(summary.sticky_right.size, 120.0);
    assert_eq!(summary.visible_rows.indexes, Some([1, 2]));
    assert_eq!(summary.visible_columns.indexes, Some([1, 3]));
    assert_eq!(
        summary.spans,
        vec![SpanSummary {
            row: 1,
            column: 1,
            row_span: 1,
            col_span: 2
        }]
    );
}

#[test]
fn test_summary_serializes_camel_case() {
    let summary = layout_json(&fixture("frozen_panes.json")).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["stickyTop"]["indexes"], serde_json::json!([0, 0]));
    assert_eq!(json["spans"][0]["colSpan"], 2);
}

#[test]
fn test_ragged_rows_are_rejected() {
    let json = r#"{"columns": [{"columnId": "a"}, {"columnId": "b"}],
                  "rows": [{"rowId": "r", "cells": [{"type": "text", "text": "x"}]}]}"#;
    let err = layout_json(json).unwrap_err();
    assert!(err.to_string().contains("1 cells but there are 2 columns"));
}

#[test]
fn test_props_from_json_defaults() {
    let props = GridProps::from_json(r#"{"columns": [], "rows": []}"#).unwrap();
    assert_eq!(props.sticky_top_rows, 0);
    assert!(!props.enable_fill_handle);
    assert_eq!(props.horizontal_sticky_breakpoint, 50.0);
}
