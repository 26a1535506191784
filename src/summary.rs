//! A serializable digest of a derived layout, for the CLI and JS callers
//! that only need geometry.

use serde::{Deserialize, Serialize};

use crate::config::GridProps;
use crate::error::Result;
use crate::grid::Grid;
use crate::layout::{Range, Viewport};
use crate::state::GridState;

/// Index span and pixel size of one band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSummary {
    /// Inclusive `[first, last]` row or column index; `None` when empty
    pub indexes: Option<[usize; 2]>,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanSummary {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub col_span: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSummary {
    pub rows: usize,
    pub columns: usize,
    pub width: f32,
    pub height: f32,
    pub sticky_top: BandSummary,
    pub sticky_bottom: BandSummary,
    pub sticky_left: BandSummary,
    pub sticky_right: BandSummary,
    pub visible_rows: BandSummary,
    pub visible_columns: BandSummary,
    pub spans: Vec<SpanSummary>,
}

/// Viewport measurements accepted from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSpec {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub scroll_x: f32,
    #[serde(default)]
    pub scroll_y: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// The CLI / wasm input: a grid declaration plus an optional viewport.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(flatten)]
    pub props: GridProps,
    #[serde(default)]
    pub viewport: ViewportSpec,
}

impl LayoutSummary {
    pub fn of(state: &GridState) -> Self {
        let matrix = &state.matrix;
        let ranges = &matrix.ranges;
        let mut spans = Vec::new();
        for row in 0..matrix.rows.len() {
            for column in 0..matrix.columns.len() {
                if let Some(info) = matrix.span_info(row, column) {
                    if info.is_origin && (info.row_span > 1 || info.col_span > 1) {
                        spans.push(SpanSummary {
                            row,
                            column,
                            row_span: info.row_span,
                            col_span: info.col_span,
                        });
                    }
                }
            }
        }
        Self {
            rows: matrix.rows.len(),
            columns: matrix.columns.len(),
            width: matrix.width,
            height: matrix.height,
            sticky_top: row_band(&ranges.top),
            sticky_bottom: row_band(&ranges.bottom),
            sticky_left: column_band(&ranges.left),
            sticky_right: column_band(&ranges.right),
            visible_rows: row_band(&state.visible_range),
            visible_columns: column_band(&state.visible_range),
            spans,
        }
    }
}

fn row_band(range: &Range) -> BandSummary {
    BandSummary {
        indexes: range.first_row().zip(range.last_row()).map(|(a, b)| [a.idx, b.idx]),
        size: range.height(),
    }
}

fn column_band(range: &Range) -> BandSummary {
    BandSummary {
        indexes: range.first_column().zip(range.last_column()).map(|(a, b)| [a.idx, b.idx]),
        size: range.width(),
    }
}

/// Derive the layout of `request` without a host.
///
/// # Errors
/// Configuration errors from the declaration.
pub fn layout(request: LayoutRequest) -> Result<LayoutSummary> {
    let spec = request.viewport;
    let mut viewport = Viewport::new(spec.width, spec.height);
    viewport.scroll_to(spec.scroll_x, spec.scroll_y);
    let grid = Grid::new(request.props, (), viewport)?;
    Ok(LayoutSummary::of(grid.state()))
}

/// [`layout`] from JSON text.
///
/// # Errors
/// Malformed JSON or configuration errors.
pub fn layout_json(json: &str) -> Result<LayoutSummary> {
    let request: LayoutRequest = serde_json::from_str(json)?;
    layout(request)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_json() {
        let json = r#"{
            "columns": [{"columnId": "a", "width": 80}, {"columnId": "b"}, {"columnId": "c"}],
            "rows": [
                {"rowId": "h", "cells": [{"type": "header", "text": "A"}, {"type": "header", "text": "B"}, {"type": "header", "text": "C"}]},
                {"rowId": 1, "cells": [{"type": "text", "text": "x", "colspan": 2}, {"type": "text"}, {"type": "number", "value": 3}]}
            ],
            "stickyTopRows": 1,
            "viewport": {"width": 400, "height": 300}
        }"#;
        let summary = layout_json(json).unwrap();
        assert_eq!((summary.rows, summary.columns), (2, 3));
        assert_eq!(summary.sticky_top.indexes, Some([0, 0]));
        assert_eq!(summary.sticky_bottom.indexes, None);
        assert_eq!(summary.spans, vec![SpanSummary { row: 1, column: 0, row_span: 1, col_span: 2 }]);
        assert_eq!(summary.visible_rows.indexes, Some([1, 1]));
    }

    #[test]
    fn test_missing_template_is_reported() {
        let json = r#"{"columns": [{"columnId": "a"}], "rows": [{"rowId": "r", "cells": [{"type": "chart"}]}]}"#;
        assert!(layout_json(json).is_err());
    }
}
