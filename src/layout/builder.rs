//! Staged construction of a [`CellMatrix`] from host declarations.
//!
//! The stages only make sense in one order (geometry, spans, sticky bands,
//! scrollable remainder), so they are private and driven by [`CellMatrixBuilder::build`].

use std::collections::HashMap;

use super::matrix::{
    CellMatrix, SpanInfo, StickyCounts, StickyRanges, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT,
    MIN_COLUMN_WIDTH,
};
use super::{GridColumn, GridRow, Range};
use crate::error::{GridError, Result};
use crate::types::{Column, Row};

/// Builder for [`CellMatrix`].
#[derive(Debug, Clone)]
pub struct CellMatrixBuilder {
    rows: Vec<Row>,
    columns: Vec<Column>,
    sticky: StickyCounts,
    min_column_width: f32,
}

/// Where the three panes of one axis begin: `[0, lead_end)` is the leading
/// sticky band, `[trail_start, len)` the trailing one.
#[derive(Debug, Clone, Copy)]
struct PaneBounds {
    lead_end: usize,
    trail_start: usize,
}

impl PaneBounds {
    /// A trailing band that cannot fit next to the leading one is ignored.
    fn new(len: usize, lead: usize, trail: usize) -> Self {
        let lead_end = lead.min(len);
        let trail_start = if lead.saturating_add(trail) > len {
            len
        } else {
            len - trail
        };
        Self {
            lead_end,
            trail_start,
        }
    }

    fn starts_pane(self, idx: usize) -> bool {
        idx == 0 || idx == self.lead_end || idx == self.trail_start
    }
}

impl CellMatrixBuilder {
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        Self {
            rows,
            columns,
            sticky: StickyCounts::default(),
            min_column_width: MIN_COLUMN_WIDTH,
        }
    }

    #[must_use]
    pub fn sticky(mut self, sticky: StickyCounts) -> Self {
        self.sticky = sticky;
        self
    }

    #[must_use]
    pub fn min_column_width(mut self, min_column_width: f32) -> Self {
        self.min_column_width = min_column_width;
        self
    }

    /// Validate the declarations and run every stage.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for rows whose cell count differs from the
    /// column count or for duplicate ids, and [`GridError::MissingCellType`]
    /// for cells without a type.
    pub fn build(self) -> Result<CellMatrix> {
        self.validate()?;
        let row_bounds = PaneBounds::new(self.rows.len(), self.sticky.top, self.sticky.bottom);
        let col_bounds = PaneBounds::new(self.columns.len(), self.sticky.left, self.sticky.right);

        let mut matrix = CellMatrix {
            rows: Vec::with_capacity(self.rows.len()),
            columns: Vec::with_capacity(self.columns.len()),
            width: 0.0,
            height: 0.0,
            ranges: StickyRanges::default(),
            scrollable_range: Range::default(),
            row_indexes: HashMap::with_capacity(self.rows.len()),
            column_indexes: HashMap::with_capacity(self.columns.len()),
            span_lookup: HashMap::new(),
            source_rows: self.rows,
            source_columns: self.columns,
            sticky: self.sticky,
            min_column_width: self.min_column_width,
        };

        fill_rows_and_cols(&mut matrix, row_bounds, col_bounds);
        set_ranges_to_render_lookup(&mut matrix);
        fill_sticky(&mut matrix, row_bounds, col_bounds);
        fill_scrollable_range(&mut matrix, row_bounds, col_bounds);

        tracing::debug!(
            rows = matrix.rows.len(),
            columns = matrix.columns.len(),
            spans = matrix.span_lookup.len(),
            "built cell matrix"
        );
        Ok(matrix)
    }

    fn validate(&self) -> Result<()> {
        let mut seen_columns = HashMap::with_capacity(self.columns.len());
        for column in &self.columns {
            if seen_columns.insert(&column.column_id, ()).is_some() {
                return Err(GridError::Config(format!(
                    "duplicate column id '{}'",
                    column.column_id
                )));
            }
        }
        let mut seen_rows = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            if seen_rows.insert(&row.row_id, ()).is_some() {
                return Err(GridError::Config(format!(
                    "duplicate row id '{}'",
                    row.row_id
                )));
            }
            if row.cells.len() != self.columns.len() {
                return Err(GridError::Config(format!(
                    "row '{}' has {} cells but there are {} columns",
                    row.row_id,
                    row.cells.len(),
                    self.columns.len()
                )));
            }
            for (cell, column) in row.cells.iter().zip(&self.columns) {
                if cell.cell_type.is_empty() {
                    return Err(GridError::MissingCellType {
                        row_id: row.row_id.to_string(),
                        column_id: column.column_id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Assign indexes and pane-relative offsets; populate id lookups.
fn fill_rows_and_cols(matrix: &mut CellMatrix, rows: PaneBounds, cols: PaneBounds) {
    let mut top = 0.0_f32;
    for (idx, row) in matrix.source_rows.iter().enumerate() {
        if rows.starts_pane(idx) {
            top = 0.0;
        }
        let height = row.height.unwrap_or(DEFAULT_ROW_HEIGHT);
        matrix.rows.push(GridRow {
            idx,
            row_id: row.row_id.clone(),
            top,
            height,
            bottom: top + height,
            reorderable: row.reorderable,
        });
        matrix.row_indexes.insert(row.row_id.clone(), idx);
        matrix.height += height;
        top += height;
    }

    let mut left = 0.0_f32;
    for (idx, column) in matrix.source_columns.iter().enumerate() {
        if cols.starts_pane(idx) {
            left = 0.0;
        }
        let width = column
            .width
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
            .max(matrix.min_column_width);
        matrix.columns.push(GridColumn {
            idx,
            column_id: column.column_id.clone(),
            left,
            width,
            right: left + width,
            resizable: column.resizable,
            reorderable: column.reorderable,
        });
        matrix.column_indexes.insert(column.column_id.clone(), idx);
        matrix.width += width;
        left += width;
    }
}

/// Record every multi-slot span. Slots already claimed by an earlier span
/// keep their first owner.
fn set_ranges_to_render_lookup(matrix: &mut CellMatrix) {
    let row_count = matrix.rows.len();
    let col_count = matrix.columns.len();
    for (r, row) in matrix.source_rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            let row_span = cell.row_span().min(row_count - r);
            let col_span = cell.col_span().min(col_count - c);
            if row_span == 1 && col_span == 1 {
                continue;
            }
            if matrix.span_lookup.contains_key(&(c, r)) {
                tracing::warn!(
                    row_id = %row.row_id,
                    column = c,
                    "span origin is covered by another span, ignoring"
                );
                continue;
            }
            for rr in r..r + row_span {
                for cc in c..c + col_span {
                    matrix.span_lookup.entry((cc, rr)).or_insert(SpanInfo {
                        is_origin: rr == r && cc == c,
                        origin_row: r,
                        origin_column: c,
                        row_span,
                        col_span,
                    });
                }
            }
        }
    }
}

fn fill_sticky(matrix: &mut CellMatrix, rows: PaneBounds, cols: PaneBounds) {
    let all_rows = matrix.rows.clone();
    let all_cols = matrix.columns.clone();
    matrix.ranges = StickyRanges {
        top: Range::new(
            matrix.rows.get(..rows.lead_end).unwrap_or_default().to_vec(),
            all_cols.clone(),
        ),
        bottom: Range::new(
            matrix.rows.get(rows.trail_start..).unwrap_or_default().to_vec(),
            all_cols,
        ),
        left: Range::new(
            all_rows.clone(),
            matrix.columns.get(..cols.lead_end).unwrap_or_default().to_vec(),
        ),
        right: Range::new(
            all_rows,
            matrix.columns.get(cols.trail_start..).unwrap_or_default().to_vec(),
        ),
    };
}

fn fill_scrollable_range(matrix: &mut CellMatrix, rows: PaneBounds, cols: PaneBounds) {
    matrix.scrollable_range = Range::new(
        matrix
            .rows
            .get(rows.lead_end..rows.trail_start)
            .unwrap_or_default()
            .to_vec(),
        matrix
            .columns
            .get(cols.lead_end..cols.trail_start)
            .unwrap_or_default()
            .to_vec(),
    );
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn decl(rows: usize, cols: usize) -> (Vec<Row>, Vec<Column>) {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}"))).collect();
        let rows = (0..rows)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text("x"); cols]))
            .collect();
        (rows, columns)
    }

    #[test]
    fn test_pane_offsets_restart_at_zero() {
        let (rows, columns) = decl(6, 2);
        let m = CellMatrixBuilder::new(rows, columns)
            .sticky(StickyCounts {
                top: 2,
                bottom: 1,
                ..StickyCounts::default()
            })
            .build()
            .unwrap();
        let tops: Vec<f32> = m.rows.iter().map(|r| r.top).collect();
        assert_eq!(tops, vec![0.0, 25.0, 0.0, 25.0, 50.0, 0.0]);
        assert_eq!(m.height, 150.0);
    }

    #[test]
    fn test_width_floor_and_default() {
        let (rows, mut columns) = decl(1, 3);
        columns[0].width = Some(10.0);
        columns[1].width = Some(90.0);
        let m = CellMatrixBuilder::new(rows, columns).build().unwrap();
        assert_eq!(m.columns[0].width, MIN_COLUMN_WIDTH);
        assert_eq!(m.columns[1].width, 90.0);
        assert_eq!(m.columns[2].width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(m.columns[2].left, 130.0);
    }

    #[test]
    fn test_ragged_row_is_config_error() {
        let (mut rows, columns) = decl(2, 3);
        rows[1].cells.pop();
        let err = CellMatrixBuilder::new(rows, columns).build().unwrap_err();
        assert!(matches!(err, GridError::Config(ref msg) if msg.contains("'r1'")));
    }

    #[test]
    fn test_missing_type_is_reported_with_ids() {
        let (mut rows, columns) = decl(1, 2);
        rows[0].cells[1].cell_type.clear();
        let err = CellMatrixBuilder::new(rows, columns).build().unwrap_err();
        assert!(matches!(
            err,
            GridError::MissingCellType { ref row_id, ref column_id } if row_id == "r0" && column_id == "c1"
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let (mut rows, columns) = decl(2, 1);
        rows[1].row_id = rows[0].row_id.clone();
        assert!(CellMatrixBuilder::new(rows, columns).build().is_err());
    }

    #[test]
    fn test_span_clipped_to_matrix() {
        let (mut rows, columns) = decl(3, 3);
        rows[2].cells[2] = Cell::text("big").with_span(5, 5);
        let m = CellMatrixBuilder::new(rows, columns).build().unwrap();
        assert!(m.span_lookup.is_empty());
    }
}
