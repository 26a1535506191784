//! The cell matrix: positioned rows/columns, sticky panes and span lookup.
//!
//! A matrix is never patched in place. Structural changes (new props,
//! auto-extension on paste) produce a fresh matrix through
//! [`CellMatrixBuilder`](super::CellMatrixBuilder).

use std::collections::HashMap;

use super::{CellMatrixBuilder, GridColumn, GridRow, Location, Range};
use crate::error::{GridError, Result};
use crate::types::{Cell, Column, Id, Row};

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 25.0;

/// Default column width in pixels
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// Narrowest a column may be declared or resized to
pub const MIN_COLUMN_WIDTH: f32 = 40.0;

/// Requested number of pinned rows/columns per edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickyCounts {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

/// The four pinned bands. Top/bottom span all columns; left/right span all rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickyRanges {
    pub top: Range,
    pub bottom: Range,
    pub left: Range,
    pub right: Range,
}

/// Span membership of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanInfo {
    /// True if this slot is the top-left origin of the span
    pub is_origin: bool,
    pub origin_row: usize,
    pub origin_column: usize,
    pub row_span: usize,
    pub col_span: usize,
}

/// Pre-computed grid geometry.
#[derive(Debug, Clone, Default)]
pub struct CellMatrix {
    pub rows: Vec<GridRow>,
    pub columns: Vec<GridColumn>,
    /// Sum of all column widths
    pub width: f32,
    /// Sum of all row heights
    pub height: f32,
    pub ranges: StickyRanges,
    pub scrollable_range: Range,
    pub(crate) row_indexes: HashMap<Id, usize>,
    pub(crate) column_indexes: HashMap<Id, usize>,
    /// Multi-slot spans keyed by `(column, row)`; 1×1 cells are absent
    pub(crate) span_lookup: HashMap<(usize, usize), SpanInfo>,
    pub(crate) source_rows: Vec<Row>,
    pub(crate) source_columns: Vec<Column>,
    pub(crate) sticky: StickyCounts,
    pub(crate) min_column_width: f32,
}

impl CellMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Top-left corner.
    pub fn first(&self) -> Option<Location> {
        self.get_location(0, 0)
    }

    /// Bottom-right corner.
    pub fn last(&self) -> Option<Location> {
        self.get_location(self.rows.len().checked_sub(1)?, self.columns.len().checked_sub(1)?)
    }

    pub fn row(&self, idx: usize) -> Option<&GridRow> {
        self.rows.get(idx)
    }

    pub fn column(&self, idx: usize) -> Option<&GridColumn> {
        self.columns.get(idx)
    }

    pub fn row_idx(&self, row_id: &Id) -> Option<usize> {
        self.row_indexes.get(row_id).copied()
    }

    pub fn column_idx(&self, column_id: &Id) -> Option<usize> {
        self.column_indexes.get(column_id).copied()
    }

    pub fn sticky_counts(&self) -> StickyCounts {
        self.sticky
    }

    pub fn min_column_width(&self) -> f32 {
        self.min_column_width
    }

    /// The declarations this matrix was built from.
    pub fn source_rows(&self) -> &[Row] {
        &self.source_rows
    }

    pub fn source_columns(&self) -> &[Column] {
        &self.source_columns
    }

    /// The rectangle spanned by two corners, in any order.
    pub fn get_range(&self, start: &Location, end: &Location) -> Range {
        let (r0, r1) = ordered(start.row.idx, end.row.idx);
        let (c0, c1) = ordered(start.column.idx, end.column.idx);
        let rows = self.rows.get(r0..=r1).unwrap_or_default().to_vec();
        let columns = self.columns.get(c0..=c1).unwrap_or_default().to_vec();
        Range::new(rows, columns)
    }

    /// Whole rows between two indexes, across every column.
    pub fn row_band(&self, from: usize, to: usize) -> Range {
        let (r0, r1) = ordered(from, to);
        Range::new(
            self.rows.get(r0..=r1).unwrap_or_default().to_vec(),
            self.columns.clone(),
        )
    }

    /// Whole columns between two indexes, across every row.
    pub fn column_band(&self, from: usize, to: usize) -> Range {
        let (c0, c1) = ordered(from, to);
        Range::new(
            self.rows.clone(),
            self.columns.get(c0..=c1).unwrap_or_default().to_vec(),
        )
    }

    /// Every cell.
    pub fn full_range(&self) -> Range {
        Range::new(self.rows.clone(), self.columns.clone())
    }

    pub fn get_location(&self, row_idx: usize, column_idx: usize) -> Option<Location> {
        Some(Location::new(
            self.rows.get(row_idx)?.clone(),
            self.columns.get(column_idx)?.clone(),
        ))
    }

    /// Resolve ids, failing with a lookup error naming both ids.
    pub fn get_location_by_id(&self, row_id: &Id, column_id: &Id) -> Result<Location> {
        self.row_idx(row_id)
            .zip(self.column_idx(column_id))
            .and_then(|(r, c)| self.get_location(r, c))
            .ok_or_else(|| GridError::lookup(row_id, column_id))
    }

    /// Re-anchor a location from a previous matrix: by id when the id still
    /// exists, otherwise by index clamped to the last row/column.
    pub fn validate_location(&self, location: &Location) -> Option<Location> {
        let last_row = self.rows.len().checked_sub(1)?;
        let last_col = self.columns.len().checked_sub(1)?;
        let r = self
            .row_idx(&location.row.row_id)
            .unwrap_or(location.row.idx.min(last_row));
        let c = self
            .column_idx(&location.column.column_id)
            .unwrap_or(location.column.idx.min(last_col));
        self.get_location(r, c)
    }

    pub fn validate_range(&self, range: &Range) -> Option<Range> {
        let first = self.validate_location(&range.first()?)?;
        let last = self.validate_location(&range.last()?)?;
        Some(self.get_range(&first, &last))
    }

    pub fn cell_at(&self, row_idx: usize, column_idx: usize) -> Option<&Cell> {
        self.source_rows.get(row_idx)?.cells.get(column_idx)
    }

    pub fn get_cell(&self, location: &Location) -> Option<&Cell> {
        self.cell_at(location.row.idx, location.column.idx)
    }

    pub fn span_info(&self, row_idx: usize, column_idx: usize) -> Option<&SpanInfo> {
        self.span_lookup.get(&(column_idx, row_idx))
    }

    /// True unless the slot is covered by another cell's span.
    pub fn is_rendered(&self, row_idx: usize, column_idx: usize) -> bool {
        self.span_info(row_idx, column_idx)
            .map_or(true, |span| span.is_origin)
    }

    /// The origin of the span covering `location` (itself when unspanned).
    pub fn span_origin(&self, location: &Location) -> Location {
        match self.span_info(location.row.idx, location.column.idx) {
            Some(span) if !span.is_origin => self
                .get_location(span.origin_row, span.origin_column)
                .unwrap_or_else(|| location.clone()),
            _ => location.clone(),
        }
    }

    /// The full rectangle occupied by the cell covering `location`.
    pub fn span_range(&self, location: &Location) -> Range {
        let Some(span) = self.span_info(location.row.idx, location.column.idx) else {
            return self.get_range(location, location);
        };
        let origin = self.get_location(span.origin_row, span.origin_column);
        let end = self.get_location(
            span.origin_row + span.row_span - 1,
            span.origin_column + span.col_span - 1,
        );
        match (origin, end) {
            (Some(o), Some(e)) => self.get_range(&o, &e),
            _ => self.get_range(location, location),
        }
    }

    /// The ranges to draw inside `area`: one per rendered cell, spans expanded.
    pub fn ranges_to_render(&self, area: &Range) -> Vec<Range> {
        area.locations()
            .filter(|loc| self.is_rendered(loc.row.idx, loc.column.idx))
            .map(|loc| self.span_range(&loc))
            .collect()
    }

    /// Grow to at least `row_count` × `column_count`, filling new slots with
    /// empty cells and default-sized synthetic rows/columns.
    pub fn extend(&self, row_count: usize, column_count: usize) -> Result<CellMatrix> {
        let mut columns = self.source_columns.clone();
        let mut next = columns.len();
        while columns.len() < column_count {
            let id = unused_id("column", &mut next, &self.column_indexes);
            columns.push(Column::new(id));
        }
        let width = columns.len();

        let mut rows = self.source_rows.clone();
        for row in &mut rows {
            row.cells.resize_with(width, Cell::empty);
        }
        let mut next = rows.len();
        while rows.len() < row_count {
            let id = unused_id("row", &mut next, &self.row_indexes);
            rows.push(Row::new(id, vec![Cell::empty(); width]));
        }

        tracing::debug!(
            rows = rows.len(),
            columns = columns.len(),
            "extending cell matrix"
        );
        CellMatrixBuilder::new(rows, columns)
            .sticky(self.sticky)
            .min_column_width(self.min_column_width)
            .build()
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn unused_id(prefix: &str, next: &mut usize, taken: &HashMap<Id, usize>) -> Id {
    loop {
        let id = Id::from(format!("{prefix}-{next}"));
        *next += 1;
        if !taken.contains_key(&id) {
            return id;
        }
    }
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

    fn grid(rows: usize, cols: usize) -> CellMatrix {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}"))).collect();
        let rows = (0..rows)
            .map(|r| {
                Row::new(
                    format!("r{r}"),
                    (0..cols).map(|c| Cell::text(format!("{r}:{c}"))).collect(),
                )
            })
            .collect();
        CellMatrixBuilder::new(rows, columns).build().unwrap()
    }

    #[test]
    fn test_edges() {
        let m = grid(4, 3);
        assert_eq!(m.first().unwrap().row.idx, 0);
        let last = m.last().unwrap();
        assert_eq!((last.row.idx, last.column.idx), (3, 2));
    }

    #[test]
    fn test_get_range_any_corner_order() {
        let m = grid(5, 5);
        let a = m.get_location(3, 1).unwrap();
        let b = m.get_location(1, 4).unwrap();
        let range = m.get_range(&a, &b);
        assert_eq!(range.rows.len(), 3);
        assert_eq!(range.columns.len(), 4);
        assert_eq!(range.first().unwrap().column.idx, 1);
    }

    #[test]
    fn test_lookup_by_id() {
        let m = grid(2, 2);
        let loc = m.get_location_by_id(&Id::from("r1"), &Id::from("c0")).unwrap();
        assert_eq!((loc.row.idx, loc.column.idx), (1, 0));

        let err = m
            .get_location_by_id(&Id::from("nope"), &Id::from("c0"))
            .unwrap_err();
        assert!(matches!(err, GridError::Lookup { .. }));
    }

    #[test]
    fn test_validate_location_clamps_unknown_ids() {
        let big = grid(10, 10);
        let small = grid(3, 3);
        let mut loc = big.get_location(8, 8).unwrap();
        loc.row.row_id = Id::from("gone");
        loc.column.column_id = Id::from("gone");
        let v = small.validate_location(&loc).unwrap();
        assert_eq!((v.row.idx, v.column.idx), (2, 2));
    }

    #[test]
    fn test_extend_adds_default_sized_slots() {
        let m = grid(3, 3);
        let bigger = m.extend(5, 5).unwrap();
        assert_eq!(bigger.rows.len(), 5);
        assert_eq!(bigger.columns.len(), 5);
        assert_eq!(bigger.rows[4].height, DEFAULT_ROW_HEIGHT);
        assert_eq!(bigger.columns[4].width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(bigger.cell_at(0, 4), Some(&Cell::empty()));
        assert_eq!(bigger.cell_at(0, 0).unwrap().text, "0:0");
    }

    #[test]
    fn test_extend_never_shrinks() {
        let m = grid(4, 4);
        let same = m.extend(2, 2).unwrap();
        assert_eq!(same.rows.len(), 4);
        assert_eq!(same.columns.len(), 4);
    }
}
