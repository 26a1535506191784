//! Rectangular spans of rows × columns.

use super::{GridColumn, GridRow, Location};

/// Which axis [`Range::slice`] narrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceDirection {
    Rows,
    Columns,
    Both,
}

/// A contiguous slice of rows and a contiguous slice of columns.
///
/// Immutable once built; all operations return new ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Range {
    pub rows: Vec<GridRow>,
    pub columns: Vec<GridColumn>,
}

impl Range {
    pub fn new(rows: Vec<GridRow>, columns: Vec<GridColumn>) -> Self {
        Self { rows, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Sum of column widths.
    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Sum of row heights.
    pub fn height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    pub fn first(&self) -> Option<Location> {
        Some(Location::new(
            self.rows.first()?.clone(),
            self.columns.first()?.clone(),
        ))
    }

    pub fn last(&self) -> Option<Location> {
        Some(Location::new(
            self.rows.last()?.clone(),
            self.columns.last()?.clone(),
        ))
    }

    pub fn first_row(&self) -> Option<&GridRow> {
        self.rows.first()
    }

    pub fn last_row(&self) -> Option<&GridRow> {
        self.rows.last()
    }

    pub fn first_column(&self) -> Option<&GridColumn> {
        self.columns.first()
    }

    pub fn last_column(&self) -> Option<&GridColumn> {
        self.columns.last()
    }

    pub fn contains_row(&self, row_idx: usize) -> bool {
        match (self.rows.first(), self.rows.last()) {
            (Some(f), Some(l)) => row_idx >= f.idx && row_idx <= l.idx,
            _ => false,
        }
    }

    pub fn contains_column(&self, column_idx: usize) -> bool {
        match (self.columns.first(), self.columns.last()) {
            (Some(f), Some(l)) => column_idx >= f.idx && column_idx <= l.idx,
            _ => false,
        }
    }

    /// Index containment: the location lies within both slices.
    pub fn contains(&self, location: &Location) -> bool {
        self.contains_row(location.row.idx) && self.contains_column(location.column.idx)
    }

    /// Narrow this range to `other`'s bounds along `direction`.
    pub fn slice(&self, other: &Range, direction: SliceDirection) -> Range {
        let rows = if matches!(direction, SliceDirection::Rows | SliceDirection::Both) {
            self.rows
                .iter()
                .filter(|r| other.contains_row(r.idx))
                .cloned()
                .collect()
        } else {
            self.rows.clone()
        };
        let columns = if matches!(direction, SliceDirection::Columns | SliceDirection::Both) {
            self.columns
                .iter()
                .filter(|c| other.contains_column(c.idx))
                .cloned()
                .collect()
        } else {
            self.columns.clone()
        };
        Range::new(rows, columns)
    }

    /// True when the two ranges share at least one cell.
    pub fn intersects(&self, other: &Range) -> bool {
        let (Some(a0), Some(a1), Some(b0), Some(b1)) =
            (self.first(), self.last(), other.first(), other.last())
        else {
            return false;
        };
        a0.row.idx <= b1.row.idx
            && b0.row.idx <= a1.row.idx
            && a0.column.idx <= b1.column.idx
            && b0.column.idx <= a1.column.idx
    }

    /// Row-major iteration over every location.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.rows.iter().flat_map(move |row| {
            self.columns
                .iter()
                .map(move |column| Location::new(row.clone(), column.clone()))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use crate::types::Id;

    fn rows(range: std::ops::Range<usize>) -> Vec<GridRow> {
        range
            .map(|idx| GridRow {
                idx,
                row_id: Id::from(idx as i64),
                top: idx as f32 * 25.0,
                height: 25.0,
                bottom: (idx + 1) as f32 * 25.0,
                reorderable: false,
            })
            .collect()
    }

    fn cols(range: std::ops::Range<usize>) -> Vec<GridColumn> {
        range
            .map(|idx| GridColumn {
                idx,
                column_id: Id::from(idx as i64),
                left: idx as f32 * 100.0,
                width: 100.0,
                right: (idx + 1) as f32 * 100.0,
                resizable: false,
                reorderable: false,
            })
            .collect()
    }

    #[test]
    fn size_is_sum_of_parts() {
        let r = Range::new(rows(0..3), cols(0..2));
        assert_eq!(r.height(), 75.0);
        assert_eq!(r.width(), 200.0);
        assert_eq!(r.cell_count(), 6);
    }

    #[test]
    fn contains_uses_indexes() {
        let r = Range::new(rows(2..5), cols(1..3));
        let inside = Location::new(rows(3..4).remove(0), cols(2..3).remove(0));
        let outside = Location::new(rows(5..6).remove(0), cols(2..3).remove(0));
        assert!(r.contains(&inside));
        assert!(!r.contains(&outside));
    }

    #[test]
    fn slice_narrows_one_axis() {
        let big = Range::new(rows(0..10), cols(0..10));
        let window = Range::new(rows(3..5), cols(4..6));
        let sliced = big.slice(&window, SliceDirection::Rows);
        assert_eq!(sliced.rows.len(), 2);
        assert_eq!(sliced.columns.len(), 10);
        let both = big.slice(&window, SliceDirection::Both);
        assert_eq!(both.first().unwrap().column.idx, 4);
    }

    #[test]
    fn intersection_is_inclusive() {
        let a = Range::new(rows(0..3), cols(0..3));
        let b = Range::new(rows(2..4), cols(2..4));
        let c = Range::new(rows(3..4), cols(0..1));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn empty_range_has_no_corners() {
        let r = Range::default();
        assert!(r.first().is_none());
        assert!(r.is_empty());
    }
}
