//! Positioned rows/columns and the locations built from them.

use crate::types::{CellLocation, Id};

/// A row with its resolved geometry.
///
/// `top`/`bottom` are relative to the pane the row lives in: sticky-top,
/// scrollable or sticky-bottom each start at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub idx: usize,
    pub row_id: Id,
    pub top: f32,
    pub height: f32,
    pub bottom: f32,
    pub reorderable: bool,
}

/// A column with its resolved geometry; pane-relative like [`GridRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    pub idx: usize,
    pub column_id: Id,
    pub left: f32,
    pub width: f32,
    pub right: f32,
    pub resizable: bool,
    pub reorderable: bool,
}

/// A resolved cell address.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub row: GridRow,
    pub column: GridColumn,
}

impl Location {
    pub fn new(row: GridRow, column: GridColumn) -> Self {
        Self { row, column }
    }

    /// Same cell, compared by index.
    pub fn same_cell(&self, other: &Location) -> bool {
        self.row.idx == other.row.idx && self.column.idx == other.column.idx
    }

    pub fn to_cell_location(&self) -> CellLocation {
        CellLocation {
            row_id: self.row.row_id.clone(),
            column_id: self.column.column_id.clone(),
        }
    }
}

/// A location resolved from a pointer, with the offsets that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerLocation {
    pub row: GridRow,
    pub column: GridColumn,
    /// Pointer relative to the grid's top-left corner
    pub viewport_x: f32,
    pub viewport_y: f32,
    /// Pointer relative to the cell's top-left corner
    pub cell_x: f32,
    pub cell_y: f32,
}

impl PointerLocation {
    pub fn location(&self) -> Location {
        Location::new(self.row.clone(), self.column.clone())
    }
}
