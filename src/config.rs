//! Grid declaration: everything the host configures.
//!
//! `GridProps` deserializes from camelCase JSON with every optional field
//! defaulted, so a minimal declaration is just `rows` and `columns`.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::events::Platform;
use crate::layout::{StickyBreakpoints, StickyCounts, DEFAULT_STICKY_BREAKPOINT, MIN_COLUMN_WIDTH};
use crate::types::{CellChange, CellLocation, Column, Highlight, Row};

fn default_breakpoint() -> f32 {
    DEFAULT_STICKY_BREAKPOINT
}

fn default_min_column_width() -> f32 {
    MIN_COLUMN_WIDTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProps {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,

    #[serde(default)]
    pub sticky_top_rows: usize,
    #[serde(default)]
    pub sticky_bottom_rows: usize,
    #[serde(default)]
    pub sticky_left_columns: usize,
    #[serde(default)]
    pub sticky_right_columns: usize,
    /// Percent of the container width pinned columns may take
    #[serde(default = "default_breakpoint")]
    pub horizontal_sticky_breakpoint: f32,
    /// Percent of the container height pinned rows may take
    #[serde(default = "default_breakpoint")]
    pub vertical_sticky_breakpoint: f32,
    #[serde(default = "default_min_column_width")]
    pub min_column_width: f32,

    #[serde(default)]
    pub disable_virtual_scrolling: bool,
    #[serde(default)]
    pub enable_fill_handle: bool,
    #[serde(default)]
    pub enable_range_selection: bool,
    #[serde(default)]
    pub enable_row_selection: bool,
    #[serde(default)]
    pub enable_column_selection: bool,
    #[serde(default)]
    pub move_right_on_enter: bool,

    /// Forced focus: the grid refuses to focus anything else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_location: Option<CellLocation>,
    /// Focus applied once, on the first derivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_focus_location: Option<CellLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,

    #[serde(default)]
    pub platform: Platform,
}

impl GridProps {
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        Self {
            rows,
            columns,
            sticky_top_rows: 0,
            sticky_bottom_rows: 0,
            sticky_left_columns: 0,
            sticky_right_columns: 0,
            horizontal_sticky_breakpoint: DEFAULT_STICKY_BREAKPOINT,
            vertical_sticky_breakpoint: DEFAULT_STICKY_BREAKPOINT,
            min_column_width: MIN_COLUMN_WIDTH,
            disable_virtual_scrolling: false,
            enable_fill_handle: false,
            enable_range_selection: false,
            enable_row_selection: false,
            enable_column_selection: false,
            move_right_on_enter: false,
            focus_location: None,
            initial_focus_location: None,
            highlights: Vec::new(),
            platform: Platform::default(),
        }
    }

    /// Parse a JSON declaration.
    ///
    /// # Errors
    /// Returns [`GridError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turn on fill handle and every selection mode.
    #[must_use]
    pub fn enable_all(mut self) -> Self {
        self.enable_fill_handle = true;
        self.enable_range_selection = true;
        self.enable_row_selection = true;
        self.enable_column_selection = true;
        self
    }

    pub fn sticky_counts(&self) -> StickyCounts {
        StickyCounts {
            top: self.sticky_top_rows,
            bottom: self.sticky_bottom_rows,
            left: self.sticky_left_columns,
            right: self.sticky_right_columns,
        }
    }

    pub fn breakpoints(&self) -> StickyBreakpoints {
        StickyBreakpoints {
            horizontal: self.horizontal_sticky_breakpoint,
            vertical: self.vertical_sticky_breakpoint,
        }
    }

    /// Write accepted changes back into the row declarations.
    ///
    /// Rows/columns that don't exist yet (a paste grew the grid) are
    /// appended with empty cells first.
    ///
    /// # Errors
    /// Returns [`GridError::Lookup`] if a change targets a row id and column
    /// id that both can't be found and can't be appended.
    pub fn apply_changes(&mut self, changes: &[CellChange]) -> Result<()> {
        for change in changes {
            let col = match self.columns.iter().position(|c| c.column_id == change.column_id) {
                Some(c) => c,
                None => {
                    self.columns.push(Column::new(change.column_id.clone()));
                    for row in &mut self.rows {
                        row.cells.push(crate::types::Cell::empty());
                    }
                    self.columns.len() - 1
                }
            };
            let row = match self.rows.iter().position(|r| r.row_id == change.row_id) {
                Some(r) => r,
                None => {
                    self.rows.push(Row::new(
                        change.row_id.clone(),
                        vec![crate::types::Cell::empty(); self.columns.len()],
                    ));
                    self.rows.len() - 1
                }
            };
            let slot = self
                .rows
                .get_mut(row)
                .and_then(|r| r.cells.get_mut(col))
                .ok_or_else(|| GridError::lookup(&change.row_id, &change.column_id))?;
            *slot = change.new_cell.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::{Cell, Id};

    #[test]
    fn minimal_json_gets_defaults() {
        let props = GridProps::from_json(
            r#"{"rows":[{"rowId":"r0","cells":[{"type":"text","text":"a"}]}],"columns":[{"columnId":"c0"}]}"#,
        )
        .unwrap();
        assert_eq!(props.horizontal_sticky_breakpoint, 50.0);
        assert_eq!(props.min_column_width, 40.0);
        assert_eq!(props.platform, Platform::Other);
        assert!(!props.enable_fill_handle);
        assert_eq!(props.rows[0].cells[0].text, "a");
    }

    #[test]
    fn apply_changes_writes_and_grows() {
        let mut props = GridProps::new(
            vec![Row::new("r0", vec![Cell::text("a")])],
            vec![Column::new("c0")],
        );
        let changes = vec![
            CellChange {
                cell_type: "text".into(),
                row_id: Id::from("r0"),
                column_id: Id::from("c0"),
                previous_cell: Cell::text("a"),
                new_cell: Cell::text("b"),
            },
            CellChange {
                cell_type: "text".into(),
                row_id: Id::from("row-1"),
                column_id: Id::from("column-1"),
                previous_cell: Cell::empty(),
                new_cell: Cell::text("z"),
            },
        ];
        props.apply_changes(&changes).unwrap();
        assert_eq!(props.rows[0].cells[0].text, "b");
        assert_eq!(props.rows.len(), 2);
        assert_eq!(props.columns.len(), 2);
        assert_eq!(props.rows[1].cells[1].text, "z");
        assert_eq!(props.rows[0].cells[1], Cell::empty());
    }
}
