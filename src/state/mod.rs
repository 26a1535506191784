//! Interaction state and the pure transitions over it.
//!
//! A [`GridState`] is threaded by value: every transition takes the state,
//! and returns the next one. Host callbacks and viewport queries come in
//! through a [`Context`].

mod changes;
mod derive;
mod focus;
mod keyboard;
mod selection;

pub use changes::{selected_locations, try_append_change, try_append_change_having_group_id, wipe_selected_ranges};
pub use derive::derive_state;
pub(crate) use derive::{apply_props, prepare_matrix};
pub use focus::focus_location;
pub use keyboard::{handle_composition_end, handle_double_click, handle_key_down, handle_key_up};
pub use selection::{
    reset_selection, select_multiple_columns, select_multiple_rows, select_one_column, select_one_row,
    select_range, unselect_one_column, unselect_one_row, update_active_selected_range,
    update_selected_columns, update_selected_rows,
};

use crate::behavior::Behavior;
use crate::error::{GridError, Result};
use crate::events::Platform;
use crate::host::GridHost;
use crate::layout::{CellMatrix, Location, Range, ScrollBoundaries, StickyCounts, ViewportQuery};
use crate::templates::{CellTemplate, CellTemplates};
use crate::types::{Cell, CellChange, CellLocation, Highlight, Id, MenuOption, SelectionMode};

/// What a transition may reach outside the state.
pub struct Context<'a> {
    pub host: &'a mut dyn GridHost,
    pub viewport: &'a dyn ViewportQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrientation {
    Horizontal,
    Vertical,
}

/// Guide line shown while resizing or reordering, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub position: f32,
    pub orientation: LineOrientation,
}

/// Ghost of the rows/columns being dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub position: f32,
    pub size: f32,
    pub orientation: LineOrientation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub left: f32,
    pub top: f32,
    pub options: Vec<MenuOption>,
}

/// Everything the grid knows between two events.
#[derive(Debug, Default)]
pub struct GridState {
    pub matrix: CellMatrix,
    pub templates: CellTemplates,
    pub behavior: Behavior,

    pub focused_location: Option<Location>,
    pub currently_edited_cell: Option<Cell>,

    pub selected_ranges: Vec<Range>,
    pub active_selected_range_idx: usize,
    pub selection_mode: SelectionMode,
    /// Row or column indexes in row/column mode
    pub selected_indexes: Vec<usize>,
    /// Row or column ids in row/column mode
    pub selected_ids: Vec<Id>,
    pub copy_range: Option<Range>,

    pub visible_range: Range,
    pub scroll_boundaries: ScrollBoundaries,
    /// Scroll offsets the host should apply to reveal the focused cell
    pub scroll_target: Option<(f32, f32)>,

    pub queued_changes: Vec<CellChange>,
    pub highlights: Vec<Highlight>,
    pub context_menu: Option<ContextMenu>,
    pub line: Option<GuideLine>,
    pub shadow: Option<Shadow>,

    /// Sticky counts after the responsive breakpoints were applied
    pub sticky: StickyCounts,
    pub platform: Platform,
    pub enable_fill_handle: bool,
    pub enable_range_selection: bool,
    pub enable_row_selection: bool,
    pub enable_column_selection: bool,
    pub move_right_on_enter: bool,
    pub disable_virtual_scrolling: bool,
    pub forced_focus: Option<CellLocation>,
}

impl GridState {
    pub fn active_selected_range(&self) -> Option<&Range> {
        self.selected_ranges.get(self.active_selected_range_idx)
    }

    /// The cell at `location` normalized through its template.
    ///
    /// # Errors
    /// Lookup failure, missing type or template, or template validation.
    pub fn compatible_cell(&self, location: &Location) -> Result<(Cell, &dyn CellTemplate)> {
        let cell = self
            .matrix
            .get_cell(location)
            .ok_or_else(|| GridError::lookup(&location.row.row_id, &location.column.column_id))?;
        if cell.cell_type.is_empty() {
            return Err(GridError::MissingCellType {
                row_id: location.row.row_id.to_string(),
                column_id: location.column.column_id.to_string(),
            });
        }
        self.templates.compatible(cell)
    }

    /// Take the queued changes, leaving the queue empty.
    pub fn drain_changes(&mut self) -> Vec<CellChange> {
        std::mem::take(&mut self.queued_changes)
    }

    pub fn is_selected(&self, location: &Location) -> bool {
        self.selected_ranges.iter().any(|r| r.contains(location))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
pub(crate) mod fixtures {
    //! Small states for unit tests.

    use super::*;
    use crate::config::GridProps;
    use crate::layout::Viewport;
    use crate::types::{Column, Row};

    /// `rows` × `cols` of number cells holding `r * 10 + c`, 100×20 px.
    pub(crate) fn number_props(rows: usize, cols: usize) -> GridProps {
        let columns = (0..cols)
            .map(|c| Column::new(format!("c{c}")).with_width(100.0))
            .collect();
        let rows = (0..rows)
            .map(|r| {
                let cells = (0..cols).map(|c| Cell::number((r * 10 + c) as f64)).collect();
                Row::new(format!("r{r}"), cells).with_height(20.0)
            })
            .collect();
        GridProps::new(rows, columns).enable_all()
    }

    pub(crate) fn state(props: &GridProps) -> GridState {
        let viewport = Viewport::new(800.0, 600.0);
        let mut host = ();
        let mut cx = Context {
            host: &mut host,
            viewport: &viewport,
        };
        derive_state(props, None, CellTemplates::with_defaults(), &mut cx).unwrap()
    }

    pub(crate) fn loc(state: &GridState, row: usize, col: usize) -> Location {
        state.matrix.get_location(row, col).unwrap()
    }
}
