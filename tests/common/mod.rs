//! Shared fixtures for the integration tests.
#![allow(dead_code, clippy::cast_precision_loss)]

use cellgrid::layout::Range;
use cellgrid::{Cell, CellChange, Column, DropPosition, GridHost, GridProps, Id, PointerEvent, Row};

/// Width of every fixture column
pub const COLUMN_WIDTH: f32 = 100.0;

/// Height of every fixture row
pub const ROW_HEIGHT: f32 = 20.0;

/// `rows` × `cols` of number cells holding `r * 10 + c`, with every
/// interaction enabled.
pub fn number_grid(rows: usize, cols: usize) -> GridProps {
    let columns = (0..cols)
        .map(|c| Column::new(format!("c{c}")).with_width(COLUMN_WIDTH))
        .collect();
    let rows = (0..rows)
        .map(|r| {
            let cells = (0..cols).map(|c| Cell::number((r * 10 + c) as f64)).collect();
            Row::new(format!("r{r}"), cells).with_height(ROW_HEIGHT)
        })
        .collect();
    GridProps::new(rows, columns).enable_all()
}

/// Client point in the middle of a cell of an unscrolled fixture grid.
pub fn at(row: usize, col: usize) -> PointerEvent {
    PointerEvent::at(
        col as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0,
        row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0,
    )
}

/// Records what the grid reports back.
#[derive(Debug, Default)]
pub struct CollectingHost {
    pub changes: Vec<CellChange>,
    pub selections: Vec<Vec<Range>>,
    pub resized: Vec<(Id, f32)>,
    pub columns_reordered: Vec<(Id, Vec<Id>, DropPosition)>,
    pub veto_selection: bool,
}

impl GridHost for CollectingHost {
    fn on_cells_changed(&mut self, changes: &[CellChange]) {
        self.changes.extend_from_slice(changes);
    }

    fn on_selection_changing(&mut self, _ranges: &[Range]) -> bool {
        !self.veto_selection
    }

    fn on_selection_changed(&mut self, ranges: &[Range]) {
        self.selections.push(ranges.to_vec());
    }

    fn on_column_resized(&mut self, column_id: &Id, width: f32, _selected_ids: &[Id]) {
        self.resized.push((column_id.clone(), width));
    }

    fn on_columns_reordered(&mut self, target: &Id, ids: &[Id], position: DropPosition) {
        self.columns_reordered.push((target.clone(), ids.to_vec(), position));
    }
}

impl CollectingHost {
    pub fn written_values(&self) -> Vec<f64> {
        self.changes.iter().map(|c| c.new_cell.value).collect()
    }
}
