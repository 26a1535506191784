use super::CellTemplate;
use crate::error::Result;
use crate::types::Cell;

/// Read-only, non-focusable label cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderCellTemplate;

impl CellTemplate for HeaderCellTemplate {
    fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell> {
        Ok(Cell {
            value: f64::NAN,
            ..cell.clone()
        })
    }

    fn is_focusable(&self, _cell: &Cell) -> bool {
        false
    }
}
