use super::{CellTemplate, KeyOutcome};
use crate::error::Result;
use crate::events::{Key, KeyEvent};
use crate::types::Cell;

const CHECKED: &str = "checked";

/// Boolean toggle. Space or Enter flips it in place without an editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxCellTemplate;

impl CheckboxCellTemplate {
    fn with_state(cell: &Cell, checked: bool) -> Cell {
        let mut out = cell.clone();
        out.set_flag(CHECKED, checked);
        out.value = if checked { 1.0 } else { 0.0 };
        out.text = checked.to_string();
        out
    }
}

/// Truthiness of a foreign cell pasted or filled onto a checkbox.
fn truthy(cell: &Cell) -> bool {
    if cell.extra.contains_key(CHECKED) {
        return cell.flag(CHECKED);
    }
    let text = cell.text.trim();
    if text.eq_ignore_ascii_case("true") {
        return true;
    }
    if text.eq_ignore_ascii_case("false") || text.is_empty() {
        return false;
    }
    !cell.value.is_nan() && cell.value.abs() > f64::EPSILON
}

impl CellTemplate for CheckboxCellTemplate {
    fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell> {
        Ok(Self::with_state(cell, truthy(cell)))
    }

    fn update(&self, cell: &Cell, incoming: &Cell) -> Option<Cell> {
        Some(Self::with_state(cell, truthy(incoming)))
    }

    fn handle_key_down(&self, cell: &Cell, event: &KeyEvent) -> KeyOutcome {
        match event.key {
            Key::Space | Key::Enter => KeyOutcome {
                cell: Self::with_state(cell, !cell.flag(CHECKED)),
                enable_edit_mode: false,
            },
            _ => KeyOutcome::unchanged(cell),
        }
    }
}
