use super::{begin_edit_on_key, CellTemplate, KeyOutcome};
use crate::error::Result;
use crate::events::KeyEvent;
use crate::types::{format_number, parse_number, Cell};

/// Numeric cell; `text` is always the formatted `value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCellTemplate;

impl CellTemplate for NumberCellTemplate {
    fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell> {
        let value = if cell.value.is_nan() {
            parse_number(&cell.text)
        } else {
            cell.value
        };
        Ok(Cell {
            value,
            text: format_number(value),
            ..cell.clone()
        })
    }

    fn update(&self, cell: &Cell, incoming: &Cell) -> Option<Cell> {
        let value = if incoming.value.is_nan() {
            parse_number(&incoming.text)
        } else {
            incoming.value
        };
        self.get_compatible_cell(&Cell {
            value,
            text: format_number(value),
            ..cell.clone()
        })
        .ok()
    }

    fn handle_key_down(&self, cell: &Cell, event: &KeyEvent) -> KeyOutcome {
        begin_edit_on_key(cell, event, |ch| ch.is_ascii_digit() || matches!(ch, '-' | '.' | ','))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::events::Key;

    #[test]
    fn text_only_declaration_is_parsed() {
        let mut cell = Cell::with_type("number");
        cell.text = " 42.5 ".into();
        let c = NumberCellTemplate.get_compatible_cell(&cell).unwrap();
        assert_eq!(c.value, 42.5);
        assert_eq!(c.text, "42.5");
    }

    #[test]
    fn update_from_text_cell() {
        let merged = NumberCellTemplate
            .update(&Cell::number(1.0), &Cell::text("7"))
            .unwrap();
        assert_eq!(merged.value, 7.0);
        assert_eq!(merged.cell_type, "number");
    }

    #[test]
    fn empty_incoming_clears() {
        let merged = NumberCellTemplate.update(&Cell::number(21.0), &Cell::empty()).unwrap();
        assert!(merged.value.is_nan());
        assert!(merged.text.is_empty());
    }

    #[test]
    fn letters_do_not_open_editor() {
        let out = NumberCellTemplate.handle_key_down(&Cell::number(1.0), &KeyEvent::new(Key::Char('a')));
        assert!(!out.enable_edit_mode);
        let out = NumberCellTemplate.handle_key_down(&Cell::number(1.0), &KeyEvent::new(Key::Char('5')));
        assert!(out.enable_edit_mode);
    }
}
