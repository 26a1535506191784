use super::{begin_edit_on_key, CellTemplate, KeyOutcome};
use crate::error::Result;
use crate::events::KeyEvent;
use crate::types::{parse_number, Cell};

/// Free text; `value` mirrors the text when it parses as a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCellTemplate;

impl CellTemplate for TextCellTemplate {
    fn get_compatible_cell(&self, cell: &Cell) -> Result<Cell> {
        Ok(Cell {
            value: parse_number(&cell.text),
            ..cell.clone()
        })
    }

    fn update(&self, cell: &Cell, incoming: &Cell) -> Option<Cell> {
        self.get_compatible_cell(&Cell {
            text: incoming.text.clone(),
            ..cell.clone()
        })
        .ok()
    }

    fn handle_key_down(&self, cell: &Cell, event: &KeyEvent) -> KeyOutcome {
        begin_edit_on_key(cell, event, |ch| !ch.is_control())
    }

    fn handle_composition_end(&self, cell: &Cell, text: &str) -> KeyOutcome {
        KeyOutcome {
            cell: Cell {
                text: text.to_string(),
                ..cell.clone()
            },
            enable_edit_mode: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::events::Key;

    #[test]
    fn update_takes_incoming_text_keeps_group() {
        let current = Cell::text("old").with_group("g");
        let merged = TextCellTemplate.update(&current, &Cell::number(12.0)).unwrap();
        assert_eq!(merged.text, "12");
        assert_eq!(merged.value, 12.0);
        assert_eq!(merged.group_id, current.group_id);
    }

    #[test]
    fn typing_opens_editor_with_char() {
        let out = TextCellTemplate.handle_key_down(&Cell::text("x"), &KeyEvent::new(Key::Char('q')));
        assert!(out.enable_edit_mode);
        assert_eq!(out.cell.text, "q");

        let ctrl = KeyEvent::new(Key::Char('c')).ctrl();
        assert!(!TextCellTemplate.handle_key_down(&Cell::text("x"), &ctrl).enable_edit_mode);
    }
}
