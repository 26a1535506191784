//! Callbacks into the embedding application.
//!
//! Every method has a permissive default so a host only implements what it
//! cares about. Predicates (`*_changing`, `can_reorder_*`) returning `false`
//! veto the pending operation.

use crate::layout::Range;
use crate::types::{CellChange, CellLocation, DropPosition, Id, MenuOption, SelectionMode};

pub trait GridHost {
    /// Accepted edits, drained once per handled event.
    fn on_cells_changed(&mut self, _changes: &[CellChange]) {}

    fn on_focus_location_changing(&mut self, _location: &CellLocation) -> bool {
        true
    }

    fn on_focus_location_changed(&mut self, _location: &CellLocation) {}

    fn on_selection_changing(&mut self, _ranges: &[Range]) -> bool {
        true
    }

    fn on_selection_changed(&mut self, _ranges: &[Range]) {}

    /// A column resize gesture finished. `selected_ids` are the ids of the
    /// current row/column selection so hosts can resize them together.
    fn on_column_resized(&mut self, _column_id: &Id, _width: f32, _selected_ids: &[Id]) {}

    fn on_rows_reordered(&mut self, _target_row_id: &Id, _row_ids: &[Id], _position: DropPosition) {}

    fn on_columns_reordered(
        &mut self,
        _target_column_id: &Id,
        _column_ids: &[Id],
        _position: DropPosition,
    ) {
    }

    fn can_reorder_rows(&mut self, _target_row_id: &Id, _row_ids: &[Id], _position: DropPosition) -> bool {
        true
    }

    fn can_reorder_columns(
        &mut self,
        _target_column_id: &Id,
        _column_ids: &[Id],
        _position: DropPosition,
    ) -> bool {
        true
    }

    /// Customize the context menu. `options` is seeded with copy/cut/paste.
    fn on_context_menu(
        &mut self,
        _selected_row_ids: &[Id],
        _selected_column_ids: &[Id],
        _selection_mode: SelectionMode,
        options: Vec<MenuOption>,
        _selected_locations: &[Vec<CellLocation>],
    ) -> Vec<MenuOption> {
        options
    }
}

/// A host that accepts everything and listens to nothing.
impl GridHost for () {}

#[cfg(test)]
pub(crate) mod recording {
    //! A host that records every callback, shared by unit tests.

    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub changes: Vec<CellChange>,
        pub focus_changed: Vec<CellLocation>,
        pub selection_changed: usize,
        pub veto_selection: bool,
        pub veto_focus: bool,
        pub resized: Vec<(Id, f32)>,
        pub rows_reordered: Vec<(Id, Vec<Id>, DropPosition)>,
        pub columns_reordered: Vec<(Id, Vec<Id>, DropPosition)>,
    }

    impl GridHost for RecordingHost {
        fn on_cells_changed(&mut self, changes: &[CellChange]) {
            self.changes.extend_from_slice(changes);
        }

        fn on_focus_location_changing(&mut self, _location: &CellLocation) -> bool {
            !self.veto_focus
        }

        fn on_focus_location_changed(&mut self, location: &CellLocation) {
            self.focus_changed.push(location.clone());
        }

        fn on_selection_changing(&mut self, _ranges: &[Range]) -> bool {
            !self.veto_selection
        }

        fn on_selection_changed(&mut self, _ranges: &[Range]) {
            self.selection_changed += 1;
        }

        fn on_column_resized(&mut self, column_id: &Id, width: f32, _selected_ids: &[Id]) {
            self.resized.push((column_id.clone(), width));
        }

        fn on_rows_reordered(&mut self, target: &Id, ids: &[Id], position: DropPosition) {
            self.rows_reordered.push((target.clone(), ids.to_vec(), position));
        }

        fn on_columns_reordered(&mut self, target: &Id, ids: &[Id], position: DropPosition) {
            self.columns_reordered.push((target.clone(), ids.to_vec(), position));
        }
    }
}
