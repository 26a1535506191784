use super::{finish_selection, GridEvent};
use crate::events::PointerEvent;
use crate::layout::Location;
use crate::state::{focus_location, select_multiple_rows, select_one_row, unselect_one_row, Context, GridState};
use crate::types::SelectionMode;

/// Pressing on the first column selects whole rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowSelectionBehavior;

impl RowSelectionBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerDown(ev, loc) => pointer_down(ev, &loc.location(), state, cx),
            GridEvent::PointerEnter(ev, loc) => match state.focused_location.clone() {
                Some(focused) => {
                    let incremental = ev.modifiers.selection_key(state.platform);
                    select_multiple_rows(state, &focused.row, &loc.row, incremental)
                }
                None => state,
            },
            GridEvent::PointerUp(..) => finish_selection(state, cx),
            _ => state,
        }
    }
}

fn pointer_down(event: &PointerEvent, location: &Location, state: GridState, cx: &mut Context<'_>) -> GridState {
    let selection_key = event.modifiers.selection_key(state.platform);
    let row = &location.row;
    if selection_key
        && state.selection_mode == SelectionMode::Row
        && state.selected_ids.contains(&row.row_id)
    {
        return unselect_one_row(state, row);
    }
    match state.focused_location.clone() {
        Some(focused) if event.modifiers.shift => select_multiple_rows(state, &focused.row, row, selection_key),
        _ => {
            let state = focus_location(state, location, false, cx);
            select_one_row(state, row, selection_key)
        }
    }
}
