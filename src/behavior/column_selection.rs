use super::{finish_selection, GridEvent};
use crate::events::PointerEvent;
use crate::layout::Location;
use crate::state::{focus_location, select_multiple_columns, select_one_column, unselect_one_column, Context, GridState};
use crate::types::SelectionMode;

/// Pressing on the header row selects whole columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSelectionBehavior;

impl ColumnSelectionBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerDown(ev, loc) => pointer_down(ev, &loc.location(), state, cx),
            GridEvent::PointerEnter(ev, loc) => match state.focused_location.clone() {
                Some(focused) => {
                    let incremental = ev.modifiers.selection_key(state.platform);
                    select_multiple_columns(state, &focused.column, &loc.column, incremental)
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
    let column = &location.column;
    if selection_key
        && state.selection_mode == SelectionMode::Column
        && state.selected_ids.contains(&column.column_id)
    {
        return unselect_one_column(state, column);
    }
    match state.focused_location.clone() {
        Some(focused) if event.modifiers.shift => select_multiple_columns(state, &focused.column, column, selection_key),
        _ => {
            let state = focus_location(state, location, false, cx);
            select_one_column(state, column, selection_key)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::events::Modifiers;
    use crate::host::recording::RecordingHost;
    use crate::layout::{PointerLocation, Viewport};
    use crate::state::fixtures::{number_props, state};
    use crate::types::Id;

    fn header(s: &GridState, col: usize) -> PointerLocation {
        PointerLocation {
            row: s.matrix.rows[0].clone(),
            column: s.matrix.columns[col].clone(),
            viewport_x: 0.0,
            viewport_y: 0.0,
            cell_x: 10.0,
            cell_y: 10.0,
        }
    }

    fn click(s: GridState, host: &mut RecordingHost, from: usize, to: usize, mods: Modifiers) -> GridState {
        let vp = Viewport::default();
        let mut cx = Context { host, viewport: &vp };
        let ev = PointerEvent::at(0.0, 0.0).with(mods);
        let mut b = ColumnSelectionBehavior;
        let s = b.handle(GridEvent::PointerDown(&ev, &header(&s, from)), s, &mut cx);
        let s = b.handle(GridEvent::PointerEnter(&ev, &header(&s, to)), s, &mut cx);
        b.handle(GridEvent::PointerUp(&ev, &header(&s, to)), s, &mut cx)
    }

    #[test]
    fn test_drag_selects_column_band() {
        let mut host = RecordingHost::default();
        let s = click(state(&number_props(4, 5)), &mut host, 1, 3, Modifiers::NONE);
        assert_eq!(s.selection_mode, SelectionMode::Column);
        assert_eq!(s.selected_ids, vec![Id::from("c1"), Id::from("c2"), Id::from("c3")]);
        assert_eq!(s.selected_ranges.len(), 1);
        assert_eq!(s.selected_ranges[0].rows.len(), 4);
        assert_eq!(host.selection_changed, 1);
    }

    #[test]
    fn test_selection_key_toggles_columns() {
        let mut host = RecordingHost::default();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let s = click(state(&number_props(4, 5)), &mut host, 0, 0, Modifiers::NONE);
        let s = click(s, &mut host, 3, 3, ctrl);
        assert_eq!(s.selected_indexes, vec![0, 3]);
        assert_eq!(s.selected_ranges.len(), 2);

        let s = click(s, &mut host, 0, 0, ctrl);
        // the press drops c0, then entering it extends from the focused c3
        assert_eq!(s.selected_indexes, vec![0, 1, 2, 3]);
        assert_eq!(s.focused_location.unwrap().column.idx, 3);
    }

    #[test]
    fn test_vetoed_column_selection_is_dropped() {
        let mut host = RecordingHost {
            veto_selection: true,
            ..RecordingHost::default()
        };
        let s = click(state(&number_props(4, 5)), &mut host, 2, 2, Modifiers::NONE);
        assert!(s.selected_ranges.is_empty());
        assert!(s.selected_ids.is_empty());
    }
}
