//! Moving the focused cell.

use super::{reset_selection, try_append_change, Context, GridState};
use crate::layout::Location;

/// Focus `location`.
///
/// A pending edit is committed first. The move is refused when the host
/// vetoes it, the cell's template is not focusable, or a forced focus
/// location is configured and this is a different cell. On success the
/// host is notified and, with `reset_selection_to_cell`, the selection
/// collapses to the focused cell.
pub fn focus_location(
    mut state: GridState,
    location: &Location,
    reset_selection_to_cell: bool,
    cx: &mut Context<'_>,
) -> GridState {
    if let (Some(focused), Some(edited)) = (state.focused_location.clone(), state.currently_edited_cell.take()) {
        state = try_append_change(state, &focused, &edited);
    }

    let focusable = match state.compatible_cell(location) {
        Ok((cell, template)) => template.is_focusable(&cell),
        Err(e) => {
            tracing::error!(error = %e, "cannot focus location");
            return state;
        }
    };
    let cell_location = location.to_cell_location();
    let allowed = cx.host.on_focus_location_changing(&cell_location);
    let already_focused = state
        .focused_location
        .as_ref()
        .is_some_and(|f| f.same_cell(location));
    let acceptable = already_focused
        || match &state.forced_focus {
            Some(forced) => state
                .matrix
                .get_location_by_id(&forced.row_id, &forced.column_id)
                .is_ok_and(|f| f.same_cell(location)),
            None => true,
        };
    if !focusable || !allowed || !acceptable {
        return state;
    }

    cx.host.on_focus_location_changed(&cell_location);
    let Some(validated) = state.matrix.validate_location(location) else {
        return state;
    };
    if reset_selection_to_cell {
        state = reset_selection(state, &validated);
    }
    state.focused_location = Some(validated);
    state.context_menu = None;
    state.currently_edited_cell = None;
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::GridProps;
    use crate::host::recording::RecordingHost;
    use crate::layout::Viewport;
    use crate::state::fixtures::{loc, number_props, state};
    use crate::types::{Cell, CellLocation, Column, Row};

    #[test]
    fn test_focus_notifies_and_collapses_selection() {
        let s = state(&number_props(3, 3));
        let mut host = RecordingHost::default();
        let vp = Viewport::default();
        let mut cx = Context { host: &mut host, viewport: &vp };
        let target = loc(&s, 1, 2);
        let s = focus_location(s, &target, true, &mut cx);
        assert!(s.focused_location.as_ref().unwrap().same_cell(&target));
        assert_eq!(s.selected_ranges.len(), 1);
        assert_eq!(s.selected_ranges[0].cell_count(), 1);
        assert_eq!(host.focus_changed, vec![CellLocation::new("r1", "c2")]);
    }

    #[test]
    fn test_veto_and_unfocusable() {
        let rows = vec![Row::new("r0", vec![Cell::header("h"), Cell::text("t")])];
        let s = state(&GridProps::new(rows, vec![Column::new("a"), Column::new("b")]));
        let mut host = RecordingHost {
            veto_focus: true,
            ..RecordingHost::default()
        };
        let vp = Viewport::default();
        let mut cx = Context { host: &mut host, viewport: &vp };
        let t = loc(&s, 0, 1);
        let s = focus_location(s, &t, true, &mut cx);
        assert!(s.focused_location.is_none());

        let mut host = RecordingHost::default();
        let mut cx = Context { host: &mut host, viewport: &vp };
        let h = loc(&s, 0, 0);
        let s = focus_location(s, &h, true, &mut cx);
        assert!(s.focused_location.is_none());
    }

    #[test]
    fn test_pending_edit_is_committed() {
        let s = state(&number_props(2, 2));
        let mut host = RecordingHost::default();
        let vp = Viewport::default();
        let mut cx = Context { host: &mut host, viewport: &vp };
        let a = loc(&s, 0, 0);
        let mut s = focus_location(s, &a, true, &mut cx);
        s.currently_edited_cell = Some(Cell::text("42"));
        let b = loc(&s, 1, 1);
        let s = focus_location(s, &b, true, &mut cx);
        assert_eq!(s.queued_changes.len(), 1);
        assert_eq!(s.queued_changes[0].new_cell.text, "42");
        assert!(s.currently_edited_cell.is_none());
    }

    #[test]
    fn test_forced_focus_pins_location() {
        let mut props = number_props(3, 3);
        props.focus_location = Some(CellLocation::new("r2", "c2"));
        let s = state(&props);
        assert!(s.focused_location.as_ref().unwrap().same_cell(&loc(&s, 2, 2)));
        let mut host = RecordingHost::default();
        let vp = Viewport::default();
        let mut cx = Context { host: &mut host, viewport: &vp };
        let other = loc(&s, 0, 0);
        let s = focus_location(s, &other, true, &mut cx);
        assert!(s.focused_location.as_ref().unwrap().same_cell(&loc(&s, 2, 2)));
    }
}
