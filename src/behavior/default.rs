use super::{
    Behavior, CellSelectionBehavior, ColumnReorderBehavior, ColumnSelectionBehavior, FillHandleBehavior,
    ResizeColumnBehavior, RowReorderBehavior, RowSelectionBehavior,
};
use crate::events::{PointerEvent, RESIZE_HANDLE_WIDTH};
use crate::layout::PointerLocation;
use crate::state::{selected_locations, Context, ContextMenu, GridState};
use crate::types::{MenuOption, SelectionMode};

/// Pick the mode for a gesture starting at `location`, in priority order:
/// column resize, column reorder, column selection, row reorder, row
/// selection, fill handle, and plain cell selection.
pub(super) fn select_behavior(
    event: &PointerEvent,
    location: &PointerLocation,
    state: &GridState,
    _cx: &Context<'_>,
) -> Behavior {
    let selection_key = event.modifiers.selection_key(state.platform);
    let on_fill_handle = event.target.is_fill_handle();
    let column = &location.column;
    let row = &location.row;

    if event.on_resize_handle()
        && row.idx == 0
        && column.resizable
        && location.cell_x > column.width - RESIZE_HANDLE_WIDTH
    {
        Behavior::ResizeColumn(ResizeColumnBehavior::default())
    } else if state.enable_column_selection
        && row.idx == 0
        && state.selected_ids.contains(&column.column_id)
        && !selection_key
        && state.selection_mode == SelectionMode::Column
        && column.reorderable
    {
        Behavior::ColumnReorder(ColumnReorderBehavior::default())
    } else if state.enable_column_selection && row.idx == 0 && !on_fill_handle {
        Behavior::ColumnSelection(ColumnSelectionBehavior)
    } else if state.enable_row_selection
        && column.idx == 0
        && state.selected_ids.contains(&row.row_id)
        && !selection_key
        && state.selection_mode == SelectionMode::Row
        && row.reorderable
    {
        Behavior::RowReorder(RowReorderBehavior::default())
    } else if state.enable_row_selection && column.idx == 0 && !on_fill_handle {
        Behavior::RowSelection(RowSelectionBehavior)
    } else if event.on_fill_handle() && state.enable_fill_handle {
        Behavior::FillHandle(FillHandleBehavior::default())
    } else {
        Behavior::CellSelection(CellSelectionBehavior)
    }
}

/// Open the context menu at the pointer with the host's options.
pub(crate) fn handle_context_menu(mut state: GridState, event: &PointerEvent, cx: &mut Context<'_>) -> GridState {
    let (rows, columns) = match state.selection_mode {
        SelectionMode::Row => (state.selected_ids.clone(), Vec::new()),
        SelectionMode::Column => (Vec::new(), state.selected_ids.clone()),
        SelectionMode::Range => (Vec::new(), Vec::new()),
    };
    let options = cx.host.on_context_menu(
        &rows,
        &columns,
        state.selection_mode,
        MenuOption::defaults(),
        &selected_locations(&state),
    );
    state.context_menu = Some(ContextMenu {
        left: event.client_x,
        top: event.client_y,
        options,
    });
    state
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::events::{Modifiers, PointerTarget};
    use crate::layout::{PointerLocation, Viewport};
    use crate::state::fixtures::{number_props, state};
    use crate::state::select_one_column;
    use test_case::test_case;

    fn pointer(s: &GridState, row: usize, col: usize, cell_x: f32) -> PointerLocation {
        PointerLocation {
            row: s.matrix.rows[row].clone(),
            column: s.matrix.columns[col].clone(),
            viewport_x: 0.0,
            viewport_y: 0.0,
            cell_x,
            cell_y: 5.0,
        }
    }

    fn pick(s: &GridState, event: &PointerEvent, loc: &PointerLocation) -> &'static str {
        let vp = Viewport::default();
        let mut host = ();
        let cx = Context { host: &mut host, viewport: &vp };
        select_behavior(event, loc, s, &cx).name()
    }

    #[test_case(0, 1, PointerTarget::Cell => "column-selection"; "header row selects columns")]
    #[test_case(2, 0, PointerTarget::Cell => "row-selection"; "first column selects rows")]
    #[test_case(2, 2, PointerTarget::Cell => "cell-selection"; "body cell")]
    #[test_case(2, 2, PointerTarget::FillHandle => "fill-handle"; "fill handle")]
    #[test_case(0, 1, PointerTarget::FillHandle => "fill-handle"; "fill handle on header row")]
    fn test_dispatch(row: usize, col: usize, target: PointerTarget) -> &'static str {
        let s = state(&number_props(5, 5));
        let loc = pointer(&s, row, col, 50.0);
        pick(&s, &PointerEvent::at(0.0, 0.0).on(target), &loc)
    }

    #[test]
    fn test_resize_needs_resizable_column_and_grip() {
        let mut props = number_props(3, 3);
        props.columns[1] = props.columns[1].clone().resizable();
        let s = state(&props);
        let grip = PointerEvent::at(0.0, 0.0).on(PointerTarget::ResizeHandle);
        assert_eq!(pick(&s, &grip, &pointer(&s, 0, 1, 95.0)), "resize-column");
        assert_eq!(pick(&s, &grip, &pointer(&s, 0, 1, 50.0)), "column-selection");
        assert_eq!(pick(&s, &grip, &pointer(&s, 0, 0, 95.0)), "column-selection");
    }

    #[test]
    fn test_selected_reorderable_column_starts_reorder() {
        let mut props = number_props(3, 3);
        props.columns[2] = props.columns[2].clone().reorderable();
        let s = state(&props);
        let column = s.matrix.columns[2].clone();
        let s = select_one_column(s, &column, false);
        let plain = PointerEvent::at(0.0, 0.0);
        assert_eq!(pick(&s, &plain, &pointer(&s, 0, 2, 10.0)), "column-reorder");
        let with_ctrl = plain.with(Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        });
        assert_eq!(pick(&s, &with_ctrl, &pointer(&s, 0, 2, 10.0)), "column-selection");
    }
}
