//! Selection transitions for range, row and column modes.

use super::GridState;
use crate::layout::{GridColumn, GridRow, Location, Range};
use crate::types::SelectionMode;

/// Select `range`. With `incremental` (and already in range mode) the range
/// is added to the selection and becomes active; otherwise it replaces it.
pub fn select_range(mut state: GridState, range: Range, incremental: bool) -> GridState {
    let keep = incremental && state.selection_mode == SelectionMode::Range;
    if !keep {
        state.selected_ranges.clear();
    }
    state.selected_ranges.push(range);
    state.active_selected_range_idx = state.selected_ranges.len() - 1;
    state.selection_mode = SelectionMode::Range;
    state.selected_indexes.clear();
    state.selected_ids.clear();
    state
}

/// Replace the active range.
pub fn update_active_selected_range(mut state: GridState, range: Range) -> GridState {
    match state.selected_ranges.get_mut(state.active_selected_range_idx) {
        Some(active) => *active = range,
        None => {
            state.selected_ranges.push(range);
            state.active_selected_range_idx = state.selected_ranges.len() - 1;
        }
    }
    state.selection_mode = SelectionMode::Range;
    state.selected_ids.clear();
    state.selected_indexes.clear();
    state
}

/// Collapse the selection to the cell at `location` (its whole span).
pub fn reset_selection(state: GridState, location: &Location) -> GridState {
    let range = state.matrix.span_range(location);
    select_range(state, range, false)
}

pub fn select_one_column(mut state: GridState, column: &GridColumn, incremental: bool) -> GridState {
    let keep = incremental && state.selection_mode == SelectionMode::Column;
    if !keep {
        state.selected_indexes.clear();
        state.selected_ids.clear();
    }
    state.selected_indexes.push(column.idx);
    state.selected_ids.push(column.column_id.clone());
    state.selection_mode = SelectionMode::Column;
    update_selected_columns(state)
}

pub fn unselect_one_column(mut state: GridState, column: &GridColumn) -> GridState {
    state.selected_indexes.retain(|&i| i != column.idx);
    state.selected_ids.retain(|id| *id != column.column_id);
    update_selected_columns(state)
}

/// Select every column between `first` and `last` inclusive.
pub fn select_multiple_columns(
    mut state: GridState,
    first: &GridColumn,
    last: &GridColumn,
    incremental: bool,
) -> GridState {
    let keep = incremental && state.selection_mode == SelectionMode::Column;
    if !keep {
        state.selected_indexes.clear();
        state.selected_ids.clear();
    }
    let band = state.matrix.column_band(first.idx, last.idx);
    for column in &band.columns {
        if !state.selected_indexes.contains(&column.idx) {
            state.selected_indexes.push(column.idx);
            state.selected_ids.push(column.column_id.clone());
        }
    }
    state.selection_mode = SelectionMode::Column;
    update_selected_columns(state)
}

pub fn select_one_row(mut state: GridState, row: &GridRow, incremental: bool) -> GridState {
    let keep = incremental && state.selection_mode == SelectionMode::Row;
    if !keep {
        state.selected_indexes.clear();
        state.selected_ids.clear();
    }
    state.selected_indexes.push(row.idx);
    state.selected_ids.push(row.row_id.clone());
    state.selection_mode = SelectionMode::Row;
    update_selected_rows(state)
}

pub fn unselect_one_row(mut state: GridState, row: &GridRow) -> GridState {
    state.selected_indexes.retain(|&i| i != row.idx);
    state.selected_ids.retain(|id| *id != row.row_id);
    update_selected_rows(state)
}

pub fn select_multiple_rows(mut state: GridState, first: &GridRow, last: &GridRow, incremental: bool) -> GridState {
    let keep = incremental && state.selection_mode == SelectionMode::Row;
    if !keep {
        state.selected_indexes.clear();
        state.selected_ids.clear();
    }
    let band = state.matrix.row_band(first.idx, last.idx);
    for row in &band.rows {
        if !state.selected_indexes.contains(&row.idx) {
            state.selected_indexes.push(row.idx);
            state.selected_ids.push(row.row_id.clone());
        }
    }
    state.selection_mode = SelectionMode::Row;
    update_selected_rows(state)
}

/// Rebuild column-mode ranges from `selected_ids`: ids are re-resolved
/// against the current matrix, sorted, and grouped into contiguous runs.
pub fn update_selected_columns(mut state: GridState) -> GridState {
    let mut columns: Vec<&GridColumn> = state
        .matrix
        .columns
        .iter()
        .filter(|c| state.selected_ids.contains(&c.column_id))
        .collect();
    columns.sort_by_key(|c| c.idx);

    let ranges: Vec<Range> = contiguous_runs(columns.iter().map(|c| c.idx))
        .into_iter()
        .map(|(from, to)| state.matrix.column_band(from, to))
        .collect();
    let focused = state.focused_location.as_ref().map(|l| l.column.idx);
    state.active_selected_range_idx = focused
        .and_then(|idx| ranges.iter().position(|r| r.contains_column(idx)))
        .unwrap_or(0);
    state.selected_indexes = columns.iter().map(|c| c.idx).collect();
    state.selected_ids = columns.iter().map(|c| c.column_id.clone()).collect();
    state.selected_ranges = ranges;
    state.selection_mode = SelectionMode::Column;
    state
}

/// Row-mode counterpart of [`update_selected_columns`].
pub fn update_selected_rows(mut state: GridState) -> GridState {
    let mut rows: Vec<&GridRow> = state
        .matrix
        .rows
        .iter()
        .filter(|r| state.selected_ids.contains(&r.row_id))
        .collect();
    rows.sort_by_key(|r| r.idx);

    let ranges: Vec<Range> = contiguous_runs(rows.iter().map(|r| r.idx))
        .into_iter()
        .map(|(from, to)| state.matrix.row_band(from, to))
        .collect();
    let focused = state.focused_location.as_ref().map(|l| l.row.idx);
    state.active_selected_range_idx = focused
        .and_then(|idx| ranges.iter().position(|r| r.contains_row(idx)))
        .unwrap_or(0);
    state.selected_indexes = rows.iter().map(|r| r.idx).collect();
    state.selected_ids = rows.iter().map(|r| r.row_id.clone()).collect();
    state.selected_ranges = ranges;
    state.selection_mode = SelectionMode::Row;
    state
}

/// Group sorted indexes into inclusive `(from, to)` runs.
fn contiguous_runs(sorted: impl Iterator<Item = usize>) -> Vec<(usize, usize)> {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for idx in sorted {
        match runs.last_mut() {
            Some((_, to)) if *to + 1 == idx => *to = idx,
            _ => runs.push((idx, idx)),
        }
    }
    runs
}
