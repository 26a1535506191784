//! Deriving interaction state from a grid declaration.

use super::{
    focus_location, reset_selection, update_selected_columns, update_selected_rows, Context, GridState,
};
use crate::config::GridProps;
use crate::error::Result;
use crate::layout::{recalc_visible_range, responsive_sticky, CellMatrix, CellMatrixBuilder, StickyCounts};
use crate::templates::CellTemplates;
use crate::types::{CellLocation, Highlight, SelectionMode};

/// Build the state for `props`, carrying selection and focus over from
/// `previous` where they still resolve.
///
/// # Errors
/// Any configuration error from building the matrix or validating cells
/// against `templates`. Callers keep their previous state in that case.
pub fn derive_state(
    props: &GridProps,
    previous: Option<GridState>,
    templates: CellTemplates,
    cx: &mut Context<'_>,
) -> Result<GridState> {
    let prepared = prepare_matrix(props, &templates, cx)?;
    Ok(apply_props(props, previous, prepared, templates, cx))
}

/// The fallible half of [`derive_state`]: build and validate the matrix
/// without touching any existing state.
pub(crate) fn prepare_matrix(
    props: &GridProps,
    templates: &CellTemplates,
    cx: &Context<'_>,
) -> Result<(CellMatrix, StickyCounts)> {
    let sticky = responsive_sticky(
        props.sticky_counts(),
        &props.rows,
        &props.columns,
        cx.viewport.client_size(),
        props.breakpoints(),
    );
    let matrix = CellMatrixBuilder::new(props.rows.clone(), props.columns.clone())
        .sticky(sticky)
        .min_column_width(props.min_column_width)
        .build()?;
    validate_cells(&matrix, templates)?;
    Ok((matrix, sticky))
}

/// Carry `previous` over onto a freshly prepared matrix.
pub(crate) fn apply_props(
    props: &GridProps,
    previous: Option<GridState>,
    (matrix, sticky): (CellMatrix, StickyCounts),
    templates: CellTemplates,
    cx: &mut Context<'_>,
) -> GridState {
    let mut state = previous.unwrap_or_default();
    state.matrix = matrix;
    state.templates = templates;
    state.sticky = sticky;
    state.platform = props.platform;
    state.enable_fill_handle = props.enable_fill_handle;
    state.enable_range_selection = props.enable_range_selection;
    state.enable_row_selection = props.enable_row_selection;
    state.enable_column_selection = props.enable_column_selection;
    state.move_right_on_enter = props.move_right_on_enter;
    state.disable_virtual_scrolling = props.disable_virtual_scrolling;
    state.forced_focus = props.focus_location.clone();
    state.highlights = valid_highlights(&state.matrix, &props.highlights);

    state = update_selections(state);
    if state.currently_edited_cell.is_none() {
        state.focused_location = state
            .focused_location
            .take()
            .and_then(|l| state.matrix.validate_location(&l));
    }

    let visible = recalc_visible_range(&state.matrix, cx.viewport, state.disable_virtual_scrolling);
    state.visible_range = visible.range;
    state.scroll_boundaries = visible.boundaries;

    if state.focused_location.is_none() {
        if let Some(initial) = &props.initial_focus_location {
            state = apply_focus_request(state, initial, "initialFocusLocation", cx, |_| true);
        }
    }
    let focus_differs = match (&props.focus_location, &state.focused_location) {
        (Some(wanted), Some(focused)) => *wanted != focused.to_cell_location(),
        (Some(_), None) => true,
        (None, _) => false,
    };
    if focus_differs {
        if let Some(forced) = &props.focus_location {
            state = apply_focus_request(state, forced, "focusLocation", cx, |s| s.selected_ranges.len() <= 1);
        }
    }

    tracing::debug!(
        rows = state.matrix.rows.len(),
        columns = state.matrix.columns.len(),
        "derived grid state"
    );
    state
}

fn validate_cells(matrix: &CellMatrix, templates: &CellTemplates) -> Result<()> {
    for row in matrix.source_rows() {
        for (cell, column) in row.cells.iter().zip(matrix.source_columns()) {
            if let Err(e) = templates.compatible(cell) {
                tracing::error!(
                    row = %row.row_id,
                    column = %column.column_id,
                    error = %e,
                    "invalid cell declaration"
                );
                return Err(e);
            }
        }
    }
    Ok(())
}

fn valid_highlights(matrix: &CellMatrix, highlights: &[Highlight]) -> Vec<Highlight> {
    let valid: Vec<Highlight> = highlights
        .iter()
        .filter(|h| matrix.row_idx(&h.row_id).is_some() && matrix.column_idx(&h.column_id).is_some())
        .cloned()
        .collect();
    if valid.len() != highlights.len() {
        tracing::error!("Data inconsistency in \"highlights\" prop");
    }
    valid
}

fn update_selections(mut state: GridState) -> GridState {
    match state.selection_mode {
        SelectionMode::Row if !state.selected_ids.is_empty() => update_selected_rows(state),
        SelectionMode::Column if !state.selected_ids.is_empty() => update_selected_columns(state),
        _ => {
            let ranges = std::mem::take(&mut state.selected_ranges);
            state.selected_ranges = ranges
                .iter()
                .filter_map(|r| state.matrix.validate_range(r))
                .collect();
            if state.active_selected_range_idx >= state.selected_ranges.len() {
                state.active_selected_range_idx = state.selected_ranges.len().saturating_sub(1);
            }
            state
        }
    }
}

/// Focus a location named by ids. Unknown ids are logged and ignored.
/// When nothing was focused before, the selection collapses to the new
/// focus if `reset_if` allows it.
fn apply_focus_request(
    mut state: GridState,
    request: &CellLocation,
    prop: &str,
    cx: &mut Context<'_>,
    reset_if: impl Fn(&GridState) -> bool,
) -> GridState {
    let was_focused = state.focused_location.is_some();
    match state.matrix.get_location_by_id(&request.row_id, &request.column_id) {
        Ok(location) => state = focus_location(state, &location, true, cx),
        Err(_) => {
            tracing::error!("Data inconsistency in \"{prop}\" prop");
            return state;
        }
    }
    if !was_focused && reset_if(&state) {
        if let Some(location) = state.focused_location.clone() {
            state = reset_selection(state, &location);
        }
    }
    state
}
