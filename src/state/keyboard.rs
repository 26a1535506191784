//! Keyboard, double-click and IME handling for the focused cell.

use super::{
    focus_location, select_multiple_columns, select_multiple_rows, select_range, try_append_change,
    update_active_selected_range, wipe_selected_ranges, Context, GridState,
};
use crate::events::{Key, KeyEvent};
use crate::layout::{visible_size, CellMatrix, GridRow, Location};
use crate::types::SelectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Up,
    Down,
    Left,
    Right,
    RowStart,
    RowEnd,
    GridStart,
    GridEnd,
    PageUp,
    PageDown,
}

pub fn handle_key_down(mut state: GridState, event: &KeyEvent, cx: &mut Context<'_>) -> GridState {
    let shift = event.modifiers.shift;
    let selection_key = event.modifiers.selection_key(state.platform);

    if let Some(edited) = state.currently_edited_cell.take() {
        let step = match event.key {
            Key::Escape => return state,
            Key::Enter => Some(enter_step(&state, shift)),
            Key::Tab => Some(if shift { Step::Left } else { Step::Right }),
            _ => None,
        };
        let Some(step) = step else {
            state.currently_edited_cell = Some(edited);
            return state;
        };
        if let Some(focused) = state.focused_location.clone() {
            state = try_append_change(state, &focused, &edited);
            return move_focus(state, step, event.key == Key::Tab, cx);
        }
        return state;
    }

    if state.focused_location.is_none() {
        return state;
    }
    match &event.key {
        Key::Char('a' | 'A') if selection_key => {
            let all = state.matrix.full_range();
            select_range(state, all, false)
        }
        // clipboard shortcuts are routed by the host
        Key::Char(_) if selection_key => state,
        Key::Backspace | Key::Delete => wipe_selected_ranges(state),
        Key::Escape => {
            state.copy_range = None;
            state
        }
        Key::Tab => move_focus(state, if shift { Step::Left } else { Step::Right }, true, cx),
        Key::Enter => {
            let (handled, state) = apply_template_key(state, event);
            if handled {
                state
            } else {
                let step = enter_step(&state, shift);
                move_focus(state, step, false, cx)
            }
        }
        key => match navigation_step(key, event.modifiers.ctrl || event.modifiers.meta) {
            Some(step) if shift => extend_selection(state, step, cx),
            Some(step) => move_focus(state, step, false, cx),
            None => apply_template_key(state, event).1,
        },
    }
}

/// Navigation keys report the settled selection on release.
pub fn handle_key_up(state: GridState, event: &KeyEvent, cx: &mut Context<'_>) -> GridState {
    if event.key.is_navigation() && state.currently_edited_cell.is_none() {
        cx.host.on_selection_changed(&state.selected_ranges);
    }
    state
}

/// Double click on the focused cell opens its editor.
pub fn handle_double_click(state: GridState, location: &Location, _cx: &mut Context<'_>) -> GridState {
    let on_focused = state
        .focused_location
        .as_ref()
        .is_some_and(|f| state.matrix.span_origin(f).same_cell(&state.matrix.span_origin(location)));
    if !on_focused {
        return state;
    }
    apply_template_key(state, &KeyEvent::new(Key::F2)).1
}

/// IME composition finished on the focused cell.
pub fn handle_composition_end(mut state: GridState, text: &str) -> GridState {
    if state.currently_edited_cell.is_some() {
        return state;
    }
    let Some(focused) = state.focused_location.clone() else {
        return state;
    };
    let outcome = match state.compatible_cell(&focused) {
        Ok((cell, template)) if !cell.non_editable => template.handle_composition_end(&cell, text),
        Ok(_) => return state,
        Err(e) => {
            tracing::error!(error = %e, "composition on invalid cell");
            return state;
        }
    };
    if outcome.enable_edit_mode {
        state.currently_edited_cell = Some(outcome.cell);
    }
    state
}

/// Hand the key to the focused cell's template. Returns whether the
/// template did anything with it.
fn apply_template_key(mut state: GridState, event: &KeyEvent) -> (bool, GridState) {
    let Some(focused) = state.focused_location.clone() else {
        return (false, state);
    };
    let (cell, outcome) = match state.compatible_cell(&focused) {
        Ok((cell, template)) => {
            let outcome = template.handle_key_down(&cell, event);
            (cell, outcome)
        }
        Err(e) => {
            tracing::error!(error = %e, "key on invalid cell");
            return (false, state);
        }
    };
    if outcome.enable_edit_mode && !cell.non_editable {
        state.currently_edited_cell = Some(outcome.cell);
        return (true, state);
    }
    if outcome.cell != cell {
        return (true, try_append_change(state, &focused, &outcome.cell));
    }
    (false, state)
}

fn enter_step(state: &GridState, shift: bool) -> Step {
    match (state.move_right_on_enter, shift) {
        (true, false) => Step::Right,
        (true, true) => Step::Left,
        (false, false) => Step::Down,
        (false, true) => Step::Up,
    }
}

fn navigation_step(key: &Key, jump: bool) -> Option<Step> {
    Some(match key {
        Key::ArrowUp => Step::Up,
        Key::ArrowDown => Step::Down,
        Key::ArrowLeft => Step::Left,
        Key::ArrowRight => Step::Right,
        Key::Home if jump => Step::GridStart,
        Key::End if jump => Step::GridEnd,
        Key::Home => Step::RowStart,
        Key::End => Step::RowEnd,
        Key::PageUp => Step::PageUp,
        Key::PageDown => Step::PageDown,
        _ => return None,
    })
}

fn move_focus(state: GridState, step: Step, wrap: bool, cx: &mut Context<'_>) -> GridState {
    let Some(focused) = state.focused_location.clone() else {
        return state;
    };
    let page = page_height(&state, cx);
    let target = step_from(&state.matrix, &focused, step, page).or_else(|| {
        if wrap {
            wrap_row(&state.matrix, &focused, step)
        } else {
            None
        }
    });
    match target {
        Some(target) => focus_location(state, &target, true, cx),
        None => state,
    }
}

/// Shift+navigation grows the selection from the focused cell. Row and
/// column modes extend whole rows/columns along their own axis.
fn extend_selection(state: GridState, step: Step, cx: &mut Context<'_>) -> GridState {
    let Some(focused) = state.focused_location.clone() else {
        return state;
    };
    let page = page_height(&state, cx);
    let Some(active) = state.active_selected_range().cloned() else {
        return state;
    };
    let (Some(first), Some(last)) = (active.first(), active.last()) else {
        return state;
    };
    let far_row = if focused.row.idx <= first.row.idx { last.row.clone() } else { first.row.clone() };
    let far_column = if focused.column.idx <= first.column.idx {
        last.column.clone()
    } else {
        first.column.clone()
    };
    let far = Location::new(far_row, far_column);
    let Some(next) = step_index(&state.matrix, &far, step, page) else {
        return state;
    };

    match state.selection_mode {
        SelectionMode::Row if matches!(step, Step::Up | Step::Down | Step::PageUp | Step::PageDown) => {
            select_multiple_rows(state, &focused.row, &next.row, false)
        }
        SelectionMode::Column if matches!(step, Step::Left | Step::Right | Step::RowStart | Step::RowEnd) => {
            select_multiple_columns(state, &focused.column, &next.column, false)
        }
        _ => {
            let range = state.matrix.get_range(&focused, &next);
            update_active_selected_range(state, range)
        }
    }
}

fn page_height(state: &GridState, cx: &Context<'_>) -> f32 {
    let ranges = &state.matrix.ranges;
    visible_size(cx.viewport, &state.matrix).height - ranges.top.height() - ranges.bottom.height()
}

/// Neighbor of the whole (possibly spanned) cell at `from`, snapped to the
/// origin of whatever span it lands in.
fn step_from(matrix: &CellMatrix, from: &Location, step: Step, page: f32) -> Option<Location> {
    let span = matrix.span_range(from);
    let edge = match step {
        Step::Up | Step::Left | Step::PageUp => span.first()?,
        Step::Down | Step::Right | Step::PageDown => span.last()?,
        _ => from.clone(),
    };
    let edge = Location::new(
        if matches!(step, Step::Left | Step::Right) { from.row.clone() } else { edge.row },
        if matches!(step, Step::Up | Step::Down | Step::PageUp | Step::PageDown) {
            from.column.clone()
        } else {
            edge.column
        },
    );
    let next = step_index(matrix, &edge, step, page)?;
    Some(matrix.span_origin(&next))
}

/// One step on plain indexes; `None` at the grid edge.
fn step_index(matrix: &CellMatrix, from: &Location, step: Step, page: f32) -> Option<Location> {
    let last_row = matrix.rows.len().checked_sub(1)?;
    let last_col = matrix.columns.len().checked_sub(1)?;
    let (r, c) = (from.row.idx, from.column.idx);
    let (r, c) = match step {
        Step::Up => (r.checked_sub(1)?, c),
        Step::Down => (r + 1, c),
        Step::Left => (r, c.checked_sub(1)?),
        Step::Right => (r, c + 1),
        Step::RowStart => (r, 0),
        Step::RowEnd => (r, last_col),
        Step::GridStart => (0, 0),
        Step::GridEnd => (last_row, last_col),
        Step::PageUp => (page_row(&matrix.rows, r, page, false), c),
        Step::PageDown => (page_row(&matrix.rows, r, page, true), c),
    };
    if (r, c) == (from.row.idx, from.column.idx) || r > last_row || c > last_col {
        return None;
    }
    matrix.get_location(r, c)
}

/// Tab past the end of a row continues on the next (or previous) row.
fn wrap_row(matrix: &CellMatrix, from: &Location, step: Step) -> Option<Location> {
    let last_col = matrix.columns.len().checked_sub(1)?;
    let location = match step {
        Step::Right => matrix.get_location(from.row.idx + 1, 0)?,
        Step::Left => matrix.get_location(from.row.idx.checked_sub(1)?, last_col)?,
        _ => return None,
    };
    Some(matrix.span_origin(&location))
}

/// Row reached by moving one page from `from`; always at least one row.
fn page_row(rows: &[GridRow], from: usize, page: f32, down: bool) -> usize {
    let mut travelled = 0.0;
    let mut idx = from;
    loop {
        let next = if down { idx.checked_add(1) } else { idx.checked_sub(1) };
        let Some(row) = next.and_then(|n| rows.get(n)) else {
            break;
        };
        if idx != from && travelled + row.height > page {
            break;
        }
        travelled += row.height;
        idx = row.idx;
    }
    idx
}
