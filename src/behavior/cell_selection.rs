use super::default::handle_context_menu;
use super::{finish_selection, GridEvent};
use crate::events::{PointerEvent, PointerTarget};
use crate::layout::Location;
use crate::state::{focus_location, select_range, update_active_selected_range, Context, GridState};
use crate::types::SelectionMode;

/// Click to focus, drag or shift-click to select a range, selection key
/// to work with several ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellSelectionBehavior;

impl CellSelectionBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerDown(ev, loc) => pointer_down(ev, &loc.location(), state, cx),
            GridEvent::PointerEnter(ev, loc) => pointer_enter(ev, &loc.location(), state, cx),
            GridEvent::PointerUp(..) => finish_selection(state, cx),
            GridEvent::ContextMenu(ev) => handle_context_menu(state, ev, cx),
            _ => state,
        }
    }
}

fn pointer_down(event: &PointerEvent, location: &Location, mut state: GridState, cx: &mut Context<'_>) -> GridState {
    if event.target == PointerTarget::Content {
        return state;
    }
    let selection_key = event.modifiers.selection_key(state.platform);
    let focused = state.focused_location.clone();

    match focused {
        Some(focused) if state.enable_range_selection && event.modifiers.shift => {
            let range = state.matrix.get_range(&focused, location);
            if selection_key && state.selection_mode == SelectionMode::Range {
                update_active_selected_range(state, range)
            } else {
                select_range(state, range, false)
            }
        }
        _ if state.enable_range_selection && selection_key => {
            let pointed = state.selected_ranges.iter().position(|r| r.contains(location));
            match pointed {
                Some(idx) => {
                    state = focus_location(state, location, false, cx);
                    state.active_selected_range_idx = idx;
                    state
                }
                // Only cells that cannot take focus open a new range here.
                None => match state.compatible_cell(location) {
                    Ok((cell, template)) if !template.is_focusable(&cell) => {
                        let range = state.matrix.span_range(location);
                        state = select_range(state, range, true);
                        focus_location(state, location, false, cx)
                    }
                    Ok(_) => state,
                    Err(e) => {
                        tracing::error!(error = %e, "cannot add range at location");
                        state
                    }
                },
            }
        }
        _ => focus_location(state, location, true, cx),
    }
}

fn pointer_enter(event: &PointerEvent, location: &Location, state: GridState, cx: &mut Context<'_>) -> GridState {
    if !state.enable_range_selection || event.target == PointerTarget::Content {
        return state;
    }
    let Some(focused) = state.focused_location.clone() else {
        return state;
    };
    let range = state.matrix.get_range(&focused, location);
    if state.selection_mode == SelectionMode::Range && is_on_clickable_area(event, &state, cx) {
        update_active_selected_range(state, range)
    } else {
        select_range(state, range, false)
    }
}

/// False over the gap between the scrollable body and a right-pinned band.
fn is_on_clickable_area(event: &PointerEvent, state: &GridState, cx: &Context<'_>) -> bool {
    let bbox = cx.viewport.bounding_box();
    let x = event.client_x - bbox.left;
    let right_width = state.matrix.ranges.right.width();
    !(x >= state.matrix.width - right_width && event.client_x < bbox.right() - right_width)
}
