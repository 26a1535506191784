//! Pointer interaction modes.
//!
//! The grid is always in exactly one [`Behavior`]. Only the default
//! behavior reacts to pointer-down by picking the mode for the gesture;
//! the chosen mode then receives every event until pointer-up, after which
//! the grid falls back to [`Behavior::Default`]. Events a mode does not
//! handle pass through unchanged. A pointer-down that arrives while a
//! gesture is still running abandons it and starts over from the default.

mod cell_selection;
mod column_reorder;
mod column_selection;
mod default;
mod fill_handle;
mod resize_column;
mod row_reorder;
mod row_selection;

pub use cell_selection::CellSelectionBehavior;
pub use column_reorder::ColumnReorderBehavior;
pub use column_selection::ColumnSelectionBehavior;
pub use fill_handle::{FillDirection, FillHandleBehavior};
pub use resize_column::ResizeColumnBehavior;
pub use row_reorder::RowReorderBehavior;
pub use row_selection::RowSelectionBehavior;

use crate::events::{KeyEvent, PointerEvent};
use crate::layout::{grid_offsets, sticky_offset, visible_size, FavorScroll, Location, PointerLocation};
use crate::state::{
    handle_composition_end, handle_double_click, handle_key_down, handle_key_up, Context, GridState,
};
use crate::types::SelectionMode;

/// Everything a behavior can be asked to handle.
#[derive(Debug, Clone, Copy)]
pub enum GridEvent<'a> {
    PointerDown(&'a PointerEvent, &'a PointerLocation),
    /// The pointer moved onto a different cell
    PointerEnter(&'a PointerEvent, &'a PointerLocation),
    PointerMove(&'a PointerEvent, &'a PointerLocation),
    PointerUp(&'a PointerEvent, &'a PointerLocation),
    DoubleClick(&'a PointerEvent, &'a Location),
    ContextMenu(&'a PointerEvent),
    KeyDown(&'a KeyEvent),
    KeyUp(&'a KeyEvent),
    CompositionEnd(&'a str),
}

#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    Default,
    CellSelection(CellSelectionBehavior),
    FillHandle(FillHandleBehavior),
    ResizeColumn(ResizeColumnBehavior),
    ColumnSelection(ColumnSelectionBehavior),
    RowSelection(RowSelectionBehavior),
    ColumnReorder(ColumnReorderBehavior),
    RowReorder(RowReorderBehavior),
}

impl Behavior {
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Axes on which pointer resolution prefers the scrollable body while
    /// this gesture runs.
    pub fn favor_scroll(&self) -> FavorScroll {
        match self {
            Self::Default => FavorScroll::None,
            Self::CellSelection(_) | Self::FillHandle(_) => FavorScroll::Both,
            Self::ResizeColumn(_) | Self::ColumnSelection(_) | Self::ColumnReorder(_) => FavorScroll::Horizontal,
            Self::RowSelection(_) | Self::RowReorder(_) => FavorScroll::Vertical,
        }
    }

    /// Feed one event through the current mode. Returns the mode for the
    /// next event alongside the new state.
    pub fn handle(self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> (Behavior, GridState) {
        match (self, event) {
            // The pointer-up of the previous gesture never arrived.
            (stale, GridEvent::PointerDown(..)) if !stale.is_default() => {
                tracing::debug!(behavior = stale.name(), "abandoning unfinished gesture");
                let mut state = state;
                state.line = None;
                state.shadow = None;
                Self::Default.handle(event, state, cx)
            }
            (Self::Default, GridEvent::PointerDown(ev, loc)) => {
                let mut state = state;
                state.context_menu = None;
                let next = default::select_behavior(ev, loc, &state, cx);
                tracing::debug!(behavior = next.name(), "pointer down");
                next.forward(event, state, cx)
            }
            (Self::Default, GridEvent::DoubleClick(_, loc)) => (Self::Default, handle_double_click(state, loc, cx)),
            (Self::Default, GridEvent::KeyDown(ev)) => (Self::Default, handle_key_down(state, ev, cx)),
            (Self::Default, GridEvent::KeyUp(ev)) => (Self::Default, handle_key_up(state, ev, cx)),
            (Self::Default, GridEvent::CompositionEnd(text)) => (Self::Default, handle_composition_end(state, text)),
            (Self::Default, GridEvent::ContextMenu(ev)) => {
                (Self::Default, default::handle_context_menu(state, ev, cx))
            }
            (behavior @ Self::Default, _) => (behavior, state),
            (gesture, event) => gesture.forward(event, state, cx),
        }
    }

    /// Hand `event` to the running gesture.
    fn forward(self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> (Behavior, GridState) {
        match self {
            Self::Default => (self, state),
            Self::CellSelection(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::CellSelection(b).after(event), state)
            }
            Self::FillHandle(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::FillHandle(b).after(event), state)
            }
            Self::ResizeColumn(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::ResizeColumn(b).after(event), state)
            }
            Self::ColumnSelection(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::ColumnSelection(b).after(event), state)
            }
            Self::RowSelection(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::RowSelection(b).after(event), state)
            }
            Self::ColumnReorder(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::ColumnReorder(b).after(event), state)
            }
            Self::RowReorder(mut b) => {
                let state = b.handle(event, state, cx);
                (Self::RowReorder(b).after(event), state)
            }
        }
    }

    /// A finished gesture hands control back to the default behavior.
    fn after(self, event: GridEvent<'_>) -> Self {
        match event {
            GridEvent::PointerUp(..) => Self::Default,
            _ => self,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::CellSelection(_) => "cell-selection",
            Self::FillHandle(_) => "fill-handle",
            Self::ResizeColumn(_) => "resize-column",
            Self::ColumnSelection(_) => "column-selection",
            Self::RowSelection(_) => "row-selection",
            Self::ColumnReorder(_) => "column-reorder",
            Self::RowReorder(_) => "row-reorder",
        }
    }
}

/// End of a selection gesture. The host may veto the result, which drops
/// the range the gesture produced.
pub(crate) fn finish_selection(mut state: GridState, cx: &mut Context<'_>) -> GridState {
    if cx.host.on_selection_changing(&state.selected_ranges) {
        cx.host.on_selection_changed(&state.selected_ranges);
        return state;
    }
    if state.active_selected_range_idx < state.selected_ranges.len() {
        state.selected_ranges.remove(state.active_selected_range_idx);
    }
    state.active_selected_range_idx = state.selected_ranges.len().saturating_sub(1);
    match state.selection_mode {
        SelectionMode::Column => {
            let columns = state.selected_ranges.iter().flat_map(|r| &r.columns);
            (state.selected_indexes, state.selected_ids) = columns.map(|c| (c.idx, c.column_id.clone())).unzip();
        }
        SelectionMode::Row => {
            let rows = state.selected_ranges.iter().flat_map(|r| &r.rows);
            (state.selected_indexes, state.selected_ids) = rows.map(|r| (r.idx, r.row_id.clone())).unzip();
        }
        SelectionMode::Range => {}
    }
    state
}

/// Offset that maps a column's pane-relative `left` into grid coordinates:
/// the left band width for scrollable columns, the right band's position for
/// right-pinned ones, and the current horizontal scroll for left-pinned ones.
pub(crate) fn column_pane_offset(state: &GridState, column_idx: usize, cx: &Context<'_>) -> f32 {
    let (scroll_left, _) = cx.viewport.scroll_offset();
    let (left, _) = grid_offsets(cx.viewport);
    let ranges = &state.matrix.ranges;
    if state.matrix.scrollable_range.contains_column(column_idx) {
        ranges.left.width()
    } else if ranges.right.contains_column(column_idx) {
        visible_size(cx.viewport, &state.matrix).width + sticky_offset(scroll_left, left) - ranges.right.width()
    } else {
        scroll_left
    }
}

/// Row counterpart of [`column_pane_offset`].
pub(crate) fn row_pane_offset(state: &GridState, row_idx: usize, cx: &Context<'_>) -> f32 {
    let (_, scroll_top) = cx.viewport.scroll_offset();
    let (_, top) = grid_offsets(cx.viewport);
    let ranges = &state.matrix.ranges;
    if state.matrix.scrollable_range.contains_row(row_idx) {
        ranges.top.height()
    } else if ranges.bottom.contains_row(row_idx) {
        visible_size(cx.viewport, &state.matrix).height + sticky_offset(scroll_top, top) - ranges.bottom.height()
    } else {
        scroll_top
    }
}
