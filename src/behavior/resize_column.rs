use super::{column_pane_offset, GridEvent};
use crate::layout::{GridColumn, PointerLocation};
use crate::state::{Context, GridState, GuideLine, LineOrientation};

/// Dragging a header's right edge. A vertical guide line follows the
/// pointer and the host is told the new width on release.
#[derive(Debug, Clone, Default)]
pub struct ResizeColumnBehavior {
    resized_column: Option<GridColumn>,
    initial_viewport_x: f32,
}

impl ResizeColumnBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerDown(_, loc) => {
                self.resized_column = Some(loc.column.clone());
                self.initial_viewport_x = loc.viewport_x;
                state
            }
            GridEvent::PointerMove(_, loc) | GridEvent::PointerEnter(_, loc) => {
                if let Some(position) = self.line_position(loc, &state, cx) {
                    state.line = Some(GuideLine {
                        position,
                        orientation: LineOrientation::Vertical,
                    });
                }
                state
            }
            GridEvent::PointerUp(_, loc) => self.pointer_up(loc, state, cx),
            _ => state,
        }
    }

    /// The line sticks at the minimum width while the pointer is left of it.
    fn line_position(&self, location: &PointerLocation, state: &GridState, cx: &Context<'_>) -> Option<f32> {
        let resized = self.resized_column.as_ref()?;
        let min = state.matrix.min_column_width();
        let past_min_inside = location.column.idx == resized.idx && location.cell_x > min;
        if !past_min_inside && location.column.idx <= resized.idx {
            Some(min + resized.left + column_pane_offset(state, resized.idx, cx))
        } else {
            Some(location.viewport_x)
        }
    }

    fn pointer_up(&mut self, location: &PointerLocation, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        state.line = None;
        let Some(resized) = self.resized_column.take() else {
            return state;
        };
        let width = (resized.width + location.viewport_x - self.initial_viewport_x).max(state.matrix.min_column_width());
        tracing::debug!(column = %resized.column_id, width, "column resized");
        cx.host.on_column_resized(&resized.column_id, width, &state.selected_ids);

        if let Some(focused) = state.focused_location.as_mut() {
            if focused.column.idx == resized.idx {
                focused.column.width = width;
                focused.column.right = focused.column.left + width;
            }
        }
        state
    }
}
