use super::{row_pane_offset, GridEvent};
use crate::layout::{GridRow, PointerLocation};
use crate::state::{Context, GridState, GuideLine, LineOrientation, Shadow};
use crate::types::{DropPosition, Id};

/// Dragging selected rows. Unlike columns, rows may also be dropped onto
/// a target row (middle third), which hosts use for nesting.
#[derive(Debug, Clone, Default)]
pub struct RowReorderBehavior {
    moved: Vec<GridRow>,
    pointer_offset: f32,
    drop: Option<(Id, DropPosition)>,
}

impl RowReorderBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerDown(_, loc) => self.pointer_down(loc, state, cx),
            GridEvent::PointerMove(_, loc) | GridEvent::PointerEnter(_, loc) => self.pointer_move(loc, state, cx),
            GridEvent::PointerUp(..) => self.pointer_up(state, cx),
            _ => state,
        }
    }

    fn pointer_down(&mut self, location: &PointerLocation, mut state: GridState, cx: &Context<'_>) -> GridState {
        self.moved = state
            .selected_indexes
            .iter()
            .filter_map(|&idx| state.matrix.row(idx).cloned())
            .collect();
        self.moved.sort_by_key(|r| r.idx);
        self.drop = None;

        let Some(first) = self.moved.first() else {
            return state;
        };
        let band_top = first.top + row_pane_offset(&state, first.idx, cx);
        self.pointer_offset = location.viewport_y - band_top;
        state.shadow = Some(Shadow {
            position: band_top,
            size: self.moved.iter().map(|r| r.height).sum(),
            orientation: LineOrientation::Horizontal,
        });
        state
    }

    fn pointer_move(&mut self, location: &PointerLocation, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        if let Some(shadow) = state.shadow.as_mut() {
            let max = (state.matrix.height - shadow.size).max(0.0);
            shadow.position = (location.viewport_y - self.pointer_offset).clamp(0.0, max);
        }

        let target = &location.row;
        if self.moved.iter().any(|r| r.idx == target.idx) {
            self.drop = None;
            state.line = None;
            return state;
        }
        let position = drop_position(location.cell_y, target.height);
        let ids = self.moved_ids();
        if !cx.host.can_reorder_rows(&target.row_id, &ids, position) {
            return state;
        }
        self.drop = Some((target.row_id.clone(), position));

        let row_top = location.viewport_y - location.cell_y;
        state.line = match position {
            DropPosition::Before => Some(row_top),
            DropPosition::After => Some(row_top + target.height),
            DropPosition::On => None,
        }
        .map(|line| GuideLine {
            position: line.clamp(0.0, state.matrix.height),
            orientation: LineOrientation::Horizontal,
        });
        state
    }

    fn pointer_up(&mut self, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        state.line = None;
        state.shadow = None;
        if let Some((target, position)) = self.drop.take() {
            let ids = self.moved_ids();
            if !ids.contains(&target) {
                tracing::debug!(target = %target, moved = ids.len(), ?position, "rows reordered");
                cx.host.on_rows_reordered(&target, &ids, position);
            }
        }
        state
    }

    fn moved_ids(&self) -> Vec<Id> {
        self.moved.iter().map(|r| r.row_id.clone()).collect()
    }
}

/// Upper third before, lower third after, the rest on the row.
fn drop_position(cell_y: f32, height: f32) -> DropPosition {
    if cell_y < height / 3.0 {
        DropPosition::Before
    } else if cell_y > height * 2.0 / 3.0 {
        DropPosition::After
    } else {
        DropPosition::On
    }
}
