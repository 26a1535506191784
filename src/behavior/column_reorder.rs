use super::{column_pane_offset, GridEvent};
use crate::layout::{GridColumn, PointerLocation};
use crate::state::{Context, GridState, GuideLine, LineOrientation, Shadow};
use crate::types::{DropPosition, Id};

/// Dragging selected columns to a new place. A shadow of the moved band
/// follows the pointer and a vertical line marks the drop point.
#[derive(Debug, Clone, Default)]
pub struct ColumnReorderBehavior {
    moved: Vec<GridColumn>,
    initial_column_idx: usize,
    /// Pointer distance from the left edge of the moved band
    pointer_offset: f32,
    drop: Option<(Id, DropPosition)>,
}

impl ColumnReorderBehavior {
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
            .filter_map(|&idx| state.matrix.column(idx).cloned())
            .collect();
        self.moved.sort_by_key(|c| c.idx);
        self.initial_column_idx = location.column.idx;
        self.drop = None;

        let Some(first) = self.moved.first() else {
            return state;
        };
        let band_left = first.left + column_pane_offset(&state, first.idx, cx);
        self.pointer_offset = location.viewport_x - band_left;
        state.shadow = Some(Shadow {
            position: band_left,
            size: self.moved.iter().map(|c| c.width).sum(),
            orientation: LineOrientation::Vertical,
        });
        state
    }

    fn pointer_move(&mut self, location: &PointerLocation, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        if let Some(shadow) = state.shadow.as_mut() {
            let max = (state.matrix.width - shadow.size).max(0.0);
            shadow.position = (location.viewport_x - self.pointer_offset).clamp(0.0, max);
        }

        let target = &location.column;
        if self.moved.iter().any(|c| c.idx == target.idx) {
            self.drop = None;
            state.line = None;
            return state;
        }
        let position = if target.idx > self.initial_column_idx {
            DropPosition::After
        } else {
            DropPosition::Before
        };
        let ids = self.moved_ids();
        if !cx.host.can_reorder_columns(&target.column_id, &ids, position) {
            return state;
        }
        self.drop = Some((target.column_id.clone(), position));

        let column_left = location.viewport_x - location.cell_x;
        let line = match position {
            DropPosition::After => column_left + target.width,
            _ => column_left,
        };
        state.line = Some(GuideLine {
            position: line.clamp(0.0, state.matrix.width),
            orientation: LineOrientation::Vertical,
        });
        state
    }

    fn pointer_up(&mut self, mut state: GridState, cx: &mut Context<'_>) -> GridState {
        state.line = None;
        state.shadow = None;
        if let Some((target, position)) = self.drop.take() {
            let ids = self.moved_ids();
            if !ids.contains(&target) {
                tracing::debug!(target = %target, moved = ids.len(), ?position, "columns reordered");
                cx.host.on_columns_reordered(&target, &ids, position);
            }
        }
        state
    }

    fn moved_ids(&self) -> Vec<Id> {
        self.moved.iter().map(|c| c.column_id.clone()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::events::PointerEvent;
    use crate::host::recording::RecordingHost;
    use crate::layout::Viewport;
    use crate::state::fixtures::{number_props, state};
    use crate::state::select_multiple_columns;

    fn header(s: &GridState, col: usize, cell_x: f32) -> PointerLocation {
        let column = s.matrix.columns[col].clone();
        PointerLocation {
            row: s.matrix.rows[0].clone(),
            viewport_x: column.left + cell_x,
            column,
            viewport_y: 5.0,
            cell_x,
            cell_y: 5.0,
        }
    }

    fn with_selected(first: usize, last: usize) -> GridState {
        let s = state(&number_props(3, 6));
        let (a, b) = (s.matrix.columns[first].clone(), s.matrix.columns[last].clone());
        select_multiple_columns(s, &a, &b, false)
    }

    #[test]
    fn test_drop_after_later_column() {
        let mut host = RecordingHost::default();
        let vp = Viewport::default();
        let mut cx = Context {
            host: &mut host,
            viewport: &vp,
        };
        let ev = PointerEvent::at(0.0, 0.0);
        let mut b = ColumnReorderBehavior::default();
        let s = with_selected(1, 2);
        let s = b.handle(GridEvent::PointerDown(&ev, &header(&s, 1, 30.0)), s, &mut cx);
        let shadow = s.shadow.unwrap();
        assert_eq!((shadow.position, shadow.size), (100.0, 200.0));

        let s = b.handle(GridEvent::PointerMove(&ev, &header(&s, 3, 50.0)), s, &mut cx);
        assert_eq!(s.shadow.unwrap().position, 320.0);
        assert_eq!(s.line.unwrap().position, 400.0);

        // the shadow never leaves the grid
        let s = b.handle(GridEvent::PointerMove(&ev, &header(&s, 5, 90.0)), s, &mut cx);
        assert_eq!(s.shadow.unwrap().position, 400.0);
        let s = b.handle(GridEvent::PointerMove(&ev, &header(&s, 3, 50.0)), s, &mut cx);

        let s = b.handle(GridEvent::PointerUp(&ev, &header(&s, 3, 50.0)), s, &mut cx);
        assert!(s.line.is_none() && s.shadow.is_none());
        assert_eq!(
            host.columns_reordered,
            vec![(Id::from("c3"), vec![Id::from("c1"), Id::from("c2")], DropPosition::After)]
        );
    }

    #[test]
    fn test_no_drop_onto_moved_columns() {
        let mut host = RecordingHost::default();
        let vp = Viewport::default();
        let mut cx = Context {
            host: &mut host,
            viewport: &vp,
        };
        let ev = PointerEvent::at(0.0, 0.0);
        let mut b = ColumnReorderBehavior::default();
        let s = with_selected(1, 2);
        let s = b.handle(GridEvent::PointerDown(&ev, &header(&s, 1, 30.0)), s, &mut cx);
        let s = b.handle(GridEvent::PointerMove(&ev, &header(&s, 0, 30.0)), s, &mut cx);
        assert_eq!(s.line.unwrap().position, 0.0);
        let s = b.handle(GridEvent::PointerMove(&ev, &header(&s, 2, 30.0)), s, &mut cx);
        assert!(s.line.is_none());
        b.handle(GridEvent::PointerUp(&ev, &header(&s, 2, 30.0)), s, &mut cx);
        assert!(host.columns_reordered.is_empty());
    }
}
