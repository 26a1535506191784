//! Dragging the fill handle: extrapolate or repeat the selected values
//! into the cells the pointer was dragged over.

use super::GridEvent;
use crate::events::PointerEvent;
use crate::layout::{CellMatrix, Location, Range};
use crate::state::{try_append_change_having_group_id, Context, GridState};
use crate::types::{format_number, Cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillDirection {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Default)]
pub struct FillHandleBehavior {
    pub direction: FillDirection,
    /// Cells that will be written on release
    pub fill_range: Option<Range>,
}

impl FillHandleBehavior {
    pub(super) fn handle(&mut self, event: GridEvent<'_>, state: GridState, cx: &mut Context<'_>) -> GridState {
        match event {
            GridEvent::PointerEnter(_, loc) => {
                self.pointer_enter(&loc.location(), &state);
                state
            }
            GridEvent::PointerUp(ev, loc) => self.pointer_up(ev, &loc.location(), state, cx),
            _ => state,
        }
    }

    fn pointer_enter(&mut self, location: &Location, state: &GridState) {
        let Some(selected) = state.active_selected_range() else {
            return;
        };
        self.direction = fill_direction(selected, location);
        self.fill_range = fill_range(&state.matrix, selected, location, self.direction);
    }

    fn pointer_up(
        &mut self,
        event: &PointerEvent,
        location: &Location,
        mut state: GridState,
        cx: &mut Context<'_>,
    ) -> GridState {
        let Some(active) = state.active_selected_range().cloned() else {
            return state;
        };
        let Some(fill) = self.fill_range.take().and_then(|r| state.matrix.validate_range(&r)) else {
            return state;
        };
        let (Some(first), Some(last)) = (active.first(), active.last()) else {
            return state;
        };
        let repeat = event.modifiers.preserve_key(state.platform);

        let new_range = match self.direction {
            FillDirection::None => return state,
            FillDirection::Right => {
                state = fill_rows(state, &active, &fill, false, repeat);
                state.matrix.get_range(&first, &Location::new(last.row.clone(), location.column.clone()))
            }
            FillDirection::Left => {
                state = fill_rows(state, &active, &fill, true, repeat);
                state.matrix.get_range(&last, &Location::new(first.row.clone(), location.column.clone()))
            }
            FillDirection::Up => {
                state = fill_columns(state, &active, &fill, true, repeat);
                state.matrix.get_range(&last, &Location::new(location.row.clone(), first.column.clone()))
            }
            FillDirection::Down => {
                state = fill_columns(state, &active, &fill, false, repeat);
                state.matrix.get_range(&first, &Location::new(location.row.clone(), last.column.clone()))
            }
        };

        let new_ranges = [new_range];
        if !cx.host.on_selection_changing(&new_ranges) {
            return state;
        }
        state.selected_ids = match self.direction {
            FillDirection::Left | FillDirection::Right => active
                .columns
                .iter()
                .chain(&fill.columns)
                .map(|c| c.column_id.clone())
                .collect(),
            _ => active
                .rows
                .iter()
                .chain(&fill.rows)
                .map(|r| r.row_id.clone())
                .collect(),
        };
        state.selected_ranges = new_ranges.to_vec();
        state.active_selected_range_idx = 0;
        cx.host.on_selection_changed(&state.selected_ranges);
        state
    }
}

/// The axis with the largest overshoot past the selection; ties keep the
/// earlier of none, up, down, left, right.
fn fill_direction(selected: &Range, pointer: &Location) -> FillDirection {
    let (Some(first), Some(last)) = (selected.first(), selected.last()) else {
        return FillDirection::None;
    };
    let (r, c) = (pointer.row.idx, pointer.column.idx);
    let candidates = [
        (FillDirection::None, 0),
        (FillDirection::Up, first.row.idx.saturating_sub(r)),
        (FillDirection::Down, r.saturating_sub(last.row.idx)),
        (FillDirection::Left, first.column.idx.saturating_sub(c)),
        (FillDirection::Right, c.saturating_sub(last.column.idx)),
    ];
    candidates
        .into_iter()
        .reduce(|prev, current| if prev.1 >= current.1 { prev } else { current })
        .map_or(FillDirection::None, |(direction, _)| direction)
}

/// Cells between the selection edge and the pointer, starting one step
/// past the selection (clamped to the grid).
fn fill_range(matrix: &CellMatrix, selected: &Range, pointer: &Location, direction: FillDirection) -> Option<Range> {
    let first = selected.first()?;
    let last = selected.last()?;
    let last_row = matrix.rows.len().checked_sub(1)?;
    let last_col = matrix.columns.len().checked_sub(1)?;
    let (start, end) = match direction {
        FillDirection::None => return None,
        FillDirection::Right => (
            matrix.get_location(first.row.idx, (last.column.idx + 1).min(last_col))?,
            Location::new(last.row, pointer.column.clone()),
        ),
        FillDirection::Left => (
            Location::new(first.row, pointer.column.clone()),
            matrix.get_location(last.row.idx, first.column.idx.saturating_sub(1))?,
        ),
        FillDirection::Up => (
            Location::new(pointer.row.clone(), first.column),
            matrix.get_location(first.row.idx.saturating_sub(1), last.column.idx)?,
        ),
        FillDirection::Down => (
            matrix.get_location((last.row.idx + 1).min(last_row), first.column.idx)?,
            Location::new(pointer.row.clone(), last.column),
        ),
    };
    Some(matrix.get_range(&start, &end))
}

/// Least-squares line through `(value, position)` pairs, positions being
/// 1..=n. Returns `(a, b)` of `position = a + b * value`.
pub(crate) fn regression(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &x) in values.iter().enumerate() {
        let y = (i + 1) as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let up = n * sum_xy - sum_x * sum_y;
    let down = n * sum_xx - sum_x * sum_x;
    let b = up / down;
    let a = sum_y / n - b * (sum_x / n);
    (a, b)
}

/// Invert the regression line at `position`, rounded to 5 decimals.
pub(crate) fn predict(position: f64, a: f64, b: f64) -> f64 {
    (((position - a) / b) * 1e5 + 0.5).floor() / 1e5
}

/// Candidate cells for `targets`, continuing the series in `sources`.
/// A target that is `None` stays `None` but still takes up its position
/// in the series.
fn predicted_cells(sources: &[Cell], targets: &[Option<Cell>], repeat: bool) -> Vec<Option<Cell>> {
    let values: Vec<f64> = sources.iter().map(|c| c.value).collect();
    let (a, b) = regression(&values);
    let repeat = repeat || (a.is_nan() && b.is_nan());
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let target = target.as_ref()?;
            let source = sources.get(i % sources.len().max(1))?;
            let (text, value) = if repeat {
                (source.text.clone(), source.value)
            } else {
                let x = predict((i + values.len() + 1) as f64, a, b);
                (format_number(x), x)
            };
            Some(Cell {
                text,
                value,
                group_id: source.group_id.clone(),
                ..target.clone()
            })
        })
        .collect()
}

/// One entry per location; lookups that fail are logged and left `None`.
fn compatible_cells(state: &GridState, locations: &[Location]) -> Vec<Option<Cell>> {
    locations
        .iter()
        .map(|l| match state.compatible_cell(l) {
            Ok((cell, _)) => Some(cell),
            Err(e) => {
                tracing::error!(error = %e, "skipping cell in fill");
                None
            }
        })
        .collect()
}

/// Fill each selected row into the fill columns. `reversed` fills
/// leftwards: the series runs from the selection's right edge.
fn fill_rows(mut state: GridState, active: &Range, fill: &Range, reversed: bool, repeat: bool) -> GridState {
    for row in &active.rows {
        let mut sources: Vec<Location> = active
            .columns
            .iter()
            .map(|c| Location::new(row.clone(), c.clone()))
            .collect();
        let mut targets: Vec<Location> = fill
            .columns
            .iter()
            .map(|c| Location::new(row.clone(), c.clone()))
            .collect();
        if reversed {
            sources.reverse();
            targets.reverse();
        }
        state = fill_line(state, &sources, &targets, repeat);
    }
    state
}

/// Column counterpart of [`fill_rows`]; `reversed` fills upwards.
fn fill_columns(mut state: GridState, active: &Range, fill: &Range, reversed: bool, repeat: bool) -> GridState {
    for column in &active.columns {
        let mut sources: Vec<Location> = active
            .rows
            .iter()
            .map(|r| Location::new(r.clone(), column.clone()))
            .collect();
        let mut targets: Vec<Location> = fill
            .rows
            .iter()
            .map(|r| Location::new(r.clone(), column.clone()))
            .collect();
        if reversed {
            sources.reverse();
            targets.reverse();
        }
        state = fill_line(state, &sources, &targets, repeat);
    }
    state
}

fn fill_line(mut state: GridState, sources: &[Location], targets: &[Location], repeat: bool) -> GridState {
    let source_cells: Vec<Cell> = compatible_cells(&state, sources).into_iter().flatten().collect();
    let target_cells = compatible_cells(&state, targets);
    let values = predicted_cells(&source_cells, &target_cells, repeat);
    for (location, cell) in targets.iter().zip(&values) {
        if let Some(cell) = cell {
            state = try_append_change_having_group_id(state, location, cell);
        }
    }
    state
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;
    use crate::config::GridProps;
    use crate::events::Modifiers;
    use crate::host::recording::RecordingHost;
    use crate::layout::{PointerLocation, Viewport};
    use crate::state::fixtures::{loc, number_props, state};
    use crate::state::select_range;

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    fn with_column(mut props: GridProps, col: usize, values: &[(usize, f64)]) -> GridProps {
        for &(row, value) in values {
            props.rows[row].cells[col] = Cell::number(value);
        }
        props
    }

    fn pointer(s: &GridState, row: usize, col: usize) -> PointerLocation {
        let l = loc(s, row, col);
        PointerLocation {
            row: l.row,
            column: l.column,
            viewport_x: 0.0,
            viewport_y: 0.0,
            cell_x: 1.0,
            cell_y: 1.0,
        }
    }

    fn fill(
        s: GridState,
        host: &mut RecordingHost,
        selection: ((usize, usize), (usize, usize)),
        to: (usize, usize),
        mods: Modifiers,
    ) -> GridState {
        let (from, until) = selection;
        let range = s.matrix.get_range(&loc(&s, from.0, from.1), &loc(&s, until.0, until.1));
        let s = select_range(s, range, false);
        let vp = Viewport::default();
        let mut cx = Context { host, viewport: &vp };
        let mut b = FillHandleBehavior::default();
        let ev = PointerEvent::at(0.0, 0.0).with(mods);
        let p = pointer(&s, to.0, to.1);
        let s = b.handle(GridEvent::PointerEnter(&ev, &p), s, &mut cx);
        b.handle(GridEvent::PointerUp(&ev, &p), s, &mut cx)
    }

    fn written(s: &GridState) -> Vec<(String, f64)> {
        s.queued_changes
            .iter()
            .map(|c| (c.row_id.to_string(), c.new_cell.value))
            .collect()
    }

    #[test]
    fn test_linear_series_continues() {
        let (a, b) = regression(&[1.0, 2.0, 3.0]);
        let next: Vec<f64> = (4..=6).map(|y| predict(f64::from(y), a, b)).collect();
        assert_eq!(next, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_missing_target_keeps_its_place_in_the_series() {
        let sources = vec![Cell::number(1.0), Cell::number(2.0), Cell::number(3.0)];
        let targets = vec![None, Some(Cell::number(0.0)), Some(Cell::number(0.0))];
        let filled = predicted_cells(&sources, &targets, false);
        assert_eq!(filled.len(), 3);
        assert!(filled[0].is_none());
        assert_eq!(filled[1].as_ref().unwrap().value, 5.0);
        assert_eq!(filled[2].as_ref().unwrap().value, 6.0);
        assert_eq!(filled[2].as_ref().unwrap().text, "6");
    }

    #[test]
    fn test_constant_series_has_no_line() {
        let (a, b) = regression(&[5.0, 5.0, 5.0]);
        assert!(a.is_nan() && b.is_nan());
        let (a, b) = regression(&[7.0]);
        assert!(a.is_nan() && b.is_nan());
    }

    #[test]
    fn test_fill_down_extrapolates() {
        let props = with_column(number_props(8, 3), 0, &[(0, 1.0), (1, 2.0), (2, 3.0)]);
        let mut host = RecordingHost::default();
        let s = fill(state(&props), &mut host, ((0, 0), (2, 0)), (5, 0), Modifiers::NONE);
        let expected = [("r3", 4.0), ("r4", 5.0), ("r5", 6.0)].map(|(r, v)| (r.to_string(), v));
        assert_eq!(written(&s), expected.to_vec());
        assert_eq!(s.queued_changes[0].new_cell.text, "4");
        assert_eq!(s.selected_ranges[0].rows.len(), 6);
        assert_eq!(s.selected_ids.len(), 6);
        assert_eq!(host.selection_changed, 1);
    }

    #[test]
    fn test_fill_up_runs_from_the_top_edge() {
        let props = with_column(number_props(8, 3), 1, &[(4, 3.0), (5, 2.0), (6, 1.0)]);
        let mut host = RecordingHost::default();
        let s = fill(state(&props), &mut host, ((4, 1), (6, 1)), (2, 1), Modifiers::NONE);
        let expected = [("r3", 4.0), ("r2", 5.0)].map(|(r, v)| (r.to_string(), v));
        assert_eq!(written(&s), expected.to_vec());
        assert_eq!(s.selected_ranges[0].rows.len(), 5);
    }

    #[test]
    fn test_fill_right_with_preserve_key_repeats() {
        let mut host = RecordingHost::default();
        let s = fill(state(&number_props(2, 6)), &mut host, ((0, 0), (0, 1)), (0, 4), CTRL);
        let values: Vec<f64> = s.queued_changes.iter().map(|c| c.new_cell.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 0.0]);
        assert_eq!(s.selected_ids.len(), 5);
    }

    #[test]
    fn test_pointer_inside_selection_is_no_fill() {
        let s = state(&number_props(5, 5));
        let range = s.matrix.get_range(&loc(&s, 1, 1), &loc(&s, 2, 2));
        assert_eq!(fill_direction(&range, &loc(&s, 2, 1)), FillDirection::None);
        assert!(fill_range(&s.matrix, &range, &loc(&s, 2, 1), FillDirection::None).is_none());
        assert_eq!(fill_direction(&range, &loc(&s, 4, 4)), FillDirection::Down);
        assert_eq!(fill_direction(&range, &loc(&s, 0, 4)), FillDirection::Right);
    }

    #[test]
    fn test_vetoed_fill_still_writes_but_keeps_selection() {
        let mut host = RecordingHost {
            veto_selection: true,
            ..RecordingHost::default()
        };
        let s = fill(state(&number_props(5, 2)), &mut host, ((0, 0), (1, 0)), (3, 0), CTRL);
        assert_eq!(s.queued_changes.len(), 2);
        assert_eq!(s.selected_ranges[0].rows.len(), 2);
        assert_eq!(host.selection_changed, 0);
    }
}
