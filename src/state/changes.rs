//! Queueing cell edits through templates and the group-id gate.

use super::GridState;
use crate::layout::Location;
use crate::types::{Cell, CellChange, CellLocation};

/// Merge `cell` into `location` through the location's template and queue
/// the result. No-op when the cell is unchanged, the type has no update, or
/// the merged cell is `non_editable`.
pub fn try_append_change(mut state: GridState, location: &Location, cell: &Cell) -> GridState {
    let (previous_cell, template) = match state.compatible_cell(location) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(error = %e, "cannot append change");
            return state;
        }
    };
    if previous_cell == *cell {
        return state;
    }
    let Some(new_cell) = template.update(&previous_cell, cell) else {
        return state;
    };
    if new_cell == previous_cell || new_cell.non_editable {
        return state;
    }
    tracing::debug!(
        row = %location.row.row_id,
        column = %location.column.column_id,
        "queued cell change"
    );
    state.queued_changes.push(CellChange {
        cell_type: new_cell.cell_type.clone(),
        row_id: location.row.row_id.clone(),
        column_id: location.column.column_id.clone(),
        previous_cell,
        new_cell,
    });
    state
}

/// Like [`try_append_change`], but only when the target's `group_id`
/// matches the incoming cell's. Mismatches are logged and skipped.
pub fn try_append_change_having_group_id(state: GridState, location: &Location, cell: &Cell) -> GridState {
    let target_group = match state.compatible_cell(location) {
        Ok((target, _)) => target.group_id,
        Err(e) => {
            tracing::error!(error = %e, "cannot append change");
            return state;
        }
    };
    if target_group == cell.group_id {
        try_append_change(state, location, cell)
    } else {
        tracing::warn!(
            "New cells data can't be appended into location: ('{}', '{}'). Cell's 'groupId' field doesn't match!",
            location.column.column_id,
            location.row.row_id
        );
        state
    }
}

/// Clear every selected cell.
pub fn wipe_selected_ranges(mut state: GridState) -> GridState {
    let locations: Vec<Location> = state
        .selected_ranges
        .iter()
        .flat_map(|range| range.locations())
        .collect();
    let empty = Cell::empty();
    for location in &locations {
        state = try_append_change(state, location, &empty);
    }
    state
}

/// Ids of every selected cell, one list per range.
pub fn selected_locations(state: &GridState) -> Vec<Vec<CellLocation>> {
    state
        .selected_ranges
        .iter()
        .map(|range| range.locations().map(|l| l.to_cell_location()).collect())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::GridProps;
    use crate::state::fixtures::{loc, number_props, state};
    use crate::state::reset_selection;
    use crate::types::{Column, Row};
    use std::io;
    use std::sync::{Arc, Mutex};

    fn grouped() -> GridState {
        let rows = vec![Row::new(
            "r0",
            vec![
                Cell::text("a").with_group("A"),
                Cell::text("b").with_group("B"),
                Cell::text("c"),
            ],
        )];
        let columns = vec![Column::new("c0"), Column::new("c1"), Column::new("c2")];
        state(&GridProps::new(rows, columns))
    }

    #[test]
    fn test_group_mismatch_is_skipped() {
        let s = grouped();
        let b = loc(&s, 0, 1);
        let s = try_append_change_having_group_id(s, &b, &Cell::text("x").with_group("A"));
        assert!(s.queued_changes.is_empty());
    }

    /// Formatted log output, collected for assertions.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_group_mismatch_logs_a_warning() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let s = grouped();
        let b = loc(&s, 0, 1);
        let s = tracing::subscriber::with_default(subscriber, || {
            try_append_change_having_group_id(s, &b, &Cell::text("x").with_group("A"))
        });
        assert!(s.queued_changes.is_empty());

        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("('c1', 'r0')"), "{output}");
        assert!(output.contains("doesn't match"), "{output}");
    }

    #[test]
    fn test_group_match_applies() {
        let s = grouped();
        let a = loc(&s, 0, 0);
        let s = try_append_change_having_group_id(s, &a, &Cell::text("x").with_group("A"));
        assert_eq!(s.queued_changes.len(), 1);
        assert_eq!(s.queued_changes[0].new_cell.text, "x");
        assert_eq!(s.queued_changes[0].previous_cell.text, "a");

        let c = loc(&s, 0, 2);
        let s = try_append_change_having_group_id(s, &c, &Cell::text("y"));
        assert_eq!(s.queued_changes.len(), 2);
        assert_eq!(s.queued_changes[1].column_id.to_string(), "c2");
    }

    #[test]
    fn test_unchanged_and_read_only_are_noops() {
        let rows = vec![Row::new("r0", vec![Cell::header("h"), Cell::text("t")])];
        let s = state(&GridProps::new(rows, vec![Column::new("a"), Column::new("b")]));
        let (h, t) = (loc(&s, 0, 0), loc(&s, 0, 1));
        let s = try_append_change(s, &h, &Cell::text("x"));
        let s = try_append_change(s, &t, &Cell::text("t"));
        assert!(s.queued_changes.is_empty());
    }

    #[test]
    fn test_non_editable_result_is_dropped() {
        let rows = vec![Row::new("r0", vec![Cell::text("t").read_only()])];
        let s = state(&GridProps::new(rows, vec![Column::new("a")]));
        let t = loc(&s, 0, 0);
        let s = try_append_change(s, &t, &Cell::text("new"));
        assert!(s.queued_changes.is_empty());
    }

    #[test]
    fn test_wipe_queues_one_change_per_cell() {
        let s = state(&number_props(3, 3));
        let first = loc(&s, 0, 0);
        let s = reset_selection(s, &first);
        let range = s.matrix.get_range(&loc(&s, 0, 0), &loc(&s, 1, 1));
        let s = crate::state::select_range(s, range, false);
        let s = wipe_selected_ranges(s);
        assert_eq!(s.queued_changes.len(), 4);
        assert!(s.queued_changes.iter().all(|c| c.new_cell.text.is_empty()));
        assert_eq!(selected_locations(&s)[0].len(), 4);
    }
}
