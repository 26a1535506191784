//! Copy, cut and paste of the active selected range.
//!
//! The engine never touches the system clipboard. [`copy`] and [`cut`]
//! return the payload for the host to place there; [`paste`] takes what
//! the host read back. Two flavors travel together: tab/newline separated
//! text for other applications, and an HTML table carrying every cell's
//! full declaration so pastes within grids are lossless.

mod html;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{Location, Range};
use crate::state::{select_range, try_append_change_having_group_id, Context, GridState};
use crate::types::Cell;

/// Both clipboard flavors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardData {
    /// `text/plain`
    pub text: String,
    /// `text/html`
    pub html: String,
}

/// Serialize the active range and remember it as the copy range.
pub fn copy(mut state: GridState) -> (GridState, Option<ClipboardData>) {
    let Some(range) = state.active_selected_range().cloned() else {
        return (state, None);
    };
    let data = match range_to_clipboard(&state, &range) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "cannot serialize selection for the clipboard");
            return (state, None);
        }
    };
    state.copy_range = Some(range);
    (state, Some(data))
}

/// [`copy`], then clear the copied cells. Clearing goes through the
/// group-id gate like any other change; the empty cell takes the group of
/// the cell it replaces.
pub fn cut(state: GridState) -> (GridState, Option<ClipboardData>) {
    let (mut state, data) = copy(state);
    if data.is_some() {
        if let Some(range) = state.copy_range.clone() {
            for location in range.locations() {
                let group_id = match state.compatible_cell(&location) {
                    Ok((source, _)) => source.group_id,
                    Err(e) => {
                        tracing::error!(error = %e, "cannot clear cut cell");
                        continue;
                    }
                };
                let empty = Cell {
                    group_id,
                    ..Cell::empty()
                };
                state = try_append_change_having_group_id(state, &location, &empty);
            }
        }
    }
    (state, data)
}

/// Paste into the active range. Grid-originated HTML is preferred; other
/// content falls back to the plain text flavor.
pub fn paste(state: GridState, data: &ClipboardData, cx: &mut Context<'_>) -> GridState {
    let rows = match html::read_table(&data.html) {
        Ok(Some(rows)) => rows,
        Ok(None) => plain_text_rows(&data.text),
        Err(e) => {
            tracing::warn!(error = %e, "clipboard html unreadable, pasting plain text");
            plain_text_rows(&data.text)
        }
    };
    paste_data(state, &rows, cx)
}

/// Write `rows` into the grid.
///
/// A single cell is written to every cell of the active range. Anything
/// larger is written row-major from the active range's top-left corner,
/// growing the matrix when it runs past the last row or column, and the
/// pasted rectangle becomes the selection.
pub fn paste_data(mut state: GridState, rows: &[Vec<Cell>], cx: &mut Context<'_>) -> GridState {
    let Some(active) = state.active_selected_range().cloned() else {
        return state;
    };
    if let [row] = rows {
        if let [cell] = row.as_slice() {
            for location in active.locations() {
                state = try_append_change_having_group_id(state, &location, cell);
            }
            return state;
        }
    }
    let Some(anchor) = active.first() else {
        return state;
    };

    let needed_rows = anchor.row.idx + rows.len();
    let needed_columns = anchor.column.idx + rows.iter().map(Vec::len).max().unwrap_or(0);
    if needed_rows > state.matrix.rows.len() || needed_columns > state.matrix.columns.len() {
        match state.matrix.extend(needed_rows, needed_columns) {
            Ok(matrix) => state.matrix = matrix,
            Err(e) => {
                tracing::error!(error = %e, "cannot extend grid for paste");
                return state;
            }
        }
    }

    let mut last: Option<Location> = None;
    for (ri, row) in rows.iter().enumerate() {
        for (ci, cell) in row.iter().enumerate() {
            let Some(location) = state.matrix.get_location(anchor.row.idx + ri, anchor.column.idx + ci) else {
                continue;
            };
            state = try_append_change_having_group_id(state, &location, cell);
            last = Some(location);
        }
    }
    let Some(last) = last else {
        return state;
    };

    let new_range = state.matrix.get_range(&anchor, &last);
    if !cx.host.on_selection_changing(std::slice::from_ref(&new_range)) {
        return state;
    }
    cx.host.on_selection_changed(std::slice::from_ref(&new_range));
    select_range(state, new_range, false)
}

fn range_to_clipboard(state: &GridState, range: &Range) -> Result<ClipboardData> {
    let rows: Vec<Vec<Cell>> = range
        .rows
        .iter()
        .map(|row| {
            range
                .columns
                .iter()
                .map(|column| {
                    let location = Location::new(row.clone(), column.clone());
                    state.compatible_cell(&location).map(|(cell, _)| cell)
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<_>>()?;

    let text = rows
        .iter()
        .map(|row| row.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(ClipboardData {
        text,
        html: html::write_table(&rows)?,
    })
}

/// Lines, then tabs. A trailing line break (spreadsheet apps add one)
/// does not produce an extra empty row.
fn plain_text_rows(text: &str) -> Vec<Vec<Cell>> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n')
        .map(|line| {
            line.strip_suffix('\r')
                .unwrap_or(line)
                .split('\t')
                .map(Cell::text)
                .collect()
        })
        .collect()
}
