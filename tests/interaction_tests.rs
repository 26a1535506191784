//! End-to-end gestures through the `Grid` handle.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]

mod common;

use cellgrid::{
    Cell, ClipboardData, Column, DropPosition, Grid, GridProps, Id, Key, KeyEvent, Modifiers, PointerEvent,
    PointerTarget, Row, SelectionMode, Viewport,
};
use common::{at, number_grid, CollectingHost};

fn grid(props: GridProps) -> Grid<CollectingHost> {
    Grid::new(props, CollectingHost::default(), Viewport::new(800.0, 600.0)).unwrap()
}

fn click(g: &mut Grid<CollectingHost>, row: usize, col: usize) {
    g.pointer_down(&at(row, col));
    g.pointer_up(&at(row, col));
}

fn drag(g: &mut Grid<CollectingHost>, from: PointerEvent, to: PointerEvent) {
    g.pointer_down(&from);
    g.pointer_move(&to);
    g.pointer_up(&to);
}

#[test]
fn test_fill_handle_continues_a_series() {
    let mut props = number_grid(10, 3);
    for r in 1..=3 {
        props.rows[r].cells[1] = Cell::number(r as f64);
    }
    let mut g = grid(props);
    drag(&mut g, at(1, 1), at(3, 1));
    drag(&mut g, at(3, 1).on(PointerTarget::FillHandle), at(5, 1));

    assert_eq!(g.host().written_values(), vec![4.0, 5.0]);
    let selected = &g.state().selected_ranges[0];
    assert_eq!(selected.first_row().unwrap().idx, 1);
    assert_eq!(selected.last_row().unwrap().idx, 5);
    assert!(g.state().behavior.is_default());
}

#[test]
fn test_paste_skips_cells_of_another_group() {
    let rows = vec![
        Row::new("head", vec![Cell::header("a"), Cell::header("b"), Cell::header("c"), Cell::header("d")]),
        Row::new(
            "body",
            vec![
                Cell::text("x"),
                Cell::text("a").with_group("A"),
                Cell::text("b").with_group("B"),
                Cell::text("c").with_group("A"),
            ],
        ),
    ];
    let columns = (0..4).map(|c| Column::new(format!("c{c}")).with_width(100.0)).collect();
    let props = GridProps::new(
        rows.into_iter().map(|r| r.with_height(20.0)).collect(),
        columns,
    );
    let mut g = grid(props);

    click(&mut g, 1, 1);
    let data = g.copy().unwrap();

    click(&mut g, 1, 2);
    g.paste(&data);
    assert!(g.host().changes.is_empty());

    click(&mut g, 1, 3);
    g.paste(&data);
    assert_eq!(g.host().changes.len(), 1);
    assert_eq!(g.host().changes[0].new_cell.text, "a");
    assert_eq!(g.host().changes[0].column_id, Id::from("c3"));
}

#[test]
fn test_large_paste_grows_the_grid() {
    let mut g = grid(number_grid(3, 3));
    click(&mut g, 1, 1);
    let text = (0..5)
        .map(|r| (0..5).map(|c| (100 + r * 5 + c).to_string()).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n");
    g.paste(&ClipboardData {
        text,
        html: String::new(),
    });

    let state = g.state();
    assert_eq!(state.matrix.rows.len(), 6);
    assert_eq!(state.matrix.columns.len(), 6);
    // the rows and columns added by the paste are rendered right away
    assert_eq!(state.visible_range.rows.len(), 6);
    assert_eq!(state.visible_range.columns.len(), 6);
    assert_eq!(state.selected_ranges[0].cell_count(), 25);
    assert_eq!(g.host().changes.len(), 25);
    assert_eq!(g.host().changes[0].new_cell.value, 100.0);
}

#[test]
fn test_copy_marks_the_copy_range_and_escape_clears_it() {
    let mut g = grid(number_grid(5, 5));
    drag(&mut g, at(1, 1), at(2, 3));
    let data = g.copy().unwrap();
    assert_eq!(data.text, "11\t12\t13\n21\t22\t23");
    assert!(data.html.contains("data-cellgrid"));
    assert_eq!(g.state().copy_range.as_ref().unwrap().cell_count(), 6);

    g.key_down(&KeyEvent::new(Key::Escape));
    assert!(g.state().copy_range.is_none());
}

#[test]
fn test_cut_clears_the_source() {
    let mut g = grid(number_grid(5, 5));
    drag(&mut g, at(2, 1), at(2, 2));
    let data = g.cut().unwrap();
    assert_eq!(data.text, "21\t22");
    assert_eq!(g.host().changes.len(), 2);
    assert!(g.host().changes.iter().all(|c| c.new_cell.value.is_nan()));
}

#[test]
fn test_column_resize_gesture() {
    let mut props = number_grid(5, 4);
    props.columns[1] = props.columns[1].clone().resizable();
    let mut g = grid(props);

    let grip = PointerEvent::at(195.0, 10.0).on(PointerTarget::ResizeHandle);
    g.pointer_down(&grip);
    assert_eq!(g.state().behavior.name(), "resize-column");
    g.pointer_move(&PointerEvent::at(237.0, 10.0));
    assert!(g.state().line.is_some());
    g.pointer_up(&PointerEvent::at(237.0, 10.0));

    assert_eq!(g.host().resized, vec![(Id::from("c1"), 142.0)]);
    assert!(g.state().line.is_none());
}

#[test]
fn test_column_reorder_gesture() {
    let mut props = number_grid(5, 5);
    props.columns[1] = props.columns[1].clone().reorderable();
    let mut g = grid(props);

    click(&mut g, 0, 1);
    assert_eq!(g.state().selection_mode, SelectionMode::Column);
    g.pointer_down(&at(0, 1));
    assert_eq!(g.state().behavior.name(), "column-reorder");
    g.pointer_move(&at(0, 3));
    g.pointer_up(&at(0, 3));

    assert_eq!(
        g.host().columns_reordered,
        vec![(Id::from("c3"), vec![Id::from("c1")], DropPosition::After)]
    );
    assert!(g.state().shadow.is_none());
}

#[test]
fn test_ctrl_click_on_header_cell_adds_a_range() {
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    let mut props = number_grid(6, 6);
    props.rows[4].cells[4] = Cell::header("total");
    let mut g = grid(props);
    drag(&mut g, at(1, 1), at(2, 2));
    g.pointer_down(&at(4, 4).with(ctrl));
    g.pointer_up(&at(4, 4).with(ctrl));

    let state = g.state();
    assert_eq!(state.selected_ranges.len(), 2);
    assert_eq!(state.active_selected_range_idx, 1);
    assert_eq!(state.selected_ranges[1].cell_count(), 1);
    // headers never take focus
    assert_eq!(state.focused_location.as_ref().unwrap().row.idx, 1);
}

#[test]
fn test_ctrl_click_on_editable_cell_outside_selection_changes_nothing() {
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    let mut g = grid(number_grid(6, 6));
    drag(&mut g, at(1, 1), at(2, 2));
    let before = g.state().selected_ranges.clone();
    g.pointer_down(&at(4, 4).with(ctrl));
    g.pointer_up(&at(4, 4).with(ctrl));

    let state = g.state();
    assert_eq!(state.selected_ranges, before);
    assert_eq!(state.focused_location.as_ref().unwrap().row.idx, 1);
}

#[test]
fn test_vetoed_selection_is_rolled_back() {
    let mut g = grid(number_grid(6, 6));
    g.host_mut().veto_selection = true;
    drag(&mut g, at(1, 1), at(3, 3));
    assert!(g.state().selected_ranges.is_empty());
    assert!(g.host().selections.is_empty());
}

#[test]
fn test_keyboard_navigation_and_shift_extend() {
    let mut g = grid(number_grid(10, 5));
    click(&mut g, 2, 2);

    g.key_down(&KeyEvent::new(Key::ArrowRight));
    g.key_down(&KeyEvent::new(Key::ArrowDown));
    let focused = g.state().focused_location.clone().unwrap();
    assert_eq!((focused.row.idx, focused.column.idx), (3, 3));

    g.key_down(&KeyEvent::new(Key::ArrowDown).shift());
    g.key_down(&KeyEvent::new(Key::ArrowRight).shift());
    assert_eq!(g.state().selected_ranges[0].cell_count(), 4);

    g.key_down(&KeyEvent::new(Key::End).ctrl());
    let focused = g.state().focused_location.clone().unwrap();
    assert_eq!((focused.row.idx, focused.column.idx), (9, 4));
}

#[test]
fn test_delete_wipes_the_selection() {
    let mut g = grid(number_grid(5, 5));
    drag(&mut g, at(1, 1), at(2, 2));
    g.key_down(&KeyEvent::new(Key::Delete));
    assert_eq!(g.host().changes.len(), 4);
}

#[test]
fn test_escape_discards_an_edit() {
    let mut g = grid(number_grid(5, 5));
    click(&mut g, 2, 2);
    g.key_down(&KeyEvent::new(Key::Char('5')));
    assert!(g.state().currently_edited_cell.is_some());
    g.key_down(&KeyEvent::new(Key::Escape));
    assert!(g.state().currently_edited_cell.is_none());
    assert!(g.host().changes.is_empty());
}

#[test]
fn test_new_props_keep_focus_by_id() {
    let mut g = grid(number_grid(5, 5));
    click(&mut g, 3, 2);
    let mut props = number_grid(6, 5);
    props.rows.swap(1, 3);
    g.set_props(props).unwrap();
    let focused = g.state().focused_location.clone().unwrap();
    assert_eq!(focused.row.row_id, Id::from("r3"));
    assert_eq!(focused.row.idx, 1);
}
