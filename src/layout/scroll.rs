//! Scroll-into-view: the scroll offsets that make a location fully visible.

use super::viewport::{grid_offsets, sticky_offset, visible_size, ViewportQuery};
use super::{CellMatrix, Location};

/// Target `(scroll_left, scroll_top)` so `location` is fully inside the
/// scrollable area. Locations in sticky bands never scroll that axis.
pub fn scroll_into_view<V: ViewportQuery + ?Sized>(
    matrix: &CellMatrix,
    viewport: &V,
    location: &Location,
) -> (f32, f32) {
    let (scroll_left, scroll_top) = viewport.scroll_offset();
    let (left, top) = grid_offsets(viewport);
    let size = visible_size(viewport, matrix);
    let ranges = &matrix.ranges;

    let in_sticky_rows =
        ranges.top.contains_row(location.row.idx) || ranges.bottom.contains_row(location.row.idx);
    let target_top = if in_sticky_rows {
        scroll_top
    } else {
        let area = size.height - ranges.top.height() - ranges.bottom.height();
        scroll_axis(
            scroll_top,
            sticky_offset(scroll_top, top),
            area,
            location.row.top,
            location.row.bottom,
        )
    };

    let in_sticky_columns = ranges.left.contains_column(location.column.idx)
        || ranges.right.contains_column(location.column.idx);
    let target_left = if in_sticky_columns {
        scroll_left
    } else {
        let area = size.width - ranges.left.width() - ranges.right.width();
        scroll_axis(
            scroll_left,
            sticky_offset(scroll_left, left),
            area,
            location.column.left,
            location.column.right,
        )
    };

    (target_left, target_top)
}

/// One axis: `start..end` is the item in scrollable-pane coordinates and
/// `offset..offset + area` the currently visible part of the pane.
fn scroll_axis(scroll: f32, offset: f32, area: f32, start: f32, end: f32) -> f32 {
    if area <= 0.0 {
        return scroll;
    }
    if end > offset + area {
        // align the trailing edge, but never push the leading edge out
        let by_end = scroll + (end - (offset + area));
        let by_start = scroll + (start - offset);
        by_end.min(by_start).max(0.0)
    } else if start < offset {
        (scroll - (offset - start)).max(0.0)
    } else {
        scroll
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::layout::{CellMatrixBuilder, StickyCounts, Viewport};
    use crate::types::{Cell, Column, Row};

    fn matrix(sticky: StickyCounts) -> CellMatrix {
        let columns = (0..20).map(|c| Column::new(format!("c{c}")).with_width(100.0)).collect();
        let rows = (0..100)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text(""); 20]).with_height(20.0))
            .collect();
        CellMatrixBuilder::new(rows, columns).sticky(sticky).build().unwrap()
    }

    #[test]
    fn test_visible_location_keeps_scroll() {
        let m = matrix(StickyCounts::default());
        let vp = Viewport::in_container(&m, 500.0, 200.0);
        let loc = m.get_location(3, 2).unwrap();
        assert_eq!(scroll_into_view(&m, &vp, &loc), (0.0, 0.0));
    }

    #[test]
    fn test_scrolls_down_to_reveal_bottom_edge() {
        let m = matrix(StickyCounts::default());
        let vp = Viewport::in_container(&m, 500.0, 200.0);
        let loc = m.get_location(20, 0).unwrap();
        // row 20 spans 400..420; 200px visible → scroll 220
        assert_eq!(scroll_into_view(&m, &vp, &loc).1, 220.0);
    }

    #[test]
    fn test_scrolls_up_and_left() {
        let m = matrix(StickyCounts::default());
        let mut vp = Viewport::in_container(&m, 500.0, 200.0);
        vp.scroll_to(900.0, 1000.0);
        let loc = m.get_location(10, 3).unwrap();
        assert_eq!(scroll_into_view(&m, &vp, &loc), (300.0, 200.0));
    }

    #[test]
    fn test_sticky_rows_never_scroll() {
        let m = matrix(StickyCounts {
            top: 1,
            ..StickyCounts::default()
        });
        let mut vp = Viewport::in_container(&m, 500.0, 200.0);
        vp.scroll_to(0.0, 700.0);
        let loc = m.get_location(0, 0).unwrap();
        assert_eq!(scroll_into_view(&m, &vp, &loc).1, 700.0);
    }
}
