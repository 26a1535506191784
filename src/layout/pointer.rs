//! Resolve client coordinates to a cell across sticky panes and the body.

use super::viewport::{grid_offsets, sticky_offset, visible_size, ViewportQuery};
use super::{CellMatrix, GridColumn, GridRow, PointerLocation};

/// Axes on which the scrollable body wins over sticky bands while scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavorScroll {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl FavorScroll {
    fn vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }

    fn horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }
}

/// Resolve a pointer position. `None` only for an empty matrix.
///
/// Rows check sticky-top, sticky-bottom, then the scrollable body; columns
/// check sticky-left, sticky-right, then the body.
pub fn location_from_client<V: ViewportQuery + ?Sized>(
    matrix: &CellMatrix,
    viewport: &V,
    client_x: f32,
    client_y: f32,
    favor: FavorScroll,
) -> Option<PointerLocation> {
    let bbox = viewport.bounding_box();
    let viewport_x = client_x - bbox.left;
    let viewport_y = client_y - bbox.top;
    let (row, cell_y) = resolve_row(matrix, viewport, viewport_y, favor.vertical())?;
    let (column, cell_x) = resolve_column(matrix, viewport, viewport_x, favor.horizontal())?;
    Some(PointerLocation {
        row,
        column,
        viewport_x,
        viewport_y,
        cell_x,
        cell_y,
    })
}

fn resolve_row<V: ViewportQuery + ?Sized>(
    matrix: &CellMatrix,
    viewport: &V,
    y: f32,
    favor: bool,
) -> Option<(GridRow, f32)> {
    let (_, scroll_top) = viewport.scroll_offset();
    let (_, grid_top) = grid_offsets(viewport);
    let top_offset = sticky_offset(scroll_top, grid_top);

    let top = &matrix.ranges.top;
    if !top.rows.is_empty() && y <= top.height() + top_offset && !(favor && scroll_top > grid_top) {
        let local = y - top_offset;
        if let Some(row) = top
            .rows
            .iter()
            .find(|r| r.bottom >= local)
            .or_else(|| top.rows.first())
        {
            return Some((row.clone(), local - row.top));
        }
    }

    let bottom = &matrix.ranges.bottom;
    if !bottom.rows.is_empty() {
        let (_, client_height) = viewport.client_size();
        let max_scroll = (matrix.height - client_height + grid_top).max(0.0);
        let bottom_offset = visible_size(viewport, matrix).height + top_offset - bottom.height();
        if y >= bottom_offset && !(favor && scroll_top + 1.0 < max_scroll) {
            let local = y - bottom_offset;
            if let Some(row) = bottom
                .rows
                .iter()
                .find(|r| r.bottom > local)
                .or_else(|| matrix.rows.last())
            {
                return Some((row.clone(), local - row.top));
            }
        }
    }

    let body = &matrix.scrollable_range.rows;
    if body.is_empty() {
        let row = if y >= matrix.height {
            matrix.rows.last()
        } else {
            matrix.rows.first()
        }?;
        return Some((row.clone(), row.height));
    }
    let local = y - top.height();
    let row = search_rows(body, local)?;
    Some((row.clone(), local - row.top))
}

fn resolve_column<V: ViewportQuery + ?Sized>(
    matrix: &CellMatrix,
    viewport: &V,
    x: f32,
    favor: bool,
) -> Option<(GridColumn, f32)> {
    let (scroll_left, _) = viewport.scroll_offset();
    let (grid_left, _) = grid_offsets(viewport);
    let left_offset = sticky_offset(scroll_left, grid_left);

    let left = &matrix.ranges.left;
    if !left.columns.is_empty()
        && x <= left.width() + left_offset
        && !(favor && scroll_left > grid_left)
    {
        let local = x - left_offset;
        if let Some(column) = left
            .columns
            .iter()
            .find(|c| c.right >= local)
            .or_else(|| left.columns.first())
        {
            return Some((column.clone(), local - column.left));
        }
    }

    let right = &matrix.ranges.right;
    if !right.columns.is_empty() {
        let (client_width, _) = viewport.client_size();
        let max_scroll = (matrix.width - client_width + grid_left).max(0.0);
        let right_offset = visible_size(viewport, matrix).width + left_offset - right.width();
        if x >= right_offset && !(favor && scroll_left + 1.0 < max_scroll) {
            let local = x - right_offset;
            if let Some(column) = right
                .columns
                .iter()
                .find(|c| c.right > local)
                .or_else(|| matrix.columns.last())
            {
                return Some((column.clone(), local - column.left));
            }
        }
    }

    let body = &matrix.scrollable_range.columns;
    if body.is_empty() {
        let column = if x >= matrix.width {
            matrix.columns.last()
        } else {
            matrix.columns.first()
        }?;
        return Some((column.clone(), column.width));
    }
    let local = x - left.width();
    let column = search_columns(body, local)?;
    Some((column.clone(), local - column.left))
}

/// First row whose bottom edge is at or below `y`, else the last row.
pub(crate) fn search_rows(rows: &[GridRow], y: f32) -> Option<&GridRow> {
    let i = rows.partition_point(|r| r.bottom < y);
    rows.get(i).or_else(|| rows.last())
}

/// First column whose right edge is at or right of `x`, else the last column.
pub(crate) fn search_columns(columns: &[GridColumn], x: f32) -> Option<&GridColumn> {
    let i = columns.partition_point(|c| c.right < x);
    columns.get(i).or_else(|| columns.last())
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

    fn matrix(rows: usize, cols: usize, sticky: StickyCounts) -> CellMatrix {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}")).with_width(100.0)).collect();
        let rows = (0..rows)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text(""); cols]).with_height(20.0))
            .collect();
        CellMatrixBuilder::new(rows, columns).sticky(sticky).build().unwrap()
    }

    #[test]
    fn test_plain_body_hit() {
        let m = matrix(50, 10, StickyCounts::default());
        let vp = Viewport::in_container(&m, 500.0, 200.0);
        let loc = location_from_client(&m, &vp, 250.0, 45.0, FavorScroll::None).unwrap();
        assert_eq!(loc.row.idx, 2);
        assert_eq!(loc.column.idx, 2);
        assert_eq!(loc.cell_x, 50.0);
        assert_eq!(loc.cell_y, 5.0);
    }

    #[test]
    fn test_scrolled_body_hit() {
        let m = matrix(50, 10, StickyCounts::default());
        let mut vp = Viewport::in_container(&m, 500.0, 200.0);
        vp.scroll_to(0.0, 400.0);
        // client y 10 is content y 410 → row 20
        let loc = location_from_client(&m, &vp, 10.0, 10.0, FavorScroll::None).unwrap();
        assert_eq!(loc.row.idx, 20);
        assert_eq!(loc.viewport_y, 410.0);
    }

    #[test]
    fn test_sticky_top_follows_scroll() {
        let sticky = StickyCounts {
            top: 1,
            ..StickyCounts::default()
        };
        let m = matrix(50, 10, sticky);
        let mut vp = Viewport::in_container(&m, 500.0, 200.0);
        vp.scroll_to(0.0, 400.0);
        let loc = location_from_client(&m, &vp, 10.0, 5.0, FavorScroll::None).unwrap();
        assert_eq!(loc.row.idx, 0);
        assert_eq!(loc.cell_y, 5.0);
    }

    #[test]
    fn test_sticky_bottom_band() {
        let sticky = StickyCounts {
            bottom: 2,
            ..StickyCounts::default()
        };
        let m = matrix(50, 10, sticky);
        let vp = Viewport::in_container(&m, 500.0, 200.0);
        // bottom band occupies client y 160..200
        let loc = location_from_client(&m, &vp, 10.0, 185.0, FavorScroll::None).unwrap();
        assert_eq!(loc.row.idx, 49);
        let loc = location_from_client(&m, &vp, 10.0, 150.0, FavorScroll::None).unwrap();
        assert_eq!(loc.row.idx, 7);
    }

    #[test]
    fn test_sticky_right_band() {
        let sticky = StickyCounts {
            right: 1,
            ..StickyCounts::default()
        };
        let m = matrix(5, 20, sticky);
        let vp = Viewport::in_container(&m, 500.0, 200.0);
        let loc = location_from_client(&m, &vp, 450.0, 5.0, FavorScroll::None).unwrap();
        assert_eq!(loc.column.idx, 19);
        assert_eq!(loc.cell_x, 50.0);
    }

    #[test]
    fn test_binary_search_fallbacks() {
        let m = matrix(3, 1, StickyCounts::default());
        assert_eq!(search_rows(&m.rows, 1000.0).unwrap().idx, 2);
        assert_eq!(search_rows(&m.rows, -5.0).unwrap().idx, 0);
        assert!(search_rows(&[], 0.0).is_none());
    }
}
