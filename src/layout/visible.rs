//! Virtualized visible range: only rows/columns near the viewport are
//! handed to the renderer.

use super::viewport::{grid_offsets, sticky_offset, visible_size, ViewportQuery};
use super::{CellMatrix, GridColumn, GridRow, Range};

/// Overscan in pixels above/below the viewport
pub const VS_PAGE_HEIGHT: f32 = 400.0;

/// Overscan in pixels left/right of the viewport
pub const VS_PAGE_WIDTH: f32 = 300.0;

/// Scroll positions beyond which the visible range must be recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollBoundaries {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl ScrollBoundaries {
    /// True once the scroll position has left the window the current range
    /// was computed for.
    pub fn crossed(&self, scroll_left: f32, scroll_top: f32) -> bool {
        scroll_left < self.left
            || scroll_left > self.right
            || scroll_top < self.top
            || scroll_top > self.bottom
    }

    /// Never crossed; used when virtualization is off.
    pub fn unbounded() -> Self {
        Self {
            left: f32::NEG_INFINITY,
            right: f32::INFINITY,
            top: f32::NEG_INFINITY,
            bottom: f32::INFINITY,
        }
    }
}

/// Result of [`recalc_visible_range`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleRange {
    pub range: Range,
    pub boundaries: ScrollBoundaries,
}

/// Window the scrollable range against the current scroll position.
///
/// With `disable_virtual_scrolling` the whole scrollable range is visible.
pub fn recalc_visible_range<V: ViewportQuery + ?Sized>(
    matrix: &CellMatrix,
    viewport: &V,
    disable_virtual_scrolling: bool,
) -> VisibleRange {
    if disable_virtual_scrolling {
        return VisibleRange {
            range: matrix.scrollable_range.clone(),
            boundaries: ScrollBoundaries::unbounded(),
        };
    }

    let (scroll_left, scroll_top) = viewport.scroll_offset();
    let (left, top) = grid_offsets(viewport);
    let size = visible_size(viewport, matrix);
    let height = (size.height - matrix.ranges.top.height()).max(0.0);
    let width = (size.width - matrix.ranges.left.width()).max(0.0);

    let rows = visible_rows(
        &matrix.scrollable_range.rows,
        scroll_top - top,
        height + sticky_offset(scroll_top, top),
    );
    let columns = visible_columns(
        &matrix.scrollable_range.columns,
        scroll_left - left,
        width + sticky_offset(scroll_left, left),
    );

    let boundaries = ScrollBoundaries {
        left: if columns.is_empty() { 0.0 } else { scroll_left - VS_PAGE_WIDTH },
        right: if columns.is_empty() { 0.0 } else { scroll_left + VS_PAGE_WIDTH },
        top: if rows.is_empty() { 0.0 } else { scroll_top - VS_PAGE_HEIGHT },
        bottom: if rows.is_empty() { 0.0 } else { scroll_top + VS_PAGE_HEIGHT },
    };
    VisibleRange {
        range: Range::new(rows, columns),
        boundaries,
    }
}

fn visible_rows(rows: &[GridRow], scrolled: f32, extent: f32) -> Vec<GridRow> {
    let tops: Vec<f32> = rows.iter().map(|r| r.top).collect();
    let (first, last) = window(&tops, scrolled - VS_PAGE_HEIGHT, extent + VS_PAGE_HEIGHT);
    rows.get(first..=last).unwrap_or_default().to_vec()
}

fn visible_columns(columns: &[GridColumn], scrolled: f32, extent: f32) -> Vec<GridColumn> {
    let lefts: Vec<f32> = columns.iter().map(|c| c.left).collect();
    let (first, last) = window(&lefts, scrolled - VS_PAGE_WIDTH, extent + VS_PAGE_WIDTH);
    columns.get(first..=last).unwrap_or_default().to_vec()
}

/// Inclusive index window. The start backs off two entries so a partially
/// visible leading item is kept.
fn window(starts: &[f32], from: f32, to: f32) -> (usize, usize) {
    if starts.is_empty() {
        return (1, 0);
    }
    let first = search(starts, from, 0).saturating_sub(2);
    let last = search(starts, to, first);
    (first, last)
}

/// Lowest index `i >= start` with `value < starts[i]`, else the last index.
fn search(starts: &[f32], value: f32, start: usize) -> usize {
    let end = starts.len().saturating_sub(1);
    let tail = starts.get(start..).unwrap_or_default();
    (start + tail.partition_point(|&s| s <= value)).min(end)
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
    use crate::layout::{CellMatrixBuilder, Viewport};
    use crate::types::{Cell, Column, Row};

    fn matrix(rows: usize, cols: usize) -> CellMatrix {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}")).with_width(100.0)).collect();
        let rows = (0..rows)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text(""); cols]).with_height(20.0))
            .collect();
        CellMatrixBuilder::new(rows, columns).build().unwrap()
    }

    #[test]
    fn test_search_matches_first_greater() {
        let starts = [0.0, 20.0, 40.0, 60.0];
        assert_eq!(search(&starts, 25.0, 0), 2);
        assert_eq!(search(&starts, -1.0, 0), 0);
        assert_eq!(search(&starts, 500.0, 0), 3);
        assert_eq!(search(&starts, 25.0, 3), 3);
    }

    #[test]
    fn test_top_of_grid_window() {
        let m = matrix(1000, 50);
        let vp = Viewport::in_container(&m, 800.0, 600.0);
        let vis = recalc_visible_range(&m, &vp, false);
        assert_eq!(vis.range.first_row().unwrap().idx, 0);
        // 600px viewport + 400px overscan: first top strictly past 1000px
        assert_eq!(vis.range.last_row().unwrap().idx, 51);
        assert_eq!(vis.range.last_column().unwrap().idx, 12);
    }

    #[test]
    fn test_scrolled_window_backs_off() {
        let m = matrix(1000, 50);
        let mut vp = Viewport::in_container(&m, 800.0, 600.0);
        vp.scroll_to(0.0, 10_000.0);
        let vis = recalc_visible_range(&m, &vp, false);
        // first top past 9600px is row 481, backed off by two
        assert_eq!(vis.range.first_row().unwrap().idx, 479);
        assert!(vis.range.last_row().unwrap().idx >= 530);
        assert_eq!(vis.boundaries.top, 9600.0);
        assert!(!vis.boundaries.crossed(0.0, 10_100.0));
        assert!(vis.boundaries.crossed(0.0, 10_500.0));
    }

    #[test]
    fn test_disabled_virtualization_is_whole_body() {
        let m = matrix(100, 5);
        let vp = Viewport::in_container(&m, 100.0, 100.0);
        let vis = recalc_visible_range(&m, &vp, true);
        assert_eq!(vis.range.rows.len(), 100);
        assert!(!vis.boundaries.crossed(1e9, 1e9));
    }

    #[test]
    fn test_empty_body() {
        let m = matrix(0, 0);
        let vp = Viewport::default();
        let vis = recalc_visible_range(&m, &vp, false);
        assert!(vis.range.is_empty());
    }
}
