//! Viewport geometry: where the grid sits inside its scroll container.
//!
//! The engine never talks to a DOM. Hosts describe the geometry through
//! [`ViewportQuery`]; [`Viewport`] is a plain snapshot implementation.

use super::CellMatrix;

/// Axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Host-provided viewport measurements.
pub trait ViewportQuery {
    /// The grid element's bounding box in client coordinates.
    fn bounding_box(&self) -> Rect;

    /// Scroll offset `(left, top)` of the scroll container.
    fn scroll_offset(&self) -> (f32, f32);

    /// Visible `(width, height)` of the scroll container.
    fn client_size(&self) -> (f32, f32);

    /// Bounding box of the scroll container, or `None` when the whole
    /// window scrolls.
    fn container_rect(&self) -> Option<Rect> {
        None
    }
}

/// A measured snapshot of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position of the container
    pub scroll_x: f32,
    /// Vertical scroll position of the container
    pub scroll_y: f32,
    /// Container client width in pixels
    pub width: f32,
    /// Container client height in pixels
    pub height: f32,
    /// Grid bounding box in client coordinates
    pub grid: Rect,
    pub container: Option<Rect>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// A window-scrolled grid at the origin.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            grid: Rect::default(),
            container: None,
        }
    }

    /// A grid laid out at the top-left of a scrolling container of the given
    /// size, sized to `matrix`, scrolled by `(scroll_x, scroll_y)`.
    pub fn in_container(matrix: &CellMatrix, width: f32, height: f32) -> Self {
        Self {
            grid: Rect::new(0.0, 0.0, matrix.width, matrix.height),
            container: Some(Rect::new(0.0, 0.0, width, height)),
            ..Self::new(width, height)
        }
    }

    /// Scroll the container, moving the grid box with the content.
    pub fn scroll_to(&mut self, scroll_x: f32, scroll_y: f32) {
        let dx = scroll_x - self.scroll_x;
        let dy = scroll_y - self.scroll_y;
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self.grid.left -= dx;
        self.grid.top -= dy;
    }

    /// Clamp scroll position to the scrollable extent of `matrix`.
    pub fn clamp_scroll(&mut self, matrix: &CellMatrix) {
        let max_x = (matrix.width - self.width).max(0.0);
        let max_y = (matrix.height - self.height).max(0.0);
        self.scroll_to(self.scroll_x.clamp(0.0, max_x), self.scroll_y.clamp(0.0, max_y));
    }
}

impl ViewportQuery for Viewport {
    fn bounding_box(&self) -> Rect {
        self.grid
    }

    fn scroll_offset(&self) -> (f32, f32) {
        (self.scroll_x, self.scroll_y)
    }

    fn client_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn container_rect(&self) -> Option<Rect> {
        self.container
    }
}

/// The grid's offset inside the scroll container's content.
pub fn grid_offsets<V: ViewportQuery + ?Sized>(viewport: &V) -> (f32, f32) {
    let (scroll_left, scroll_top) = viewport.scroll_offset();
    let bbox = viewport.bounding_box();
    let mut left = bbox.left + scroll_left;
    let mut top = bbox.top + scroll_top;
    if let Some(container) = viewport.container_rect() {
        left -= container.left;
        top -= container.top;
    }
    (left, top)
}

/// How far the grid's top/left edge has scrolled past the container edge.
pub fn sticky_offset(scroll: f32, offset: f32) -> f32 {
    if scroll > offset {
        scroll - offset
    } else {
        0.0
    }
}

/// The part of the grid currently inside the container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibleSize {
    pub width: f32,
    pub height: f32,
    /// Container space right of the grid's visible part
    pub offset_right: f32,
    /// Container space below the grid's visible part
    pub offset_bottom: f32,
}

pub fn visible_size<V: ViewportQuery + ?Sized>(viewport: &V, matrix: &CellMatrix) -> VisibleSize {
    let (scroll_left, scroll_top) = viewport.scroll_offset();
    let (client_width, client_height) = viewport.client_size();
    let (left, top) = grid_offsets(viewport);

    let scroll_bottom = scroll_top + client_height;
    let grid_bottom = top + matrix.height;
    let visible_top = top.max(scroll_top);
    let visible_bottom = grid_bottom.min(scroll_bottom);

    let scroll_right = scroll_left + client_width;
    let grid_right = left + matrix.width;
    let visible_left = left.max(scroll_left);
    let visible_right = grid_right.min(scroll_right);

    VisibleSize {
        width: (visible_right - visible_left).max(0.0),
        height: (visible_bottom - visible_top).max(0.0),
        offset_right: scroll_right - visible_right,
        offset_bottom: scroll_bottom - visible_bottom,
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
    use crate::layout::CellMatrixBuilder;
    use crate::types::{Cell, Column, Row};

    fn matrix(rows: usize, cols: usize) -> CellMatrix {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}")).with_width(100.0)).collect();
        let rows = (0..rows)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text(""); cols]))
            .collect();
        CellMatrixBuilder::new(rows, columns).build().unwrap()
    }

    #[test]
    fn test_offsets_are_scroll_invariant() {
        let m = matrix(100, 20);
        let mut vp = Viewport::in_container(&m, 400.0, 300.0);
        assert_eq!(grid_offsets(&vp), (0.0, 0.0));
        vp.scroll_to(120.0, 500.0);
        assert_eq!(grid_offsets(&vp), (0.0, 0.0));
    }

    #[test]
    fn test_visible_size_clipped_to_container() {
        let m = matrix(100, 20);
        let mut vp = Viewport::in_container(&m, 400.0, 300.0);
        vp.scroll_to(0.0, 1000.0);
        let size = visible_size(&vp, &m);
        assert_eq!(size.width, 400.0);
        assert_eq!(size.height, 300.0);
        assert_eq!(size.offset_bottom, 0.0);
    }

    #[test]
    fn test_small_grid_leaves_offset() {
        let m = matrix(2, 2);
        let vp = Viewport::in_container(&m, 400.0, 300.0);
        let size = visible_size(&vp, &m);
        assert_eq!(size.width, 200.0);
        assert_eq!(size.offset_right, 200.0);
        assert_eq!(size.height, 50.0);
    }

    #[test]
    fn test_sticky_offset() {
        assert_eq!(sticky_offset(50.0, 20.0), 30.0);
        assert_eq!(sticky_offset(10.0, 20.0), 0.0);
    }

    #[test]
    fn test_clamp_scroll() {
        let m = matrix(10, 10);
        let mut vp = Viewport::in_container(&m, 400.0, 100.0);
        vp.scroll_to(5000.0, -20.0);
        vp.clamp_scroll(&m);
        assert_eq!(vp.scroll_x, 600.0);
        assert_eq!(vp.scroll_y, 0.0);
    }
}
