//! Layout engine: grid geometry, sticky panes and viewport math.
//!
//! This module handles:
//! - Building the cell matrix from row/column declarations
//! - Partitioning rows/columns into sticky bands and the scrollable body
//! - Binary search for efficient cell lookup at client coordinates
//! - Virtualized visible-range windowing and scroll-into-view targets
//! - Span (merged cell) handling

mod builder;
mod location;
mod matrix;
mod pointer;
mod range;
mod scroll;
mod sticky;
mod viewport;
mod visible;

pub use builder::CellMatrixBuilder;
pub use location::{GridColumn, GridRow, Location, PointerLocation};
pub use matrix::{
    CellMatrix, SpanInfo, StickyCounts, StickyRanges, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT,
    MIN_COLUMN_WIDTH,
};
pub use pointer::{location_from_client, FavorScroll};
pub use range::{Range, SliceDirection};
pub use scroll::scroll_into_view;
pub use sticky::{responsive_sticky, StickyBreakpoints, DEFAULT_STICKY_BREAKPOINT};
pub use viewport::{grid_offsets, sticky_offset, visible_size, Rect, Viewport, ViewportQuery, VisibleSize};
pub use visible::{recalc_visible_range, ScrollBoundaries, VisibleRange, VS_PAGE_HEIGHT, VS_PAGE_WIDTH};
