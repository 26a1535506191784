//! Responsive sticky panes: pinned bands that would eat too much of the
//! viewport are dropped for that axis.

use super::matrix::{StickyCounts, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT};
use crate::types::{Column, Row};

/// Default breakpoint, in percent of the container size
pub const DEFAULT_STICKY_BREAKPOINT: f32 = 50.0;

/// Per-axis breakpoints in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyBreakpoints {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for StickyBreakpoints {
    fn default() -> Self {
        Self {
            horizontal: DEFAULT_STICKY_BREAKPOINT,
            vertical: DEFAULT_STICKY_BREAKPOINT,
        }
    }
}

/// Effective sticky counts for a container of `client_size`.
///
/// Sizes are predicted from the declarations (default sizes for unsized
/// rows/columns) so this can run before the matrix is built.
pub fn responsive_sticky(
    requested: StickyCounts,
    rows: &[Row],
    columns: &[Column],
    client_size: (f32, f32),
    breakpoints: StickyBreakpoints,
) -> StickyCounts {
    let mut effective = requested;
    let (client_width, client_height) = client_size;

    if requested.left > 0 || requested.right > 0 {
        let widths = |cols: &[Column]| -> f32 {
            cols.iter()
                .map(|c| c.width.unwrap_or(DEFAULT_COLUMN_WIDTH))
                .sum()
        };
        let predicted = widths(head(columns, requested.left)) + widths(tail(columns, requested.right));
        if predicted > breakpoints.horizontal * client_width / 100.0 {
            effective.left = 0;
            effective.right = 0;
        }
    }

    if requested.top > 0 || requested.bottom > 0 {
        let heights = |rows: &[Row]| -> f32 {
            rows.iter()
                .map(|r| r.height.unwrap_or(DEFAULT_ROW_HEIGHT))
                .sum()
        };
        let predicted = heights(head(rows, requested.top)) + heights(tail(rows, requested.bottom));
        if predicted > breakpoints.vertical * client_height / 100.0 {
            effective.top = 0;
            effective.bottom = 0;
        }
    }

    if effective != requested {
        tracing::debug!(?requested, ?effective, "sticky panes reduced for viewport");
    }
    effective
}

fn head<T>(items: &[T], n: usize) -> &[T] {
    items.get(..n.min(items.len())).unwrap_or_default()
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    items
        .get(items.len().saturating_sub(n)..)
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn decl(rows: usize, cols: usize) -> (Vec<Row>, Vec<Column>) {
        let columns = (0..cols).map(|c| Column::new(format!("c{c}"))).collect();
        let rows = (0..rows)
            .map(|r| Row::new(format!("r{r}"), vec![Cell::text(""); cols]))
            .collect();
        (rows, columns)
    }

    #[test]
    fn test_keeps_sticky_that_fits() {
        let (rows, columns) = decl(40, 10);
        let requested = StickyCounts {
            top: 2,
            left: 1,
            ..StickyCounts::default()
        };
        let got = responsive_sticky(requested, &rows, &columns, (800.0, 600.0), StickyBreakpoints::default());
        assert_eq!(got, requested);
    }

    #[test]
    fn test_drops_axis_past_breakpoint() {
        let (rows, columns) = decl(40, 10);
        let requested = StickyCounts {
            top: 1,
            left: 2,
            right: 1,
            ..StickyCounts::default()
        };
        // 450px of pinned columns in an 800px container exceeds 50%
        let got = responsive_sticky(requested, &rows, &columns, (800.0, 600.0), StickyBreakpoints::default());
        assert_eq!(got.left, 0);
        assert_eq!(got.right, 0);
        assert_eq!(got.top, 1);
    }

    #[test]
    fn test_breakpoint_is_configurable() {
        let (rows, columns) = decl(40, 10);
        let requested = StickyCounts {
            bottom: 4,
            ..StickyCounts::default()
        };
        let tight = StickyBreakpoints {
            horizontal: 50.0,
            vertical: 10.0,
        };
        let got = responsive_sticky(requested, &rows, &columns, (800.0, 600.0), tight);
        assert_eq!(got.bottom, 0);
    }
}
