//! # Page Arithmetic
//!
//! Pure functions for slicing a flat item collection into pages and for
//! checking the host's per-page widget ceiling. Everything here is
//! total-order deterministic: same inputs, same answer, no state.
//!
//! Page indices are zero-based throughout. `total_pages` is the index of the
//! LAST page, not the page count: a collection that fills exactly `n` pages
//! has `total_pages == n - 1`.

use std::ops::Range;

use crate::error::{ConfigError, MAX_WIDGETS_PER_PAGE};

/// First/Middle/Last classification of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePosition {
    First,
    Middle,
    Last,
}

/// Index of the last page for `item_count` items at `items_per_page` each.
///
/// Returns `None` when either input is zero — the paginator is not yet
/// computable and renders must fail until both geometry and a collection
/// are configured. An exact multiple yields `item_count / items_per_page - 1`.
pub fn total_pages(item_count: usize, items_per_page: usize) -> Option<usize> {
    if item_count == 0 || items_per_page == 0 {
        return None;
    }
    Some((item_count - 1) / items_per_page)
}

/// The half-open index range of the items visible on `page`.
///
/// Never exceeds `[0, item_count)`; the last page's slice is short when the
/// collection is not an exact multiple of the page size.
pub fn page_slice(page: usize, items_per_page: usize, item_count: usize) -> Range<usize> {
    let start = (page * items_per_page).min(item_count);
    let end = (start + items_per_page).min(item_count);
    start..end
}

/// Classify `page` against the last page index.
///
/// `total_pages == 0` collapses to the single-page case, reported as `First`.
pub fn position(page: usize, total_pages: usize) -> PagePosition {
    if page == 0 {
        PagePosition::First
    } else if page >= total_pages {
        PagePosition::Last
    } else {
        PagePosition::Middle
    }
}

/// Extra widget slots consumed by row-spacing placeholders.
///
/// One-wide and three-wide rows pack cleanly into the host's panel row
/// model; any other width needs one spacer widget per rendered row to force
/// the row break.
pub fn row_spacing_overhead(rows: usize, columns: usize) -> usize {
    if columns == 1 || columns == 3 {
        0
    } else {
        rows
    }
}

/// Enforce the host's 25-widget-per-page ceiling.
///
/// The rendered widget total is `rows * columns` items plus the row-spacing
/// overhead. This is checked against the geometry alone, independent of how
/// many items the collection holds: a page that CAN fill must fit.
pub fn check_page_capacity(rows: usize, columns: usize) -> Result<(), ConfigError> {
    let items_per_page = rows * columns;
    let spacers = row_spacing_overhead(rows, columns);
    let widgets = items_per_page + spacers;
    if widgets > MAX_WIDGETS_PER_PAGE {
        return Err(ConfigError::Capacity {
            rows,
            columns,
            widgets,
            spacers,
            max: MAX_WIDGETS_PER_PAGE,
        });
    }
    Ok(())
}

/// Enforce the host's per-selector option ceiling.
///
/// A rendered menu holds the current page's option slice plus the menu's
/// fixed options; together they must fit in one selector.
pub fn check_menu_capacity(page_items: usize, fixed: usize) -> Result<(), ConfigError> {
    let total = page_items + fixed;
    if total > MAX_WIDGETS_PER_PAGE {
        return Err(ConfigError::MenuCapacity {
            page_items,
            fixed,
            total,
            max: MAX_WIDGETS_PER_PAGE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_basic() {
        // 10 items, 4 per page → pages 0,1,2 holding 4,4,2
        assert_eq!(total_pages(10, 4), Some(2));
        assert_eq!(total_pages(1, 4), Some(0));
        assert_eq!(total_pages(4, 4), Some(0));
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        // an exact multiple yields count/per - 1 (zero-indexed last page)
        assert_eq!(total_pages(12, 4), Some(2));
        assert_eq!(total_pages(25, 5), Some(4));
    }

    #[test]
    fn test_total_pages_not_computable() {
        assert_eq!(total_pages(0, 4), None);
        assert_eq!(total_pages(10, 0), None);
    }

    #[test]
    fn test_page_slice_bounds() {
        assert_eq!(page_slice(0, 4, 10), 0..4);
        assert_eq!(page_slice(1, 4, 10), 4..8);
        // last page is short
        assert_eq!(page_slice(2, 4, 10), 8..10);
    }

    #[test]
    fn test_page_slice_never_exceeds_collection() {
        let total = total_pages(10, 4).unwrap();
        let last = page_slice(total, 4, 10);
        assert_eq!(last.len(), 10 - 4 * total);
        // a page past the end degrades to an empty slice, not a panic
        assert_eq!(page_slice(9, 4, 10), 10..10);
    }

    #[test]
    fn test_position_classification() {
        assert_eq!(position(0, 2), PagePosition::First);
        assert_eq!(position(1, 2), PagePosition::Middle);
        assert_eq!(position(2, 2), PagePosition::Last);
        // single page collapses to First
        assert_eq!(position(0, 0), PagePosition::First);
    }

    #[test]
    fn test_row_spacing_overhead() {
        assert_eq!(row_spacing_overhead(4, 1), 0);
        assert_eq!(row_spacing_overhead(4, 3), 0);
        assert_eq!(row_spacing_overhead(4, 2), 4);
        assert_eq!(row_spacing_overhead(2, 5), 2);
    }

    #[test]
    fn test_page_capacity() {
        // 8x3 = 24 widgets, no spacers → fits
        assert!(check_page_capacity(8, 3).is_ok());
        // 5x5 = 25 items + 5 spacers = 30 → over the ceiling
        let err = check_page_capacity(5, 5).unwrap_err();
        assert!(err.is_capacity());
        // 3x4 = 12 items + 3 spacers = 15 → fits
        assert!(check_page_capacity(3, 4).is_ok());
        // 9x3 = 27 items, no spacers → over
        assert!(check_page_capacity(9, 3).is_err());
    }

    #[test]
    fn test_menu_capacity() {
        assert!(check_menu_capacity(20, 5).is_ok());
        let err = check_menu_capacity(24, 2).unwrap_err();
        assert!(err.is_capacity());
    }
}
