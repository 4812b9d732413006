//! Page navigation for offset-based inbox results.

use serde::Serialize;

/// Rows per page when the caller does not choose a page size.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;

/// Page numbers to render, `None` marking a gap between ranges.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Position of an inbox page within the full result set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// One-based number of the current page.
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
}

impl PageWindow {
    /// Derives the window from the backend total and the requested slice.
    pub fn new(total_count: Option<u64>, offset: Option<u32>, limit: Option<u32>) -> Self {
        let limit = u64::from(limit.filter(|l| *l > 0).unwrap_or(DEFAULT_ITEMS_PER_PAGE));
        let total_pages = total_count.map_or(0, |total| total.div_ceil(limit)) as usize;
        let page = (u64::from(offset.unwrap_or(0)) / limit) as usize + 1;

        Self {
            page,
            total_pages,
            pages: get_pages(total_pages, page, 2, 2, 4, 2),
        }
    }
}
