use serde::Serialize;

use crate::domain::types::{PageNumber, PageSize};

/// Builds the list of page controls around `current_page`.
///
/// `None` entries mark collapsed ranges. The edge and window widths keep the
/// first/last pages and the neighbourhood of the current page visible.
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

/// One page of results together with the metadata needed to render
/// pagination controls.
///
/// `current_page` is echoed back as requested, even when it lies past
/// `total_pages`; such pages simply carry no items.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_count: usize, page: PageNumber, page_size: PageSize) -> Self {
        let total_pages = page_size.pages_for(total_count);
        let current_page = page.get() as usize;

        Self {
            items,
            total_count,
            page_size: page_size.get() as usize,
            total_pages,
            current_page,
            pages: get_pages(total_pages, current_page, 2, 2, 4, 2),
        }
    }

    /// Pagination controls are only worth showing for more than one page.
    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }
}
