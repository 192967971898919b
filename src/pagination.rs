use serde::Serialize;

/// Requested page window for repository queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Row offset of the first item on this page. Page numbers below one
    /// are treated as the first page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

/// One page of results together with the page geometry templates need.
#[derive(Debug, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    /// A result set always spans at least one page, even when empty.
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages: total_pages.max(1),
        }
    }
}

/// Number of pages needed for `total` rows, never less than one.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// A slot in the pager: a concrete page number or a gap marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: Option<usize>,
    pub current: bool,
}

/// Pager layout: first and last pages always show, plus a window of two
/// pages around the current one. A single gap marker stands in for each
/// elided stretch.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let current = current.max(1);
    let mut links = Vec::new();
    for number in 1..=total_pages.max(1) {
        let distance = number.abs_diff(current);
        if number == 1 || number == total_pages || distance < 3 {
            links.push(PageLink {
                number: Some(number),
                current: number == current,
            });
        } else if distance == 3 {
            links.push(PageLink {
                number: None,
                current: false,
            });
        }
    }
    links
}
