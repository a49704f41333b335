// ── Pagination ──

/// Rows per page for the router inventory.
pub const ROUTER_PAGE_SIZE: usize = 10;

/// One page of a derived list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, already clamped to `1..=page_count`.
    pub number: usize,
    /// Always at least 1.
    pub page_count: usize,
    pub total: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    /// 1-based index of the first row on this page (0 when empty).
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.number - 1) * self.page_size + 1
        }
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` to `page` (1-based). A page beyond the end clamps to the
/// last valid page; page 0 clamps to 1.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = items.len();
    let page_count = page_count(total, page_size);
    let number = page.clamp(1, page_count);
    let items = items
        .into_iter()
        .skip((number - 1) * page_size)
        .take(page_size)
        .collect();
    Page {
        items,
        number,
        page_count,
        total,
        page_size,
    }
}

/// Requested page for a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Apply to `items`, remembering the clamped page number.
    pub fn apply<T>(&mut self, items: Vec<T>) -> Page<T> {
        let page = paginate(items, self.page, self.page_size);
        self.page = page.number;
        page
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(ROUTER_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_page_one_of_one() {
        let page = paginate(Vec::<u8>::new(), 3, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.page_count, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.first_row(), 0);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let page = paginate((1..=23).collect(), 9, 10);
        assert_eq!(page.number, 3);
        assert_eq!(page.items, [21, 22, 23]);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn valid_pages_are_never_empty() {
        for total in 1..=35usize {
            for size in 1..=12usize {
                for page in 1..=page_count(total, size) {
                    assert!(size * (page - 1) < total);
                    assert!(!paginate((0..total).collect(), page, size).items.is_empty());
                }
            }
        }
    }

    #[test]
    fn paginator_tracks_the_clamped_page() {
        let mut pager = Paginator::new(10);
        pager.go_to(7);
        let page = pager.apply((0..15).collect());
        assert_eq!(page.number, 2);
        assert_eq!(pager.page(), 2);

        pager.prev();
        pager.prev();
        assert_eq!(pager.page(), 1);
    }
}
