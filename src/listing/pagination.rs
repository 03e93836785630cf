//! Client-side pagination over an already-fetched result set.

/// One element of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous { enabled: bool },
    Page { number: usize, active: bool },
    Next { enabled: bool },
}

/// Page position over the current result set
///
/// Pages are 1-based. `total_pages` is never below 1, even for an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    total_pages: usize,
    items_per_page: usize,
}

/// `max(1, ceil(count / per_page))`
#[must_use]
pub fn total_pages_for(count: usize, items_per_page: usize) -> usize {
    count.div_ceil(items_per_page.max(1)).max(1)
}

impl PageState {
    /// Create a page state with a fixed page size (a zero size is treated as 1)
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Recompute the page count for a new result and pull the current page
    /// back into range if the result shrank
    pub fn set_result_count(&mut self, count: usize) {
        self.total_pages = total_pages_for(count, self.items_per_page);
        if self.current_page > self.total_pages {
            tracing::debug!(
                "Clamping page {} to {} after result shrank to {} items",
                self.current_page,
                self.total_pages,
                count
            );
            self.current_page = self.total_pages;
        }
    }

    /// Move to page `n`. Returns false (and changes nothing) if out of range.
    pub fn go_to(&mut self, n: usize) -> bool {
        if n < 1 || n > self.total_pages {
            return false;
        }
        self.current_page = n;
        true
    }

    /// Index range of the current page within a result of `len` items
    #[must_use]
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page)
            .min(len);
        let end = self
            .current_page
            .saturating_mul(self.items_per_page)
            .min(len);
        (start, end)
    }

    /// The items shown on the current page
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.bounds(items.len());
        &items[start..end]
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Pagination bar: previous, one entry per page, next.
    /// Empty when everything fits on one page.
    #[must_use]
    pub fn controls(&self) -> Vec<PageControl> {
        if self.total_pages <= 1 {
            return Vec::new();
        }

        let mut controls = Vec::with_capacity(self.total_pages + 2);
        controls.push(PageControl::Previous {
            enabled: self.has_previous(),
        });
        controls.extend((1..=self.total_pages).map(|number| PageControl::Page {
            number,
            active: number == self.current_page,
        }));
        controls.push(PageControl::Next {
            enabled: self.has_next(),
        });
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_boundaries() {
        assert_eq!(total_pages_for(0, 6), 1);
        assert_eq!(total_pages_for(1, 6), 1);
        assert_eq!(total_pages_for(6, 6), 1);
        assert_eq!(total_pages_for(7, 6), 2);
        assert_eq!(total_pages_for(14, 6), 3);
    }

    #[test]
    fn test_slices_cover_result_in_order() {
        let items: Vec<usize> = (1..=14).collect();
        let mut pages = PageState::new(6);
        pages.set_result_count(items.len());

        assert_eq!(pages.slice(&items), &[1, 2, 3, 4, 5, 6]);
        assert!(pages.go_to(2));
        assert_eq!(pages.slice(&items), &[7, 8, 9, 10, 11, 12]);
        assert!(pages.go_to(3));
        assert_eq!(pages.slice(&items), &[13, 14]);
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let mut pages = PageState::new(6);
        pages.set_result_count(18);
        assert!(pages.go_to(3));

        // Data shorter than the page state assumes
        let short: Vec<u8> = vec![1, 2, 3];
        assert!(pages.slice(&short).is_empty());
    }

    #[test]
    fn test_navigation_bounds() {
        let mut pages = PageState::new(6);
        pages.set_result_count(14);

        assert!(!pages.go_to(0));
        assert!(!pages.go_to(4));
        assert_eq!(pages.current_page(), 1);

        assert!(pages.go_to(3));
        assert!(pages.go_to(1));
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn test_clamp_when_result_shrinks() {
        let mut pages = PageState::new(6);
        pages.set_result_count(18);
        assert!(pages.go_to(3));

        pages.set_result_count(4);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn test_growth_keeps_current_page() {
        let mut pages = PageState::new(6);
        pages.set_result_count(12);
        assert!(pages.go_to(2));

        pages.set_result_count(30);
        assert_eq!(pages.current_page(), 2);
        assert_eq!(pages.total_pages(), 5);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let mut pages = PageState::new(0);
        pages.set_result_count(3);
        assert_eq!(pages.items_per_page(), 1);
        assert_eq!(pages.total_pages(), 3);
    }

    #[test]
    fn test_controls_hidden_for_single_page() {
        let mut pages = PageState::new(6);
        pages.set_result_count(6);
        assert!(pages.controls().is_empty());
    }

    #[test]
    fn test_controls_disable_edges() {
        let mut pages = PageState::new(6);
        pages.set_result_count(14);

        let controls = pages.controls();
        assert_eq!(controls.len(), 5);
        assert_eq!(controls[0], PageControl::Previous { enabled: false });
        assert_eq!(controls[1], PageControl::Page { number: 1, active: true });
        assert_eq!(controls[4], PageControl::Next { enabled: true });

        pages.go_to(3);
        let controls = pages.controls();
        assert_eq!(controls[0], PageControl::Previous { enabled: true });
        assert_eq!(controls[3], PageControl::Page { number: 3, active: true });
        assert_eq!(controls[4], PageControl::Next { enabled: false });
    }
}
