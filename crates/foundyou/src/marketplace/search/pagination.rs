use serde::Serialize;

/// Page cursor for the search listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    current: u32,
    total: u32,
}

impl Pagination {
    /// A pager with at least one page, positioned on the first.
    pub fn new(total: u32) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Jump to `page`. Out-of-range pages and the current page are no-ops and return `false`.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page == 0 || page > self.total || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        self.go_to(self.current.saturating_sub(1))
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Adopt a page count reported by the listing, pulling the cursor back inside it.
    pub fn set_total(&mut self, total: u32) {
        self.total = total.max(1);
        self.current = self.current.min(self.total);
    }

    pub fn rewind(&mut self) {
        self.current = 1;
    }

    /// Page buttons in display order.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.total
    }
}
