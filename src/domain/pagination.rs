//! Offset pagination metadata returned alongside a page of posts.

use postboard_api_types::PaginationMeta;

/// Position of a fetched page within the filtered result set.
///
/// `page` is stored as received; it may be out of range when the location was
/// edited by hand, and consumers disable navigation instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
    total_rows: u64,
}

impl Pagination {
    /// A zero `limit` is treated as 1 so the page count stays defined.
    pub fn new(page: u32, limit: u32, total_rows: u64) -> Self {
        Self {
            page,
            limit: limit.max(1),
            total_rows,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    /// `ceil(total_rows / limit)`; zero when there are no rows.
    pub fn total_pages(&self) -> u64 {
        self.total_rows.div_ceil(u64::from(self.limit))
    }

    /// Page count clamped to at least one, for display.
    pub fn display_total_pages(&self) -> u64 {
        self.total_pages().max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

impl From<PaginationMeta> for Pagination {
    fn from(meta: PaginationMeta) -> Self {
        Self::new(meta.page, meta.limit, meta.total_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 6, 0).total_pages(), 0);
        assert_eq!(Pagination::new(1, 6, 1).total_pages(), 1);
        assert_eq!(Pagination::new(1, 6, 6).total_pages(), 1);
        assert_eq!(Pagination::new(1, 6, 7).total_pages(), 2);
        assert_eq!(Pagination::new(1, 6, 0).display_total_pages(), 1);
    }

    #[test]
    fn navigation_flags_follow_boundaries() {
        for total_rows in 0..40u64 {
            for limit in 1..8u32 {
                for page in 0..10u32 {
                    let pagination = Pagination::new(page, limit, total_rows);
                    let total_pages = total_rows.div_ceil(u64::from(limit));
                    assert_eq!(pagination.has_previous(), page > 1);
                    assert_eq!(pagination.has_next(), u64::from(page) < total_pages);
                }
            }
        }
    }

    #[test]
    fn zero_limit_is_clamped() {
        let pagination = Pagination::new(1, 0, 5);
        assert_eq!(pagination.limit(), 1);
        assert_eq!(pagination.total_pages(), 5);
    }
}
