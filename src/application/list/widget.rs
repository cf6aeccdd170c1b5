use crate::domain::pagination::Pagination;

/// In-memory state of the prev/next pagination control.
///
/// The controller owns this state; the rendered widget is only a projection
/// of [`PaginationView`] and is never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWidget {
    page: u32,
    pagination: Option<Pagination>,
}

/// What the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u64,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PaginationWidget {
    /// Widget for `page` before any response has arrived.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            pagination: None,
        }
    }

    pub fn update(&mut self, pagination: Pagination) {
        self.page = pagination.page();
        self.pagination = Some(pagination);
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    /// Page to load for "previous", or `None` at the first page.
    pub fn prev_target(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// Page to load for "next", or `None` at the last page or while the page
    /// count is still unknown.
    pub fn next_target(&self) -> Option<u32> {
        let pagination = self.pagination?;
        pagination
            .has_next()
            .then(|| pagination.page().saturating_add(1))
    }

    pub fn view(&self) -> PaginationView {
        match self.pagination {
            Some(pagination) => PaginationView {
                page: pagination.page(),
                total_pages: pagination.display_total_pages(),
                prev_disabled: !pagination.has_previous(),
                next_disabled: !pagination.has_next(),
            },
            None => PaginationView {
                page: self.page,
                total_pages: 1,
                prev_disabled: self.page <= 1,
                next_disabled: true,
            },
        }
    }
}
