use serde::{Deserialize, Serialize};

/// Number of hotels per result page.
pub const PAGE_SIZE: i64 = 5;

/// Skip/limit window for one requested page.
///
/// Pages are 1-based and not clamped: page 0 or below yields a negative skip,
/// which storage backends reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: i64,
}

impl PageWindow {
    pub fn new(page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Pagination metadata returned next to a page of hotels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl Pagination {
    /// `pages` is `ceil(total / PAGE_SIZE)`.
    pub fn new(total: i64, window: PageWindow) -> Self {
        let total = total.max(0);
        Self {
            total,
            page: window.page(),
            pages: (total + PAGE_SIZE - 1) / PAGE_SIZE,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}
