//! Search service - public hotel search
//!
//! Orchestrates a search by:
//! - Parsing decoded query items into a `SearchFilter`
//! - Compiling the filter into a predicate and resolving the sort key
//! - Fetching one page from the hotel store
//! - Reporting pagination against the whole collection

use crate::{db::HotelStore, models::Hotel, Result};
use staybook_search::{
    HotelPredicate, PageWindow, Pagination, SearchFilter, SearchPage, SortOption,
};
use std::sync::Arc;

/// Search service coordinates hotel search requests
pub struct SearchService {
    hotels: Arc<dyn HotelStore>,
}

impl SearchService {
    pub fn new(hotels: Arc<dyn HotelStore>) -> Self {
        Self { hotels }
    }

    /// GET /api/hotels/search?params
    ///
    /// `total` and `pages` count every hotel in the store, not just the
    /// matches.
    pub async fn search(&self, query_items: &[(String, String)]) -> Result<SearchPage<Hotel>> {
        let filter = SearchFilter::from_items(query_items)?;
        let predicate = HotelPredicate::from_filter(&filter);
        let window = PageWindow::new(filter.page);
        let sort = filter.sort.map(SortOption::key);

        tracing::debug!(
            clauses = predicate.clauses().len(),
            sort = filter.sort.map(SortOption::as_str).unwrap_or("natural"),
            page = window.page(),
            "Searching hotels"
        );

        let hotels = self.hotels.search(&predicate, sort, window).await?;
        let total = self.hotels.count_all().await?;

        Ok(SearchPage {
            data: hotels.into_iter().map(Hotel::without_bookings).collect(),
            pagination: Pagination::new(total, window),
        })
    }
}
