//! Database layer - stores and data access

pub mod memory;
pub mod postgres;
pub mod query_builder;
pub mod traits;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use traits::{HotelStore, UserStore};

use crate::{Error, Result};
use staybook_search::PageWindow;

/// Offset of the first record in `window`. Windows that start before the
/// first record are a store failure, not an empty page.
pub(crate) fn checked_skip(window: PageWindow) -> Result<i64> {
    let skip = window.skip();
    if skip < 0 {
        return Err(Error::Store(format!(
            "page {} resolves to negative offset {}",
            window.page(),
            skip
        )));
    }
    Ok(skip)
}
