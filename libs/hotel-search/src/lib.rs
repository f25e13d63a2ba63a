//! Hotel search core.
//!
//! Turns the optional filters of a hotel search request into a
//! [`HotelPredicate`], resolves the requested [`SortOption`] and computes the
//! fixed-size [`PageWindow`] plus the [`Pagination`] metadata reported back to
//! clients. Nothing here performs I/O: storage backends evaluate the predicate
//! themselves, either in memory through [`HotelPredicate::matches`] or by
//! rendering its [`Clause`]s into their own query language.

#![forbid(unsafe_code)]

mod error;
mod filter;
mod page;
mod predicate;
mod sort;

pub use error::{Error, Result};
pub use filter::SearchFilter;
pub use page::{PageWindow, Pagination, SearchPage, PAGE_SIZE};
pub use predicate::{Clause, HotelPredicate, Searchable};
pub use sort::{SortField, SortKey, SortOption};
