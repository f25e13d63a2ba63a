//! Search filter parsing.
//!
//! Query parameters arrive as flat `(key, value)` pairs (already
//! percent-decoded). Browser clients send every known key on every request,
//! so an empty value is treated exactly like a missing one.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{Error, Result, SortOption};

/// Optional constraints of a single hotel search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Free text matched against city and country.
    pub destination: Option<String>,
    pub adult_count: Option<i32>,
    pub child_count: Option<i32>,
    /// Facilities a hotel must offer (all of them).
    pub facilities: Vec<String>,
    /// Accepted hotel types (any of them).
    pub types: Vec<String>,
    /// Accepted star ratings (any of them).
    pub stars: Vec<i32>,
    pub max_price: Option<Decimal>,
    pub sort: Option<SortOption>,
    /// Requested 1-based page. `None` when absent or not a number.
    pub page: Option<i64>,
}

impl SearchFilter {
    /// Parse a filter from decoded query items.
    ///
    /// Repeated `facilities`, `types` and `stars` keys accumulate. For every
    /// other key the last occurrence wins. Unknown keys are ignored.
    ///
    /// Malformed guest counts, star ratings and prices are rejected. A
    /// malformed `page` falls back to the first page and an unknown
    /// `sortOption` leaves the result order unspecified.
    pub fn from_items(items: &[(String, String)]) -> Result<Self> {
        let mut filter = SearchFilter::default();

        for (key, value) in items {
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "destination" => filter.destination = Some(value.clone()),
                "adultCount" => filter.adult_count = Some(parse_int("adultCount", value)?),
                "childCount" => filter.child_count = Some(parse_int("childCount", value)?),
                "facilities" => filter.facilities.push(value.clone()),
                "types" => filter.types.push(value.clone()),
                "stars" => filter.stars.push(parse_int("stars", value)?),
                "maxPrice" => filter.max_price = Some(parse_decimal("maxPrice", value)?),
                "sortOption" => filter.sort = SortOption::parse(value),
                "page" => filter.page = value.trim().parse().ok(),
                _ => {}
            }
        }

        Ok(filter)
    }

    /// True when no dimension constrains the result set.
    pub fn is_unconstrained(&self) -> bool {
        self.destination.is_none()
            && self.adult_count.is_none()
            && self.child_count.is_none()
            && self.facilities.is_empty()
            && self.types.is_empty()
            && self.stars.is_empty()
            && self.max_price.is_none()
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i32> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
