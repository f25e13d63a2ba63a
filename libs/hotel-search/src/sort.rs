use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::Searchable;

/// Sort orders a client can request through `sortOption`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOption {
    /// Highest star rating first.
    StarRating,
    /// Cheapest first.
    PricePerNightAsc,
    /// Most expensive first.
    PricePerNightDesc,
}

impl SortOption {
    /// Parse a `sortOption` value. `pricePerNight` is the historical spelling
    /// of the ascending price order.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "starRating" => Some(Self::StarRating),
            "pricePerNightAsc" | "pricePerNight" => Some(Self::PricePerNightAsc),
            "pricePerNightDesc" => Some(Self::PricePerNightDesc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::StarRating => "starRating",
            Self::PricePerNightAsc => "pricePerNightAsc",
            Self::PricePerNightDesc => "pricePerNightDesc",
        }
    }

    pub fn key(self) -> SortKey {
        match self {
            Self::StarRating => SortKey {
                field: SortField::StarRating,
                ascending: false,
            },
            Self::PricePerNightAsc => SortKey {
                field: SortField::PricePerNight,
                ascending: true,
            },
            Self::PricePerNightDesc => SortKey {
                field: SortField::PricePerNight,
                ascending: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    StarRating,
    PricePerNight,
}

impl SortField {
    /// Wire name of the sorted field.
    pub fn name(self) -> &'static str {
        match self {
            Self::StarRating => "starRating",
            Self::PricePerNight => "pricePerNight",
        }
    }
}

/// A resolved sort key: one field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub ascending: bool,
}

impl SortKey {
    /// Compare two records by this key. Ties compare equal so that a stable
    /// sort keeps the store's natural order.
    pub fn compare<T>(&self, a: &T, b: &T) -> Ordering
    where
        T: Searchable + ?Sized,
    {
        let ordering = match self.field {
            SortField::StarRating => a.star_rating().cmp(&b.star_rating()),
            SortField::PricePerNight => a.price_per_night().cmp(&b.price_per_night()),
        };

        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}
