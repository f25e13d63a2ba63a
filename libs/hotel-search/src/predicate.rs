//! Hotel match predicates.
//!
//! A [`HotelPredicate`] is a conjunction of [`Clause`]s, one per constrained
//! filter dimension. An empty predicate matches every hotel.

use rust_decimal::Decimal;

use crate::SearchFilter;

/// Read access to the fields a search can constrain.
pub trait Searchable {
    fn city(&self) -> &str;
    fn country(&self) -> &str;
    fn adult_count(&self) -> i32;
    fn child_count(&self) -> i32;
    fn facilities(&self) -> &[String];
    fn hotel_type(&self) -> &str;
    fn star_rating(&self) -> i32;
    fn price_per_night(&self) -> Decimal;
}

/// A single match condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// City OR country contains the text, ignoring case.
    Destination(String),
    /// Adult capacity is at least the value.
    MinAdults(i32),
    /// Child capacity is at least the value.
    MinChildren(i32),
    /// Every listed facility is offered (containment, not overlap).
    AllFacilities(Vec<String>),
    /// Hotel type is one of the values.
    TypeIn(Vec<String>),
    /// Star rating is one of the values.
    StarRatingIn(Vec<i32>),
    /// Nightly price is at most the value.
    MaxPrice(Decimal),
}

impl Clause {
    /// Wire name(s) of the field(s) this clause reads.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Destination(_) => "city|country",
            Self::MinAdults(_) => "adultCount",
            Self::MinChildren(_) => "childCount",
            Self::AllFacilities(_) => "facilities",
            Self::TypeIn(_) => "type",
            Self::StarRatingIn(_) => "starRating",
            Self::MaxPrice(_) => "pricePerNight",
        }
    }

    pub fn matches<T>(&self, hotel: &T) -> bool
    where
        T: Searchable + ?Sized,
    {
        match self {
            Self::Destination(text) => {
                contains_ignore_case(hotel.city(), text)
                    || contains_ignore_case(hotel.country(), text)
            }
            Self::MinAdults(min) => hotel.adult_count() >= *min,
            Self::MinChildren(min) => hotel.child_count() >= *min,
            Self::AllFacilities(required) => {
                let offered = hotel.facilities();
                required.iter().all(|f| offered.contains(f))
            }
            Self::TypeIn(types) => types.iter().any(|t| t == hotel.hotel_type()),
            Self::StarRatingIn(stars) => stars.contains(&hotel.star_rating()),
            Self::MaxPrice(max) => hotel.price_per_night() <= *max,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotelPredicate {
    clauses: Vec<Clause>,
}

impl HotelPredicate {
    /// The always-true predicate.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Compile a filter. Dimensions absent from the filter add no clause.
    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut clauses = Vec::new();

        if let Some(destination) = &filter.destination {
            clauses.push(Clause::Destination(destination.clone()));
        }
        if let Some(adults) = filter.adult_count {
            clauses.push(Clause::MinAdults(adults));
        }
        if let Some(children) = filter.child_count {
            clauses.push(Clause::MinChildren(children));
        }
        if !filter.facilities.is_empty() {
            clauses.push(Clause::AllFacilities(filter.facilities.clone()));
        }
        if !filter.types.is_empty() {
            clauses.push(Clause::TypeIn(filter.types.clone()));
        }
        if !filter.stars.is_empty() {
            clauses.push(Clause::StarRatingIn(filter.stars.clone()));
        }
        if let Some(max_price) = filter.max_price {
            clauses.push(Clause::MaxPrice(max_price));
        }

        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches<T>(&self, hotel: &T) -> bool
    where
        T: Searchable + ?Sized,
    {
        self.clauses.iter().all(|clause| clause.matches(hotel))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
