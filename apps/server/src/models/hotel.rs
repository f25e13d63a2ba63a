//! Hotel and booking records.
//!
//! Field names follow the JSON wire format used by the web client: camelCase,
//! with record ids exposed as `_id`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use staybook_search::Searchable;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub facilities: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_night: Decimal,
    pub star_rating: i32,
    pub image_urls: Vec<String>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Hotel {
    /// Build a new listing owned by `user_id` from a validated draft.
    pub fn from_draft(user_id: Uuid, draft: HotelDraft, now: DateTime<Utc>) -> Self {
        let mut hotel = Self {
            id: Uuid::new_v4(),
            user_id,
            name: String::new(),
            city: String::new(),
            country: String::new(),
            description: String::new(),
            hotel_type: String::new(),
            adult_count: 0,
            child_count: 0,
            facilities: Vec::new(),
            price_per_night: Decimal::ZERO,
            star_rating: 0,
            image_urls: Vec::new(),
            last_updated: now,
            bookings: Vec::new(),
        };
        hotel.apply(draft, now);
        hotel
    }

    /// Replace every editable field. Id, owner and bookings are kept.
    pub fn apply(&mut self, draft: HotelDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.city = draft.city;
        self.country = draft.country;
        self.description = draft.description;
        self.hotel_type = draft.hotel_type;
        self.adult_count = draft.adult_count;
        self.child_count = draft.child_count;
        self.facilities = draft.facilities;
        self.price_per_night = draft.price_per_night;
        self.star_rating = draft.star_rating;
        self.image_urls = draft.image_urls;
        self.last_updated = now;
    }

    /// The public view of a listing carries no guest bookings.
    pub fn without_bookings(mut self) -> Self {
        self.bookings.clear();
        self
    }

    /// Keep only the bookings made by `user_id`.
    pub fn with_bookings_of(mut self, user_id: Uuid) -> Self {
        self.bookings.retain(|b| b.user_id == user_id);
        self
    }
}

impl Searchable for Hotel {
    fn city(&self) -> &str {
        &self.city
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn adult_count(&self) -> i32 {
        self.adult_count
    }

    fn child_count(&self) -> i32 {
        self.child_count
    }

    fn facilities(&self) -> &[String] {
        &self.facilities
    }

    fn hotel_type(&self) -> &str {
        &self.hotel_type
    }

    fn star_rating(&self) -> i32 {
        self.star_rating
    }

    fn price_per_night(&self) -> Decimal {
        self.price_per_night
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub adult_count: i32,
    pub child_count: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

/// Client-editable hotel fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HotelDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Hotel type is required"))]
    pub hotel_type: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Adult count must not be negative"))]
    pub adult_count: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Child count must not be negative"))]
    pub child_count: i32,
    #[validate(length(min = 1, message = "Facilities are required"))]
    pub facilities: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    pub price_per_night: Decimal,
    #[validate(range(min = 1, max = 5, message = "Star rating must be between 1 and 5"))]
    pub star_rating: i32,
    #[serde(default)]
    #[validate(length(max = 6, message = "At most 6 images are allowed"))]
    pub image_urls: Vec<String>,
}

/// Upper bound (exclusive) of `price_per_night NUMERIC(12, 2)`.
const MAX_PRICE_EXCLUSIVE: i64 = 10_000_000_000;

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() {
        "Price per night is required"
    } else if price.normalize().scale() > 2 {
        "Price per night must have at most 2 decimal places"
    } else if *price >= Decimal::from(MAX_PRICE_EXCLUSIVE) {
        "Price per night is too large"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("price");
    err.message = Some(message.into());
    Err(err)
}
