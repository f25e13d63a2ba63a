use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use staybook::models::{Booking, Hotel};
use uuid::Uuid;

/// Builds stored hotels for seeding a store directly.
pub struct HotelBuilder {
    hotel: Hotel,
}

impl HotelBuilder {
    pub fn new(owner: Uuid, name: &str) -> Self {
        Self {
            hotel: Hotel {
                id: Uuid::new_v4(),
                user_id: owner,
                name: name.to_string(),
                city: "Lisbon".to_string(),
                country: "Portugal".to_string(),
                description: format!("{name} description"),
                hotel_type: "Hotel".to_string(),
                adult_count: 2,
                child_count: 0,
                facilities: vec!["Free WiFi".to_string()],
                price_per_night: Decimal::from(100),
                star_rating: 3,
                image_urls: Vec::new(),
                last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                bookings: Vec::new(),
            },
        }
    }

    pub fn location(mut self, city: &str, country: &str) -> Self {
        self.hotel.city = city.to_string();
        self.hotel.country = country.to_string();
        self
    }

    pub fn hotel_type(mut self, hotel_type: &str) -> Self {
        self.hotel.hotel_type = hotel_type.to_string();
        self
    }

    pub fn guests(mut self, adults: i32, children: i32) -> Self {
        self.hotel.adult_count = adults;
        self.hotel.child_count = children;
        self
    }

    pub fn facilities(mut self, facilities: &[&str]) -> Self {
        self.hotel.facilities = facilities.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.hotel.price_per_night = Decimal::from(price);
        self
    }

    pub fn stars(mut self, stars: i32) -> Self {
        self.hotel.star_rating = stars;
        self
    }

    pub fn booked_by(mut self, user_id: Uuid, email: &str) -> Self {
        let check_in = Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap();
        self.hotel.bookings.push(Booking {
            id: Uuid::new_v4(),
            user_id,
            first_name: "Guest".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            adult_count: 2,
            child_count: 0,
            check_in,
            check_out: check_in + Duration::days(2),
            total_cost: self.hotel.price_per_night * Decimal::from(2),
        });
        self
    }

    pub fn build(self) -> Hotel {
        self.hotel
    }
}

/// JSON body accepted by `POST /api/my-hotels` and `PUT /api/my-hotels/:id`.
pub fn hotel_draft_json(name: &str) -> Value {
    json!({
        "name": name,
        "city": "Nice",
        "country": "France",
        "description": "By the sea",
        "type": "Beach Resort",
        "adultCount": 2,
        "childCount": 1,
        "facilities": ["Free WiFi", "Outdoor Pool"],
        "pricePerNight": 120.5,
        "starRating": 4,
        "imageUrls": ["https://img.example/1.jpg"]
    })
}

pub fn register_json(email: &str) -> Value {
    json!({
        "firstName": "Test",
        "lastName": "User",
        "email": email,
        "password": "password123"
    })
}
