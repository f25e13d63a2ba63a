use crate::{db::HotelStore, models::Hotel, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct BookingService {
    hotels: Arc<dyn HotelStore>,
}

impl BookingService {
    pub fn new(hotels: Arc<dyn HotelStore>) -> Self {
        Self { hotels }
    }

    /// Hotels the user has booked, each listing only that user's bookings.
    pub async fn my_bookings(&self, user_id: Uuid) -> Result<Vec<Hotel>> {
        self.hotels.bookings_for_user(user_id).await
    }
}
