//! Hotel listings: public detail and owner-side management.

use crate::{
    db::HotelStore,
    models::{Hotel, HotelDraft},
    Error, Result,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct HotelService {
    hotels: Arc<dyn HotelStore>,
}

impl HotelService {
    pub fn new(hotels: Arc<dyn HotelStore>) -> Self {
        Self { hotels }
    }

    /// Public view of one hotel, without guest bookings.
    pub async fn public_detail(&self, id: &str) -> Result<Hotel> {
        let id = parse_hotel_id(id)?;
        self.hotels
            .find_by_id(id)
            .await?
            .map(Hotel::without_bookings)
            .ok_or_else(hotel_not_found)
    }

    pub async fn create(&self, owner: Uuid, draft: HotelDraft) -> Result<Hotel> {
        draft.validate()?;
        let hotel = Hotel::from_draft(owner, draft, Utc::now());
        let hotel = self.hotels.insert(hotel).await?;
        tracing::info!(hotel_id = %hotel.id, owner = %owner, "Hotel created");
        Ok(hotel)
    }

    pub async fn list_owned(&self, owner: Uuid) -> Result<Vec<Hotel>> {
        self.hotels.list_by_owner(owner).await
    }

    pub async fn get_owned(&self, owner: Uuid, id: &str) -> Result<Hotel> {
        let id = parse_hotel_id(id)?;
        self.hotels
            .find_owned(id, owner)
            .await?
            .ok_or_else(hotel_not_found)
    }

    pub async fn update_owned(&self, owner: Uuid, id: &str, draft: HotelDraft) -> Result<Hotel> {
        let id = parse_hotel_id(id)?;
        draft.validate()?;
        let hotel = self
            .hotels
            .update_owned(id, owner, draft, Utc::now())
            .await?
            .ok_or_else(hotel_not_found)?;
        tracing::info!(hotel_id = %hotel.id, owner = %owner, "Hotel updated");
        Ok(hotel)
    }
}

/// Ids that are not UUIDs cannot name a stored hotel.
fn parse_hotel_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| hotel_not_found())
}

fn hotel_not_found() -> Error {
    Error::NotFound("Hotel not found".to_string())
}
