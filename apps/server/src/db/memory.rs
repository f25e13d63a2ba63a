//! In-memory store.
//!
//! Backs the integration tests and `--memory` development runs. Records live
//! in insertion order, which is the natural result order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use staybook_search::{HotelPredicate, PageWindow, SortKey};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{checked_skip, HotelStore, UserStore};
use crate::{
    models::{Hotel, HotelDraft, NewUser, User},
    Error, Result,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    hotels: RwLock<Vec<Hotel>>,
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn search(
        &self,
        predicate: &HotelPredicate,
        sort: Option<SortKey>,
        window: PageWindow,
    ) -> Result<Vec<Hotel>> {
        let skip = usize::try_from(checked_skip(window)?)
            .map_err(|e| Error::Store(format!("offset out of range: {e}")))?;
        let limit = usize::try_from(window.limit())
            .map_err(|e| Error::Store(format!("limit out of range: {e}")))?;

        let hotels = self.hotels.read().await;
        let mut matched: Vec<&Hotel> = hotels.iter().filter(|h| predicate.matches(*h)).collect();
        if let Some(key) = sort {
            // Stable: ties keep insertion order.
            matched.sort_by(|a, b| key.compare(*a, *b));
        }

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(self.hotels.read().await.len() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels.iter().find(|h| h.id == id).cloned())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels
            .iter()
            .find(|h| h.id == id && h.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, hotel: Hotel) -> Result<Hotel> {
        let mut hotels = self.hotels.write().await;
        if hotels.iter().any(|h| h.id == hotel.id) {
            return Err(Error::Store(format!("duplicate hotel id {}", hotel.id)));
        }
        hotels.push(hotel.clone());
        Ok(hotel)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        draft: HotelDraft,
        last_updated: DateTime<Utc>,
    ) -> Result<Option<Hotel>> {
        let mut hotels = self.hotels.write().await;
        let Some(hotel) = hotels
            .iter_mut()
            .find(|h| h.id == id && h.user_id == user_id)
        else {
            return Ok(None);
        };
        hotel.apply(draft, last_updated);
        Ok(Some(hotel.clone()))
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Hotel>> {
        let hotels = self.hotels.read().await;
        Ok(hotels
            .iter()
            .filter(|h| h.bookings.iter().any(|b| b.user_id == user_id))
            .cloned()
            .map(|h| h.with_bookings_of(user_id))
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::UserExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
        };
        users.push(user.clone());
        Ok(user)
    }
}
