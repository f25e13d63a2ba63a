//! Core traits for storage backends

use crate::{
    models::{Hotel, HotelDraft, NewUser, User},
    Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use staybook_search::{HotelPredicate, PageWindow, SortKey};
use uuid::Uuid;

/// Storage operations over the hotel collection.
///
/// Hotels returned by every method carry their full `bookings` list; callers
/// decide what to expose. Natural order is insertion order.
#[async_trait]
pub trait HotelStore: Send + Sync {
    /// Hotels matching `predicate`, ordered by `sort` (natural order when
    /// `None` and for ties), restricted to `window`.
    ///
    /// # Errors
    /// * `Store` - the window starts before the first record (page < 1)
    async fn search(
        &self,
        predicate: &HotelPredicate,
        sort: Option<SortKey>,
        window: PageWindow,
    ) -> Result<Vec<Hotel>>;

    /// Number of hotels in the collection, ignoring any filter.
    async fn count_all(&self) -> Result<i64>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>>;

    /// All hotels owned by `user_id`, in natural order.
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Hotel>>;

    /// The hotel `id`, only if owned by `user_id`.
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Hotel>>;

    /// Store a new hotel together with any bookings it already carries.
    async fn insert(&self, hotel: Hotel) -> Result<Hotel>;

    /// Replace the editable fields of a hotel owned by `user_id`.
    ///
    /// Returns `Ok(None)` when no such hotel exists for that owner.
    async fn update_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        draft: HotelDraft,
        last_updated: DateTime<Utc>,
    ) -> Result<Option<Hotel>>;

    /// Hotels holding at least one booking by `user_id`, each with its
    /// bookings narrowed to that user.
    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Hotel>>;
}

/// Storage operations over user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// # Errors
    /// * `UserExists` - the email is already registered
    async fn insert(&self, user: NewUser) -> Result<User>;
}
