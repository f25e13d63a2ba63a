//! PostgreSQL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use staybook_search::{HotelPredicate, PageWindow, SortKey};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use super::query_builder::{BindValue, HotelSearchQuery, HOTEL_COLUMNS};
use super::{checked_skip, HotelStore, UserStore};
use crate::{
    config::DatabaseConfig,
    models::{Booking, Hotel, HotelDraft, NewUser, User},
    Error, Result,
};

const BOOKING_COLUMNS: &str = "b.id, b.hotel_id, b.user_id, b.first_name, b.last_name, b.email, \
     b.adult_count, b.child_count, b.check_in, b.check_out, b.total_cost";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct HotelRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    city: String,
    country: String,
    description: String,
    hotel_type: String,
    adult_count: i32,
    child_count: i32,
    facilities: Vec<String>,
    price_per_night: Decimal,
    star_rating: i32,
    image_urls: Vec<String>,
    last_updated: DateTime<Utc>,
}

impl HotelRow {
    fn into_hotel(self, bookings: Vec<Booking>) -> Hotel {
        Hotel {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            city: self.city,
            country: self.country,
            description: self.description,
            hotel_type: self.hotel_type,
            adult_count: self.adult_count,
            child_count: self.child_count,
            facilities: self.facilities,
            price_per_night: self.price_per_night,
            star_rating: self.star_rating,
            image_urls: self.image_urls,
            last_updated: self.last_updated,
            bookings,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    hotel_id: Uuid,
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    adult_count: i32,
    child_count: i32,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
    total_cost: Decimal,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            adult_count: row.adult_count,
            child_count: row.child_count,
            check_in: row.check_in,
            check_out: row.check_out,
            total_cost: row.total_cost,
        }
    }
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool sized and time-limited per `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = PgConnectOptions::from_str(&config.url)?.options([(
            "statement_timeout",
            format!("{}s", config.statement_timeout_seconds),
        )]);

        let pool = PgPoolOptions::new()
            .min_connections(config.pool_min_size)
            .max_connections(config.pool_max_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_hotels(&self, sql: &str, bind_values: Vec<BindValue>) -> Result<Vec<Hotel>> {
        let mut query = sqlx::query_as::<_, HotelRow>(sql);
        for value in bind_values {
            query = match value {
                BindValue::Text(v) => query.bind(v),
                BindValue::TextArray(vs) => query.bind(vs),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        self.attach_bookings(rows).await
    }

    /// Load the bookings of every row in one query, keeping row order.
    async fn attach_bookings(&self, rows: Vec<HotelRow>) -> Result<Vec<Hotel>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let booking_rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.hotel_id = ANY($1) ORDER BY b.seq"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_hotel: HashMap<Uuid, Vec<Booking>> = HashMap::new();
        for row in booking_rows {
            by_hotel.entry(row.hotel_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let bookings = by_hotel.remove(&row.id).unwrap_or_default();
                row.into_hotel(bookings)
            })
            .collect())
    }
}

#[async_trait]
impl HotelStore for PostgresStore {
    async fn search(
        &self,
        predicate: &HotelPredicate,
        sort: Option<SortKey>,
        window: PageWindow,
    ) -> Result<Vec<Hotel>> {
        let skip = checked_skip(window)?;
        let (sql, bind_values) = HotelSearchQuery::new(predicate, sort, window, skip).build_sql();
        tracing::debug!(sql = %sql, binds = bind_values.len(), "Executing hotel search");
        self.fetch_hotels(&sql, bind_values).await
    }

    async fn count_all(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hotel>> {
        let sql = format!("SELECT {HOTEL_COLUMNS} FROM hotels h WHERE h.id = $1::uuid");
        let hotels = self
            .fetch_hotels(&sql, vec![BindValue::Text(id.to_string())])
            .await?;
        Ok(hotels.into_iter().next())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Hotel>> {
        let sql =
            format!("SELECT {HOTEL_COLUMNS} FROM hotels h WHERE h.user_id = $1::uuid ORDER BY h.seq");
        self.fetch_hotels(&sql, vec![BindValue::Text(user_id.to_string())])
            .await
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Hotel>> {
        let sql = format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels h WHERE h.id = $1::uuid AND h.user_id = $2::uuid"
        );
        let hotels = self
            .fetch_hotels(
                &sql,
                vec![
                    BindValue::Text(id.to_string()),
                    BindValue::Text(user_id.to_string()),
                ],
            )
            .await?;
        Ok(hotels.into_iter().next())
    }

    async fn insert(&self, hotel: Hotel) -> Result<Hotel> {
        let mut tx = self.pool.begin().await?;

        // The stored row is returned since NUMERIC(12, 2) may differ from the input.
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "INSERT INTO hotels AS h (id, user_id, name, city, country, description, type, \
             adult_count, child_count, facilities, price_per_night, star_rating, image_urls, \
             last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {HOTEL_COLUMNS}"
        ))
        .bind(hotel.id)
        .bind(hotel.user_id)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.description)
        .bind(&hotel.hotel_type)
        .bind(hotel.adult_count)
        .bind(hotel.child_count)
        .bind(&hotel.facilities)
        .bind(hotel.price_per_night)
        .bind(hotel.star_rating)
        .bind(&hotel.image_urls)
        .bind(hotel.last_updated)
        .fetch_one(&mut *tx)
        .await?;

        for booking in &hotel.bookings {
            sqlx::query(
                "INSERT INTO bookings (id, hotel_id, user_id, first_name, last_name, email, \
                 adult_count, child_count, check_in, check_out, total_cost) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(booking.id)
            .bind(hotel.id)
            .bind(booking.user_id)
            .bind(&booking.first_name)
            .bind(&booking.last_name)
            .bind(&booking.email)
            .bind(booking.adult_count)
            .bind(booking.child_count)
            .bind(booking.check_in)
            .bind(booking.check_out)
            .bind(booking.total_cost)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        self.attach_bookings(vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Store(format!("Inserted hotel {} not returned", hotel.id)))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
        draft: HotelDraft,
        last_updated: DateTime<Utc>,
    ) -> Result<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "UPDATE hotels h SET name = $3, city = $4, country = $5, description = $6, \
             type = $7, adult_count = $8, child_count = $9, facilities = $10, \
             price_per_night = $11, star_rating = $12, image_urls = $13, last_updated = $14 \
             WHERE h.id = $1 AND h.user_id = $2 \
             RETURNING {HOTEL_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(draft.name)
        .bind(draft.city)
        .bind(draft.country)
        .bind(draft.description)
        .bind(draft.hotel_type)
        .bind(draft.adult_count)
        .bind(draft.child_count)
        .bind(draft.facilities)
        .bind(draft.price_per_night)
        .bind(draft.star_rating)
        .bind(draft.image_urls)
        .bind(last_updated)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_bookings(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Hotel>> {
        let sql = format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels h WHERE EXISTS \
             (SELECT 1 FROM bookings b WHERE b.hotel_id = h.id AND b.user_id = $1::uuid) \
             ORDER BY h.seq"
        );
        let hotels = self
            .fetch_hotels(&sql, vec![BindValue::Text(user_id.to_string())])
            .await?;
        Ok(hotels
            .into_iter()
            .map(|h| h.with_bookings_of(user_id))
            .collect())
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, first_name, last_name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, first_name, last_name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, email, password_hash, first_name, last_name",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(Error::UserExists),
            Err(e) => Err(e.into()),
        }
    }
}
