//! Shared application state handed to every handler.

use crate::{
    auth::AuthManager,
    config::Config,
    db::{HotelStore, MemoryStore, PostgresStore, UserStore},
    services::{BookingService, HotelService, SearchService, UserService},
    Result,
};
use std::sync::Arc;

/// Which backing store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy)]
pub struct AppStateOptions {
    pub store: StoreKind,
    /// Overrides `database.run_migrations` when set.
    pub run_migrations: Option<bool>,
}

impl Default for AppStateOptions {
    fn default() -> Self {
        Self {
            store: StoreKind::Postgres,
            run_migrations: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthManager>,
    pub hotels: Arc<dyn HotelStore>,
    pub users: Arc<dyn UserStore>,
    pub search_service: Arc<SearchService>,
    pub user_service: Arc<UserService>,
    pub hotel_service: Arc<HotelService>,
    pub booking_service: Arc<BookingService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        Self::new_with_options(config, AppStateOptions::default()).await
    }

    pub async fn new_with_options(config: Config, options: AppStateOptions) -> Result<Self> {
        match options.store {
            StoreKind::Memory => {
                tracing::warn!("Using in-memory store; data is lost on shutdown");
                let store = Arc::new(MemoryStore::new());
                Ok(Self::with_stores(config, store.clone(), store))
            }
            StoreKind::Postgres => {
                let store = PostgresStore::connect(&config.database).await?;
                if options
                    .run_migrations
                    .unwrap_or(config.database.run_migrations)
                {
                    store.migrate().await?;
                    tracing::info!("Database migrations applied");
                }
                let store = Arc::new(store);
                Ok(Self::with_stores(config, store.clone(), store))
            }
        }
    }

    /// Wires services over already-constructed stores.
    pub fn with_stores(
        config: Config,
        hotels: Arc<dyn HotelStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let auth = Arc::new(AuthManager::new(&config.auth));

        Self {
            search_service: Arc::new(SearchService::new(hotels.clone())),
            user_service: Arc::new(UserService::new(users.clone(), auth.clone())),
            hotel_service: Arc::new(HotelService::new(hotels.clone())),
            booking_service: Arc::new(BookingService::new(hotels.clone())),
            config: Arc::new(config),
            auth,
            hotels,
            users,
        }
    }
}
