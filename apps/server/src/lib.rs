//! Staybook - hotel booking backend
//!
//! A REST server with:
//! - Cookie-based accounts (register, login, logout, token validation)
//! - Public hotel search with filters, sorting and fixed-size pages
//! - Owner-side hotel management
//! - A per-user bookings view

#![allow(
    clippy::too_many_arguments, // Row mapping takes many columns
)]

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
