//! Domain models for the booking server

pub mod hotel;
pub mod user;

pub use hotel::{Booking, Hotel, HotelDraft};
pub use user::{LoginRequest, NewUser, RegisterRequest, User};
