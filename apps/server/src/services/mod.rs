//! Business logic layer
//!
//! Services sit between handlers and stores: they validate input, apply
//! ownership rules and shape what stores return for the API.

pub mod bookings;
pub mod hotels;
pub mod search;
pub mod users;

pub use bookings::BookingService;
pub use hotels::HotelService;
pub use search::SearchService;
pub use users::{Session, UserService};
