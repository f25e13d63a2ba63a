//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction
//! - Service invocation
//! - Response formatting

pub mod hotels;
pub mod my_bookings;
pub mod my_hotels;
pub mod session;
pub mod users;

pub use hotels::*;
pub use my_bookings::*;
pub use my_hotels::*;
pub use session::*;
pub use users::*;
