pub mod auth;
pub mod booking;
pub mod scan;

pub use auth::{Credentials, Session, TokenPair};
pub use booking::{Booking, EventBooking, RestaurantBooking};
pub use scan::{QrCode, ScanData, ScanMeta, ScanOutcome};
