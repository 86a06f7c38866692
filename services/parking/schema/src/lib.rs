//! sea-orm entities for the parking service.

pub mod parking_lots;
pub mod parking_spots;
pub mod reservations;
pub mod users;
