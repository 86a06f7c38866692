use chrono::{DateTime, Utc};

use parking_domain::lot::LotDetails;
use parking_domain::spot::SpotStatus;
use parking_domain::user::UserRole;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// A non-admin user with the status of the spot from their most recent reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub latest_spot_status: Option<SpotStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub id: i32,
    pub details: LotDetails,
}

/// A lot with live spot counts, as shown on both dashboards.
#[derive(Debug, Clone, PartialEq)]
pub struct LotSummary {
    pub lot: Lot,
    pub total_spots: u32,
    pub available_spots: u32,
    pub occupied_spots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    pub id: i32,
    pub lot_id: i32,
    pub status: SpotStatus,
}

/// The user currently holding a spot through an open reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotHolder {
    pub reservation_id: i32,
    pub user_id: i32,
    pub email: String,
    pub full_name: String,
    pub parking_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotWithHolder {
    pub spot: Spot,
    pub holder: Option<SpotHolder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub spot_id: i32,
    pub parking_timestamp: DateTime<Utc>,
    pub leaving_timestamp: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
}

impl Reservation {
    pub fn is_open(&self) -> bool {
        self.leaving_timestamp.is_none()
    }
}

/// A reservation joined with its spot and lot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDetail {
    pub reservation: Reservation,
    pub spot_status: SpotStatus,
    pub lot_id: i32,
    pub lot_name: String,
    pub price_per_hour: f64,
}
