#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use parking_domain::lot::LotDetails;

use crate::domain::types::{
    Customer, Lot, LotSummary, NewUser, Reservation, ReservationDetail, Spot, SpotWithHolder,
    User,
};
use crate::error::ParkingServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ParkingServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ParkingServiceError>;

    /// Fails with `EmailAlreadyRegistered` on a duplicate email.
    async fn create(&self, user: &NewUser) -> Result<User, ParkingServiceError>;

    /// Non-admin users ordered by id.
    async fn list_customers(&self) -> Result<Vec<Customer>, ParkingServiceError>;
}

/// Repository for parking lots. Spot rows are created and removed together with their lot.
pub trait LotRepository: Send + Sync {
    /// All lots ordered by id, with live spot counts.
    async fn list_summaries(&self) -> Result<Vec<LotSummary>, ParkingServiceError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Lot>, ParkingServiceError>;

    /// Insert the lot and `max_spots` Available spots in one transaction.
    async fn create(&self, details: &LotDetails) -> Result<Lot, ParkingServiceError>;

    /// Update details and resize the spot set to `details.max_spots` in one transaction.
    ///
    /// Returns `false` (and changes nothing) when a shrink cannot find enough
    /// Available spots without reservation history.
    async fn update(&self, id: i32, details: &LotDetails) -> Result<bool, ParkingServiceError>;

    /// Delete the lot, its spots and their reservations.
    ///
    /// Returns `false` (and changes nothing) while any spot is Occupied.
    async fn delete(&self, id: i32) -> Result<bool, ParkingServiceError>;
}

/// Repository for parking spots.
pub trait SpotRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Spot>, ParkingServiceError>;

    /// Spots of a lot ordered by id, each with its current holder if any.
    async fn list_by_lot(&self, lot_id: i32) -> Result<Vec<SpotWithHolder>, ParkingServiceError>;
}

/// Repository for reservations and the spot transitions they drive.
///
/// Every transition is a compare-and-set on the spot status inside one transaction;
/// a spot found in an unexpected state aborts the transaction.
pub trait ReservationRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<ReservationDetail>, ParkingServiceError>;

    async fn find_open_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError>;

    async fn find_open_by_spot(
        &self,
        spot_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError>;

    /// The user's reservations, newest first.
    async fn list_by_user(&self, user_id: i32)
    -> Result<Vec<ReservationDetail>, ParkingServiceError>;

    /// Reserve the first Available spot of the lot (lowest id) and open a reservation.
    ///
    /// Returns `None` when the lot has no Available spot. Fails with
    /// `ActiveReservationExists` when the user already holds an open reservation.
    async fn reserve(
        &self,
        user_id: i32,
        lot_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Reservation>, ParkingServiceError>;

    /// Reserved -> Occupied, restarting the parking clock at `now`.
    ///
    /// Returns `false` when the spot or reservation changed state concurrently.
    async fn occupy(&self, reservation_id: i32, now: DateTime<Utc>)
    -> Result<bool, ParkingServiceError>;

    /// Occupied -> Available, closing the reservation with `leaving_timestamp` and `cost`.
    ///
    /// Returns `false` when the spot or reservation changed state concurrently.
    async fn release(
        &self,
        reservation_id: i32,
        leaving_timestamp: DateTime<Utc>,
        cost: f64,
    ) -> Result<bool, ParkingServiceError>;
}
