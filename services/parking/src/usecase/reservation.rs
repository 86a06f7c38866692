use chrono::{DateTime, Utc};

use parking_domain::billing::parking_cost;

use crate::domain::repository::{LotRepository, ReservationRepository};
use crate::domain::types::{LotSummary, Reservation, ReservationDetail};
use crate::error::ParkingServiceError;

/// Load a reservation that `user_id` owns.
async fn owned<R: ReservationRepository>(
    reservations: &R,
    user_id: i32,
    reservation_id: i32,
) -> Result<ReservationDetail, ParkingServiceError> {
    let detail = reservations
        .find_by_id(reservation_id)
        .await?
        .ok_or(ParkingServiceError::ReservationNotFound)?;
    if detail.reservation.user_id != user_id {
        return Err(ParkingServiceError::NotReservationOwner);
    }
    Ok(detail)
}

// ── UserDashboard ────────────────────────────────────────────────────────────

pub struct UserDashboard {
    pub active: Option<ReservationDetail>,
    pub lots: Vec<LotSummary>,
}

pub struct UserDashboardUseCase<L: LotRepository, R: ReservationRepository> {
    pub lots: L,
    pub reservations: R,
}

impl<L: LotRepository, R: ReservationRepository> UserDashboardUseCase<L, R> {
    pub async fn execute(&self, user_id: i32) -> Result<UserDashboard, ParkingServiceError> {
        let active = self.reservations.find_open_by_user(user_id).await?;
        let lots = self.lots.list_summaries().await?;
        Ok(UserDashboard { active, lots })
    }
}

// ── ReserveSpot ──────────────────────────────────────────────────────────────

pub struct ReserveSpotUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> ReserveSpotUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        lot_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Reservation, ParkingServiceError> {
        if self.reservations.find_open_by_user(user_id).await?.is_some() {
            return Err(ParkingServiceError::ActiveReservationExists);
        }
        let reservation = self
            .reservations
            .reserve(user_id, lot_id, now)
            .await?
            .ok_or(ParkingServiceError::NoSpotAvailable)?;
        tracing::info!(
            user_id,
            lot_id,
            spot_id = reservation.spot_id,
            reservation_id = reservation.id,
            "spot reserved"
        );
        Ok(reservation)
    }
}

// ── GetReservation ───────────────────────────────────────────────────────────

pub struct GetReservationUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> GetReservationUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        reservation_id: i32,
    ) -> Result<ReservationDetail, ParkingServiceError> {
        owned(&self.reservations, user_id, reservation_id).await
    }
}

// ── OccupySpot ───────────────────────────────────────────────────────────────

pub struct OccupySpotUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> OccupySpotUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        reservation_id: i32,
        now: DateTime<Utc>,
    ) -> Result<(), ParkingServiceError> {
        let detail = match owned(&self.reservations, user_id, reservation_id).await {
            Err(ParkingServiceError::NotReservationOwner) => {
                return Err(ParkingServiceError::CannotOccupy);
            }
            other => other?,
        };
        if !detail.reservation.is_open() || detail.spot_status.occupy().is_err() {
            return Err(ParkingServiceError::CannotOccupy);
        }
        if !self.reservations.occupy(reservation_id, now).await? {
            return Err(ParkingServiceError::Conflict);
        }
        tracing::info!(
            user_id,
            reservation_id,
            spot_id = detail.reservation.spot_id,
            "spot occupied"
        );
        Ok(())
    }
}

// ── ReleaseSpot ──────────────────────────────────────────────────────────────

pub struct ReleaseSpotUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> ReleaseSpotUseCase<R> {
    /// Returns the billed cost.
    pub async fn execute(
        &self,
        user_id: i32,
        reservation_id: i32,
        now: DateTime<Utc>,
    ) -> Result<f64, ParkingServiceError> {
        let detail = match owned(&self.reservations, user_id, reservation_id).await {
            Err(ParkingServiceError::NotReservationOwner) => {
                return Err(ParkingServiceError::CannotRelease);
            }
            other => other?,
        };
        if !detail.reservation.is_open() || detail.spot_status.release().is_err() {
            return Err(ParkingServiceError::CannotRelease);
        }

        let cost = parking_cost(detail.reservation.parking_timestamp, now, detail.price_per_hour);
        if !self.reservations.release(reservation_id, now, cost).await? {
            return Err(ParkingServiceError::Conflict);
        }
        tracing::info!(
            user_id,
            reservation_id,
            spot_id = detail.reservation.spot_id,
            cost,
            "spot released"
        );
        Ok(cost)
    }
}

// ── History ──────────────────────────────────────────────────────────────────

pub struct HistoryUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> HistoryUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<Vec<ReservationDetail>, ParkingServiceError> {
        self.reservations.list_by_user(user_id).await
    }
}
