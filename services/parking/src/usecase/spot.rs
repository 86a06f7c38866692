use chrono::{DateTime, Utc};

use parking_domain::billing::parking_cost;
use parking_domain::spot::SpotStatus;

use crate::domain::repository::{LotRepository, ReservationRepository, SpotRepository};
use crate::domain::types::{Lot, Spot, SpotWithHolder};
use crate::error::ParkingServiceError;

// ── ListLotSpots ─────────────────────────────────────────────────────────────

pub struct LotSpots {
    pub lot: Lot,
    pub spots: Vec<SpotWithHolder>,
}

impl LotSpots {
    pub fn count(&self, status: SpotStatus) -> usize {
        self.spots.iter().filter(|s| s.spot.status == status).count()
    }
}

pub struct ListLotSpotsUseCase<L: LotRepository, S: SpotRepository> {
    pub lots: L,
    pub spots: S,
}

impl<L: LotRepository, S: SpotRepository> ListLotSpotsUseCase<L, S> {
    pub async fn execute(&self, lot_id: i32) -> Result<LotSpots, ParkingServiceError> {
        let lot = self
            .lots
            .find_by_id(lot_id)
            .await?
            .ok_or(ParkingServiceError::LotNotFound)?;
        let spots = self.spots.list_by_lot(lot_id).await?;
        Ok(LotSpots { lot, spots })
    }
}

// ── GetSpot ──────────────────────────────────────────────────────────────────

pub struct GetSpotUseCase<S: SpotRepository> {
    pub spots: S,
}

impl<S: SpotRepository> GetSpotUseCase<S> {
    pub async fn execute(&self, spot_id: i32) -> Result<Spot, ParkingServiceError> {
        self.spots
            .find_by_id(spot_id)
            .await?
            .ok_or(ParkingServiceError::SpotNotFound)
    }
}

// ── AdminReleaseSpot ─────────────────────────────────────────────────────────

/// Force an Occupied spot back to Available, billing its open reservation.
pub struct AdminReleaseSpotUseCase<R: ReservationRepository> {
    pub reservations: R,
}

impl<R: ReservationRepository> AdminReleaseSpotUseCase<R> {
    /// Returns the billed cost.
    pub async fn execute(&self, spot: Spot, now: DateTime<Utc>) -> Result<f64, ParkingServiceError> {
        spot.status
            .release()
            .map_err(|_| ParkingServiceError::SpotNotReleasable)?;
        let open = self
            .reservations
            .find_open_by_spot(spot.id)
            .await?
            .ok_or(ParkingServiceError::SpotNotReleasable)?;

        let reservation_id = open.reservation.id;
        let cost = parking_cost(open.reservation.parking_timestamp, now, open.price_per_hour);
        if !self.reservations.release(reservation_id, now, cost).await? {
            return Err(ParkingServiceError::Conflict);
        }
        tracing::info!(
            spot_id = spot.id,
            reservation_id,
            user_id = open.reservation.user_id,
            cost,
            "spot released by admin"
        );
        Ok(cost)
    }
}
