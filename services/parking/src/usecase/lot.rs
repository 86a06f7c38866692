use parking_domain::lot::LotDetailsInput;

use crate::domain::repository::LotRepository;
use crate::domain::types::{Lot, LotSummary};
use crate::error::ParkingServiceError;

// ── ListLots ─────────────────────────────────────────────────────────────────

pub struct ListLotsUseCase<R: LotRepository> {
    pub lots: R,
}

impl<R: LotRepository> ListLotsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<LotSummary>, ParkingServiceError> {
        self.lots.list_summaries().await
    }
}

// ── GetLot ───────────────────────────────────────────────────────────────────

pub struct GetLotUseCase<R: LotRepository> {
    pub lots: R,
}

impl<R: LotRepository> GetLotUseCase<R> {
    pub async fn execute(&self, lot_id: i32) -> Result<Lot, ParkingServiceError> {
        self.lots
            .find_by_id(lot_id)
            .await?
            .ok_or(ParkingServiceError::LotNotFound)
    }
}

// ── CreateLot ────────────────────────────────────────────────────────────────

pub struct CreateLotUseCase<R: LotRepository> {
    pub lots: R,
}

impl<R: LotRepository> CreateLotUseCase<R> {
    pub async fn execute(&self, input: LotDetailsInput<'_>) -> Result<Lot, ParkingServiceError> {
        let details = input.parse()?;
        let lot = self.lots.create(&details).await?;
        tracing::info!(lot_id = lot.id, max_spots = details.max_spots, "parking lot created");
        Ok(lot)
    }
}

// ── UpdateLot ────────────────────────────────────────────────────────────────

pub struct UpdateLotUseCase<R: LotRepository> {
    pub lots: R,
}

impl<R: LotRepository> UpdateLotUseCase<R> {
    pub async fn execute(
        &self,
        lot_id: i32,
        input: LotDetailsInput<'_>,
    ) -> Result<(), ParkingServiceError> {
        let details = input.parse()?;
        if self.lots.find_by_id(lot_id).await?.is_none() {
            return Err(ParkingServiceError::LotNotFound);
        }
        if !self.lots.update(lot_id, &details).await? {
            return Err(ParkingServiceError::CannotShrinkLot);
        }
        tracing::info!(lot_id, max_spots = details.max_spots, "parking lot updated");
        Ok(())
    }
}

// ── DeleteLot ────────────────────────────────────────────────────────────────

pub struct DeleteLotUseCase<R: LotRepository> {
    pub lots: R,
}

impl<R: LotRepository> DeleteLotUseCase<R> {
    pub async fn execute(&self, lot_id: i32) -> Result<(), ParkingServiceError> {
        if self.lots.find_by_id(lot_id).await?.is_none() {
            return Err(ParkingServiceError::LotNotFound);
        }
        if !self.lots.delete(lot_id).await? {
            return Err(ParkingServiceError::LotHasOccupiedSpots);
        }
        tracing::info!(lot_id, "parking lot deleted");
        Ok(())
    }
}
