use chrono::Utc;

use parking_domain::lot::LotDetailsInput;
use parking_domain::spot::SpotStatus;
use parking_domain::user::UserRole;
use parking_service::error::ParkingServiceError;
use parking_service::usecase::lot::{
    CreateLotUseCase, DeleteLotUseCase, ListLotsUseCase, UpdateLotUseCase,
};
use parking_service::usecase::reservation::{OccupySpotUseCase, ReserveSpotUseCase};
use parking_service::usecase::spot::ListLotSpotsUseCase;

use crate::helpers::MemoryRepo;

fn input<'a>(name: &'a str, price: &'a str, max_spots: &'a str) -> LotDetailsInput<'a> {
    LotDetailsInput {
        prime_location_name: name,
        address: "12 Market Road",
        pin_code: "560001",
        price_per_hour: price,
        max_spots,
    }
}

// ── CreateLotUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_lot_with_available_spots() {
    let repo = MemoryRepo::new();
    let lot = CreateLotUseCase { lots: repo.clone() }
        .execute(input("Central Plaza", "40", "3"))
        .await
        .unwrap();

    assert_eq!(lot.details.prime_location_name, "Central Plaza");
    let spots = repo.spots_of(lot.id);
    assert_eq!(spots.len(), 3);
    assert!(spots.iter().all(|s| s.status == SpotStatus::Available));
}

#[tokio::test]
async fn should_reject_invalid_lot_form() {
    let repo = MemoryRepo::new();
    let result = CreateLotUseCase { lots: repo.clone() }
        .execute(input("Central Plaza", "-1", "3"))
        .await;

    assert!(
        matches!(result, Err(ParkingServiceError::InvalidInput(_))),
        "expected InvalidInput, got {result:?}"
    );
    assert!(repo.store.lock().unwrap().lots.is_empty());
}

#[tokio::test]
async fn should_summarize_spot_counts() {
    let repo = MemoryRepo::new();
    let user = repo.seed_user("asha@example.com", UserRole::User);
    let lot = repo.seed_lot("Central Plaza", 40.0, 3);
    ReserveSpotUseCase { reservations: repo.clone() }
        .execute(user.id, lot.id, Utc::now())
        .await
        .unwrap();

    let summaries = ListLotsUseCase { lots: repo.clone() }.execute().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_spots, 3);
    assert_eq!(summaries[0].available_spots, 2);
    assert_eq!(summaries[0].occupied_spots, 0);
}

// ── UpdateLotUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_grow_lot() {
    let repo = MemoryRepo::new();
    let lot = repo.seed_lot("Central Plaza", 40.0, 2);

    UpdateLotUseCase { lots: repo.clone() }
        .execute(lot.id, input("Central Plaza East", "50", "5"))
        .await
        .unwrap();

    assert_eq!(repo.spots_of(lot.id).len(), 5);
    let stored = repo.store.lock().unwrap().lots[0].clone();
    assert_eq!(stored.details.prime_location_name, "Central Plaza East");
    assert_eq!(stored.details.price_per_hour, 50.0);
}

#[tokio::test]
async fn should_shrink_lot_by_removing_highest_free_spots() {
    let repo = MemoryRepo::new();
    let lot = repo.seed_lot("Central Plaza", 40.0, 4);
    let before: Vec<i32> = repo.spots_of(lot.id).iter().map(|s| s.id).collect();

    UpdateLotUseCase { lots: repo.clone() }
        .execute(lot.id, input("Central Plaza", "40", "2"))
        .await
        .unwrap();

    let after: Vec<i32> = repo.spots_of(lot.id).iter().map(|s| s.id).collect();
    assert_eq!(after, before[..2].to_vec());
}

#[tokio::test]
async fn should_refuse_shrink_below_held_spots() {
    let repo = MemoryRepo::new();
    let lot = repo.seed_lot("Central Plaza", 40.0, 2);
    let spots = repo.spots_of(lot.id);
    repo.set_spot_status(spots[0].id, SpotStatus::Reserved);
    repo.set_spot_status(spots[1].id, SpotStatus::Occupied);

    let result = UpdateLotUseCase { lots: repo.clone() }
        .execute(lot.id, input("Renamed", "40", "1"))
        .await;

    assert!(
        matches!(result, Err(ParkingServiceError::CannotShrinkLot)),
        "expected CannotShrinkLot, got {result:?}"
    );
    assert_eq!(repo.spots_of(lot.id).len(), 2);
    assert_eq!(
        repo.store.lock().unwrap().lots[0].details.prime_location_name,
        "Central Plaza"
    );
}

#[tokio::test]
async fn should_keep_spots_with_reservation_history_on_shrink() {
    let repo = MemoryRepo::new();
    let user = repo.seed_user("asha@example.com", UserRole::User);
    let lot = repo.seed_lot("Central Plaza", 40.0, 1);
    let reservation = ReserveSpotUseCase { reservations: repo.clone() }
        .execute(user.id, lot.id, Utc::now())
        .await
        .unwrap();
    // Spot freed again but still referenced by a reservation row.
    repo.set_spot_status(reservation.spot_id, SpotStatus::Available);

    let result = UpdateLotUseCase { lots: repo.clone() }
        .execute(lot.id, input("Central Plaza", "40", "0"))
        .await;

    assert!(matches!(result, Err(ParkingServiceError::CannotShrinkLot)));
    assert_eq!(repo.spots_of(lot.id).len(), 1);
}

#[tokio::test]
async fn should_fail_update_of_unknown_lot() {
    let repo = MemoryRepo::new();
    let result = UpdateLotUseCase { lots: repo }
        .execute(42, input("Nowhere", "10", "1"))
        .await;
    assert!(matches!(result, Err(ParkingServiceError::LotNotFound)));
}

// ── DeleteLotUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_lot_with_its_spots_and_reservations() {
    let repo = MemoryRepo::new();
    let user = repo.seed_user("asha@example.com", UserRole::User);
    let lot = repo.seed_lot("Central Plaza", 40.0, 2);
    ReserveSpotUseCase { reservations: repo.clone() }
        .execute(user.id, lot.id, Utc::now())
        .await
        .unwrap();

    DeleteLotUseCase { lots: repo.clone() }
        .execute(lot.id)
        .await
        .unwrap();

    let store = repo.store.lock().unwrap();
    assert!(store.lots.is_empty());
    assert!(store.spots.is_empty());
    assert!(store.reservations.is_empty());
}

#[tokio::test]
async fn should_refuse_to_delete_lot_with_occupied_spot() {
    let repo = MemoryRepo::new();
    let user = repo.seed_user("asha@example.com", UserRole::User);
    let lot = repo.seed_lot("Central Plaza", 40.0, 2);
    let reservation = ReserveSpotUseCase { reservations: repo.clone() }
        .execute(user.id, lot.id, Utc::now())
        .await
        .unwrap();
    OccupySpotUseCase { reservations: repo.clone() }
        .execute(user.id, reservation.id, Utc::now())
        .await
        .unwrap();

    let result = DeleteLotUseCase { lots: repo.clone() }.execute(lot.id).await;

    assert!(
        matches!(result, Err(ParkingServiceError::LotHasOccupiedSpots)),
        "expected LotHasOccupiedSpots, got {result:?}"
    );
    assert_eq!(repo.spots_of(lot.id).len(), 2);
    assert_eq!(repo.reservations().len(), 1);
}

#[tokio::test]
async fn should_fail_delete_of_unknown_lot() {
    let result = DeleteLotUseCase { lots: MemoryRepo::new() }.execute(7).await;
    assert!(matches!(result, Err(ParkingServiceError::LotNotFound)));
}

// ── ListLotSpotsUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_spots_with_current_holder() {
    let repo = MemoryRepo::new();
    let user = repo.seed_user("asha@example.com", UserRole::User);
    let lot = repo.seed_lot("Central Plaza", 40.0, 2);
    let reservation = ReserveSpotUseCase { reservations: repo.clone() }
        .execute(user.id, lot.id, Utc::now())
        .await
        .unwrap();

    let view = ListLotSpotsUseCase {
        lots: repo.clone(),
        spots: repo.clone(),
    }
    .execute(lot.id)
    .await
    .unwrap();

    assert_eq!(view.spots.len(), 2);
    assert_eq!(view.count(SpotStatus::Reserved), 1);
    let holder = view.spots[0].holder.as_ref().unwrap();
    assert_eq!(holder.reservation_id, reservation.id);
    assert_eq!(holder.email, "asha@example.com");
    assert!(view.spots[1].holder.is_none());
}
