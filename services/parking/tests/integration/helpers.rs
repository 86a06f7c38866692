use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use parking_domain::lot::{CapacityChange, LotDetails};
use parking_domain::spot::SpotStatus;
use parking_domain::user::UserRole;
use parking_migration::Migrator;
use parking_service::domain::repository::{
    LotRepository, ReservationRepository, SpotRepository, UserRepository,
};
use parking_service::domain::types::{
    Customer, Lot, LotSummary, NewUser, Reservation, ReservationDetail, Spot, SpotHolder,
    SpotWithHolder, User,
};
use parking_service::error::ParkingServiceError;

/// Migrated in-memory SQLite. One pooled connection keeps the database alive.
pub async fn sqlite_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Store {
    pub users: Vec<User>,
    pub lots: Vec<Lot>,
    pub spots: Vec<Spot>,
    pub reservations: Vec<Reservation>,
    last_id: i32,
}

impl Store {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn add_spots(&mut self, lot_id: i32, count: u32) {
        for _ in 0..count {
            let id = self.next_id();
            self.spots.push(Spot {
                id,
                lot_id,
                status: SpotStatus::Available,
            });
        }
    }

    fn spot_mut(&mut self, id: i32) -> Option<&mut Spot> {
        self.spots.iter_mut().find(|s| s.id == id)
    }

    fn open_reservation(&self, reservation_id: i32) -> Option<Reservation> {
        self.reservations
            .iter()
            .find(|r| r.id == reservation_id && r.is_open())
            .cloned()
    }

    fn detail(&self, reservation: &Reservation) -> Option<ReservationDetail> {
        let spot = self.spots.iter().find(|s| s.id == reservation.spot_id)?;
        let lot = self.lots.iter().find(|l| l.id == spot.lot_id)?;
        Some(ReservationDetail {
            reservation: reservation.clone(),
            spot_status: spot.status,
            lot_id: lot.id,
            lot_name: lot.details.prime_location_name.clone(),
            price_per_hour: lot.details.price_per_hour,
        })
    }
}

/// In-memory implementation of every repository, sharing one store.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    pub store: Arc<Mutex<Store>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, email: &str, role: UserRole) -> User {
        let mut store = self.store.lock().unwrap();
        let user = User {
            id: store.next_id(),
            email: email.to_owned(),
            full_name: email.split('@').next().unwrap_or_default().to_owned(),
            password_hash: "$argon2id$unused".to_owned(),
            role,
        };
        store.users.push(user.clone());
        user
    }

    pub fn seed_lot(&self, name: &str, price_per_hour: f64, max_spots: u32) -> Lot {
        let mut store = self.store.lock().unwrap();
        let lot = Lot {
            id: store.next_id(),
            details: lot_details(name, price_per_hour, max_spots),
        };
        store.lots.push(lot.clone());
        store.add_spots(lot.id, max_spots);
        lot
    }

    pub fn spots_of(&self, lot_id: i32) -> Vec<Spot> {
        let store = self.store.lock().unwrap();
        store.spots.iter().filter(|s| s.lot_id == lot_id).copied().collect()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.store.lock().unwrap().reservations.clone()
    }

    pub fn set_spot_status(&self, spot_id: i32, status: SpotStatus) {
        let mut store = self.store.lock().unwrap();
        if let Some(spot) = store.spot_mut(spot_id) {
            spot.status = status;
        }
    }
}

pub fn lot_details(name: &str, price_per_hour: f64, max_spots: u32) -> LotDetails {
    LotDetails {
        prime_location_name: name.to_owned(),
        address: "12 Market Road".to_owned(),
        pin_code: "560001".to_owned(),
        price_per_hour,
        max_spots,
    }
}

// ── UserRepository ───────────────────────────────────────────────────────────

impl UserRepository for MemoryRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(ParkingServiceError::EmailAlreadyRegistered);
        }
        let created = User {
            id: store.next_id(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
        };
        store.users.push(created.clone());
        Ok(created)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .filter(|u| !u.role.is_admin())
            .map(|u| {
                let latest_spot_status = store
                    .reservations
                    .iter()
                    .filter(|r| r.user_id == u.id)
                    .max_by_key(|r| r.id)
                    .and_then(|r| store.spots.iter().find(|s| s.id == r.spot_id))
                    .map(|s| s.status);
                Customer {
                    id: u.id,
                    email: u.email.clone(),
                    full_name: u.full_name.clone(),
                    latest_spot_status,
                }
            })
            .collect())
    }
}

// ── LotRepository ────────────────────────────────────────────────────────────

impl LotRepository for MemoryRepo {
    async fn list_summaries(&self) -> Result<Vec<LotSummary>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        let mut lots = store.lots.clone();
        lots.sort_by_key(|l| l.id);
        Ok(lots
            .into_iter()
            .map(|lot| {
                let spots: Vec<&Spot> = store.spots.iter().filter(|s| s.lot_id == lot.id).collect();
                let count = |status: SpotStatus| {
                    spots.iter().filter(|s| s.status == status).count() as u32
                };
                LotSummary {
                    total_spots: spots.len() as u32,
                    available_spots: count(SpotStatus::Available),
                    occupied_spots: count(SpotStatus::Occupied),
                    lot,
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Lot>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.lots.iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, details: &LotDetails) -> Result<Lot, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        let lot = Lot {
            id: store.next_id(),
            details: details.clone(),
        };
        store.lots.push(lot.clone());
        store.add_spots(lot.id, details.max_spots);
        Ok(lot)
    }

    async fn update(&self, id: i32, details: &LotDetails) -> Result<bool, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        let current = store.spots.iter().filter(|s| s.lot_id == id).count() as u32;
        match CapacityChange::between(current, details.max_spots) {
            CapacityChange::Unchanged => {}
            CapacityChange::Grow(n) => store.add_spots(id, n),
            CapacityChange::Shrink(n) => {
                let mut removable: Vec<i32> = store
                    .spots
                    .iter()
                    .filter(|s| s.lot_id == id && s.status == SpotStatus::Available)
                    .filter(|s| !store.reservations.iter().any(|r| r.spot_id == s.id))
                    .map(|s| s.id)
                    .collect();
                if removable.len() < n as usize {
                    return Ok(false);
                }
                removable.sort_unstable_by(|a, b| b.cmp(a));
                removable.truncate(n as usize);
                store.spots.retain(|s| !removable.contains(&s.id));
            }
        }
        if let Some(lot) = store.lots.iter_mut().find(|l| l.id == id) {
            lot.details = details.clone();
        }
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        let spot_ids: Vec<i32> = store
            .spots
            .iter()
            .filter(|s| s.lot_id == id)
            .map(|s| s.id)
            .collect();
        if store
            .spots
            .iter()
            .any(|s| s.lot_id == id && s.status == SpotStatus::Occupied)
        {
            return Ok(false);
        }
        store.reservations.retain(|r| !spot_ids.contains(&r.spot_id));
        store.spots.retain(|s| s.lot_id != id);
        store.lots.retain(|l| l.id != id);
        Ok(true)
    }
}

// ── SpotRepository ───────────────────────────────────────────────────────────

impl SpotRepository for MemoryRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Spot>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store.spots.iter().find(|s| s.id == id).copied())
    }

    async fn list_by_lot(&self, lot_id: i32) -> Result<Vec<SpotWithHolder>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        let mut spots: Vec<Spot> = store.spots.iter().filter(|s| s.lot_id == lot_id).copied().collect();
        spots.sort_by_key(|s| s.id);
        Ok(spots
            .into_iter()
            .map(|spot| {
                let holder = store
                    .reservations
                    .iter()
                    .find(|r| r.spot_id == spot.id && r.is_open())
                    .and_then(|r| {
                        let user = store.users.iter().find(|u| u.id == r.user_id)?;
                        Some(SpotHolder {
                            reservation_id: r.id,
                            user_id: user.id,
                            email: user.email.clone(),
                            full_name: user.full_name.clone(),
                            parking_timestamp: r.parking_timestamp,
                        })
                    });
                SpotWithHolder { spot, holder }
            })
            .collect())
    }
}

// ── ReservationRepository ────────────────────────────────────────────────────

impl ReservationRepository for MemoryRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .reservations
            .iter()
            .find(|r| r.id == id)
            .and_then(|r| store.detail(r)))
    }

    async fn find_open_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .reservations
            .iter()
            .find(|r| r.user_id == user_id && r.is_open())
            .and_then(|r| store.detail(r)))
    }

    async fn find_open_by_spot(
        &self,
        spot_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .reservations
            .iter()
            .find(|r| r.spot_id == spot_id && r.is_open())
            .and_then(|r| store.detail(r)))
    }

    async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReservationDetail>, ParkingServiceError> {
        let store = self.store.lock().unwrap();
        let mut rows: Vec<ReservationDetail> = store
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| store.detail(r))
            .collect();
        rows.sort_by(|a, b| b.reservation.id.cmp(&a.reservation.id));
        Ok(rows)
    }

    async fn reserve(
        &self,
        user_id: i32,
        lot_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Reservation>, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        if store.reservations.iter().any(|r| r.user_id == user_id && r.is_open()) {
            return Err(ParkingServiceError::ActiveReservationExists);
        }
        let Some(spot_id) = store
            .spots
            .iter()
            .filter(|s| s.lot_id == lot_id && s.status == SpotStatus::Available)
            .map(|s| s.id)
            .min()
        else {
            return Ok(None);
        };
        if let Some(spot) = store.spot_mut(spot_id) {
            spot.status = SpotStatus::Reserved;
        }
        let reservation = Reservation {
            id: store.next_id(),
            user_id,
            spot_id,
            parking_timestamp: now,
            leaving_timestamp: None,
            cost: None,
        };
        store.reservations.push(reservation.clone());
        Ok(Some(reservation))
    }

    async fn occupy(
        &self,
        reservation_id: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        let Some(reservation) = store.open_reservation(reservation_id) else {
            return Ok(false);
        };
        match store.spot_mut(reservation.spot_id) {
            Some(spot) if spot.status == SpotStatus::Reserved => spot.status = SpotStatus::Occupied,
            _ => return Ok(false),
        }
        if let Some(r) = store.reservations.iter_mut().find(|r| r.id == reservation_id) {
            r.parking_timestamp = now;
        }
        Ok(true)
    }

    async fn release(
        &self,
        reservation_id: i32,
        leaving_timestamp: DateTime<Utc>,
        cost: f64,
    ) -> Result<bool, ParkingServiceError> {
        let mut store = self.store.lock().unwrap();
        let Some(reservation) = store.open_reservation(reservation_id) else {
            return Ok(false);
        };
        match store.spot_mut(reservation.spot_id) {
            Some(spot) if spot.status == SpotStatus::Occupied => {
                spot.status = SpotStatus::Available;
            }
            _ => return Ok(false),
        }
        if let Some(r) = store.reservations.iter_mut().find(|r| r.id == reservation_id) {
            r.leaving_timestamp = Some(leaving_timestamp);
            r.cost = Some(cost);
        }
        Ok(true)
    }
}
