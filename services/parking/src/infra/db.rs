use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait,
    sea_query::{Expr, Query},
};

use parking_domain::lot::{CapacityChange, LotDetails};
use parking_domain::spot::{IllegalTransition, SpotAction, SpotStatus};
use parking_domain::user::UserRole;
use parking_schema::{parking_lots, parking_spots, reservations, users};

use crate::domain::repository::{
    LotRepository, ReservationRepository, SpotRepository, UserRepository,
};
use crate::domain::types::{
    Customer, Lot, LotSummary, NewUser, Reservation, ReservationDetail, Spot, SpotHolder,
    SpotWithHolder, User,
};
use crate::error::ParkingServiceError;

/// Rows per multi-row spot insert.
const SPOT_INSERT_BATCH: u32 = 200;

/// Error type of the write transactions below.
#[derive(Debug, thiserror::Error)]
enum TxnError {
    /// A compare-and-set or capacity check failed; the transaction is rolled back.
    #[error("rejected by current state")]
    Rejected,
    #[error(transparent)]
    Illegal(#[from] IllegalTransition),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// `Ok(None)` when the transaction was rolled back with [`TxnError::Rejected`].
fn settle<T>(
    result: Result<T, TransactionError<TxnError>>,
    context: &'static str,
) -> Result<Option<T>, ParkingServiceError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(TransactionError::Transaction(TxnError::Rejected)) => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context(context).into()),
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn parse_status(code: &str) -> anyhow::Result<SpotStatus> {
    SpotStatus::from_code(code).with_context(|| format!("unknown spot status code {code:?}"))
}

/// Move a spot from `from` along `action`, failing with `Rejected` if it is no longer in `from`.
async fn transition_spot<C: ConnectionTrait>(
    conn: &C,
    spot_id: i32,
    from: SpotStatus,
    action: SpotAction,
) -> Result<(), TxnError> {
    let to = from.apply(action)?;
    let result = parking_spots::Entity::update_many()
        .col_expr(parking_spots::Column::Status, Expr::value(to.as_code()))
        .filter(parking_spots::Column::Id.eq(spot_id))
        .filter(parking_spots::Column::Status.eq(from.as_code()))
        .exec(conn)
        .await?;
    if result.rows_affected != 1 {
        return Err(TxnError::Rejected);
    }
    Ok(())
}

async fn insert_spots<C: ConnectionTrait>(conn: &C, lot_id: i32, count: u32) -> Result<(), DbErr> {
    let mut remaining = count;
    while remaining > 0 {
        let batch = remaining.min(SPOT_INSERT_BATCH);
        let spots = (0..batch).map(|_| parking_spots::ActiveModel {
            lot_id: Set(lot_id),
            status: Set(SpotStatus::Available.as_code().to_owned()),
            ..Default::default()
        });
        parking_spots::Entity::insert_many(spots).exec(conn).await?;
        remaining -= batch;
    }
    Ok(())
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, ParkingServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ParkingServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &NewUser) -> Result<User, ParkingServiceError> {
        let result = users::ActiveModel {
            email: Set(user.email.clone()),
            full_name: Set(user.full_name.clone()),
            password: Set(user.password_hash.clone()),
            role: Set(i16::from(user.role.as_u8())),
            ..Default::default()
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(user_from_model(model)),
            Err(e) if is_unique_violation(&e) => Err(ParkingServiceError::EmailAlreadyRegistered),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, ParkingServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.ne(i16::from(UserRole::Admin.as_u8())))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list customers")?;
        if models.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let rows = reservations::Entity::find()
            .filter(reservations::Column::UserId.is_in(user_ids))
            .order_by_desc(reservations::Column::Id)
            .find_also_related(parking_spots::Entity)
            .all(&self.db)
            .await
            .context("list reservations of customers")?;

        // Rows are newest first, so the first row seen per user is the latest.
        let mut latest: HashMap<i32, Option<SpotStatus>> = HashMap::new();
        for (reservation, spot) in rows {
            if latest.contains_key(&reservation.user_id) {
                continue;
            }
            let status = spot.map(|s| parse_status(&s.status)).transpose()?;
            latest.insert(reservation.user_id, status);
        }

        Ok(models
            .into_iter()
            .map(|m| Customer {
                latest_spot_status: latest.get(&m.id).copied().flatten(),
                id: m.id,
                email: m.email,
                full_name: m.full_name,
            })
            .collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .unwrap_or(UserRole::User);
    User {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        password_hash: model.password,
        role,
    }
}

// ── Lot repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLotRepository {
    pub db: DatabaseConnection,
}

impl LotRepository for DbLotRepository {
    async fn list_summaries(&self) -> Result<Vec<LotSummary>, ParkingServiceError> {
        let lots = parking_lots::Entity::find()
            .order_by_asc(parking_lots::Column::Id)
            .all(&self.db)
            .await
            .context("list parking lots")?;

        let counts: Vec<(i32, String, i64)> = parking_spots::Entity::find()
            .select_only()
            .column(parking_spots::Column::LotId)
            .column(parking_spots::Column::Status)
            .column_as(Expr::col(parking_spots::Column::Id).count(), "spot_count")
            .group_by(parking_spots::Column::LotId)
            .group_by(parking_spots::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count spots by lot and status")?;

        let mut by_lot: HashMap<i32, HashMap<SpotStatus, u32>> = HashMap::new();
        for (lot_id, code, count) in counts {
            let count = u32::try_from(count).context("spot count out of range")?;
            by_lot
                .entry(lot_id)
                .or_default()
                .insert(parse_status(&code)?, count);
        }

        Ok(lots
            .into_iter()
            .map(|model| {
                let counts = by_lot.remove(&model.id).unwrap_or_default();
                let count = |status: SpotStatus| counts.get(&status).copied().unwrap_or(0);
                LotSummary {
                    total_spots: counts.values().sum(),
                    available_spots: count(SpotStatus::Available),
                    occupied_spots: count(SpotStatus::Occupied),
                    lot: lot_from_model(model),
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Lot>, ParkingServiceError> {
        let model = parking_lots::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find parking lot by id")?;
        Ok(model.map(lot_from_model))
    }

    async fn create(&self, details: &LotDetails) -> Result<Lot, ParkingServiceError> {
        let model = self
            .db
            .transaction::<_, parking_lots::Model, DbErr>(|txn| {
                let details = details.clone();
                Box::pin(async move {
                    let lot = lot_active_model(&details).insert(txn).await?;
                    insert_spots(txn, lot.id, details.max_spots).await?;
                    Ok(lot)
                })
            })
            .await
            .context("create parking lot with spots")?;
        Ok(lot_from_model(model))
    }

    async fn update(&self, id: i32, details: &LotDetails) -> Result<bool, ParkingServiceError> {
        let result = self
            .db
            .transaction::<_, (), TxnError>(|txn| {
                let details = details.clone();
                Box::pin(async move {
                    let current = parking_spots::Entity::find()
                        .filter(parking_spots::Column::LotId.eq(id))
                        .count(txn)
                        .await?;
                    let current = u32::try_from(current).map_err(|_| TxnError::Rejected)?;

                    match CapacityChange::between(current, details.max_spots) {
                        CapacityChange::Unchanged => {}
                        CapacityChange::Grow(n) => insert_spots(txn, id, n).await?,
                        CapacityChange::Shrink(n) => {
                            // Available spots that never carried a reservation, newest first.
                            let removable: Vec<i32> = parking_spots::Entity::find()
                                .select_only()
                                .column(parking_spots::Column::Id)
                                .filter(parking_spots::Column::LotId.eq(id))
                                .filter(
                                    parking_spots::Column::Status
                                        .eq(SpotStatus::Available.as_code()),
                                )
                                .filter(
                                    parking_spots::Column::Id.not_in_subquery(
                                        Query::select()
                                            .column(reservations::Column::SpotId)
                                            .from(reservations::Entity)
                                            .to_owned(),
                                    ),
                                )
                                .order_by_desc(parking_spots::Column::Id)
                                .limit(u64::from(n))
                                .into_tuple()
                                .all(txn)
                                .await?;
                            if removable.len() < n as usize {
                                return Err(TxnError::Rejected);
                            }
                            let deleted = parking_spots::Entity::delete_many()
                                .filter(parking_spots::Column::Id.is_in(removable))
                                .filter(
                                    parking_spots::Column::Status
                                        .eq(SpotStatus::Available.as_code()),
                                )
                                .exec(txn)
                                .await?;
                            if deleted.rows_affected != u64::from(n) {
                                return Err(TxnError::Rejected);
                            }
                        }
                    }

                    let mut lot = lot_active_model(&details);
                    lot.id = Set(id);
                    lot.update(txn).await?;
                    Ok(())
                })
            })
            .await;
        Ok(settle(result, "update parking lot")?.is_some())
    }

    async fn delete(&self, id: i32) -> Result<bool, ParkingServiceError> {
        let result = self
            .db
            .transaction::<_, (), TxnError>(|txn| {
                Box::pin(async move {
                    let spots_of_lot = Query::select()
                        .column(parking_spots::Column::Id)
                        .from(parking_spots::Entity)
                        .and_where(Expr::col(parking_spots::Column::LotId).eq(id))
                        .and_where(
                            Expr::col(parking_spots::Column::Status)
                                .ne(SpotStatus::Occupied.as_code()),
                        )
                        .to_owned();
                    reservations::Entity::delete_many()
                        .filter(reservations::Column::SpotId.in_subquery(spots_of_lot))
                        .exec(txn)
                        .await?;
                    parking_spots::Entity::delete_many()
                        .filter(parking_spots::Column::LotId.eq(id))
                        .filter(parking_spots::Column::Status.ne(SpotStatus::Occupied.as_code()))
                        .exec(txn)
                        .await?;

                    // Anything left is Occupied.
                    let remaining = parking_spots::Entity::find()
                        .filter(parking_spots::Column::LotId.eq(id))
                        .count(txn)
                        .await?;
                    if remaining > 0 {
                        return Err(TxnError::Rejected);
                    }
                    parking_lots::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await;
        Ok(settle(result, "delete parking lot")?.is_some())
    }
}

fn lot_active_model(details: &LotDetails) -> parking_lots::ActiveModel {
    parking_lots::ActiveModel {
        prime_location_name: Set(details.prime_location_name.clone()),
        price_per_hour: Set(details.price_per_hour),
        address: Set(details.address.clone()),
        pin_code: Set(details.pin_code.clone()),
        max_spots: Set(details.max_spots as i32),
        ..Default::default()
    }
}

fn lot_from_model(model: parking_lots::Model) -> Lot {
    Lot {
        id: model.id,
        details: LotDetails {
            prime_location_name: model.prime_location_name,
            address: model.address,
            pin_code: model.pin_code,
            price_per_hour: model.price_per_hour,
            max_spots: u32::try_from(model.max_spots).unwrap_or(0),
        },
    }
}

// ── Spot repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSpotRepository {
    pub db: DatabaseConnection,
}

impl SpotRepository for DbSpotRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Spot>, ParkingServiceError> {
        let model = parking_spots::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find parking spot by id")?;
        Ok(model.map(spot_from_model).transpose()?)
    }

    async fn list_by_lot(&self, lot_id: i32) -> Result<Vec<SpotWithHolder>, ParkingServiceError> {
        let spots = parking_spots::Entity::find()
            .filter(parking_spots::Column::LotId.eq(lot_id))
            .order_by_asc(parking_spots::Column::Id)
            .all(&self.db)
            .await
            .context("list spots of lot")?;
        if spots.is_empty() {
            return Ok(vec![]);
        }

        let spot_ids: Vec<i32> = spots.iter().map(|s| s.id).collect();
        let open = reservations::Entity::find()
            .filter(reservations::Column::SpotId.is_in(spot_ids))
            .filter(reservations::Column::LeavingTimestamp.is_null())
            .find_also_related(users::Entity)
            .all(&self.db)
            .await
            .context("list open reservations of lot")?;

        let mut holders: HashMap<i32, SpotHolder> = open
            .into_iter()
            .filter_map(|(reservation, user)| {
                let user = user?;
                Some((
                    reservation.spot_id,
                    SpotHolder {
                        reservation_id: reservation.id,
                        user_id: user.id,
                        email: user.email,
                        full_name: user.full_name,
                        parking_timestamp: reservation.parking_timestamp,
                    },
                ))
            })
            .collect();

        spots
            .into_iter()
            .map(|model| -> Result<SpotWithHolder, ParkingServiceError> {
                let holder = holders.remove(&model.id);
                Ok(SpotWithHolder {
                    spot: spot_from_model(model)?,
                    holder,
                })
            })
            .collect()
    }
}

fn spot_from_model(model: parking_spots::Model) -> anyhow::Result<Spot> {
    Ok(Spot {
        id: model.id,
        lot_id: model.lot_id,
        status: parse_status(&model.status)?,
    })
}

// ── Reservation repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReservationRepository {
    pub db: DatabaseConnection,
}

impl DbReservationRepository {
    /// Attach spot status and lot to each reservation row.
    async fn details(
        &self,
        rows: Vec<(reservations::Model, Option<parking_spots::Model>)>,
    ) -> Result<Vec<ReservationDetail>, ParkingServiceError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }
        let mut lot_ids: Vec<i32> = rows
            .iter()
            .filter_map(|(_, spot)| spot.as_ref().map(|s| s.lot_id))
            .collect();
        lot_ids.sort_unstable();
        lot_ids.dedup();
        let lots: HashMap<i32, parking_lots::Model> = parking_lots::Entity::find()
            .filter(parking_lots::Column::Id.is_in(lot_ids))
            .all(&self.db)
            .await
            .context("load lots of reservations")?
            .into_iter()
            .map(|lot| (lot.id, lot))
            .collect();

        rows.into_iter()
            .map(|(reservation, spot)| -> Result<ReservationDetail, ParkingServiceError> {
                let spot = spot.with_context(|| {
                    format!("spot {} of reservation {} missing", reservation.spot_id, reservation.id)
                })?;
                let lot = lots
                    .get(&spot.lot_id)
                    .with_context(|| format!("lot {} of spot {} missing", spot.lot_id, spot.id))?;
                Ok(ReservationDetail {
                    spot_status: parse_status(&spot.status)?,
                    lot_id: lot.id,
                    lot_name: lot.prime_location_name.clone(),
                    price_per_hour: lot.price_per_hour,
                    reservation: reservation_from_model(reservation),
                })
            })
            .collect()
    }

    async fn first_detail(
        &self,
        row: Option<(reservations::Model, Option<parking_spots::Model>)>,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        match row {
            Some(row) => Ok(self.details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

impl ReservationRepository for DbReservationRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let row = reservations::Entity::find_by_id(id)
            .find_also_related(parking_spots::Entity)
            .one(&self.db)
            .await
            .context("find reservation by id")?;
        self.first_detail(row).await
    }

    async fn find_open_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let row = reservations::Entity::find()
            .filter(reservations::Column::UserId.eq(user_id))
            .filter(reservations::Column::LeavingTimestamp.is_null())
            .find_also_related(parking_spots::Entity)
            .one(&self.db)
            .await
            .context("find open reservation of user")?;
        self.first_detail(row).await
    }

    async fn find_open_by_spot(
        &self,
        spot_id: i32,
    ) -> Result<Option<ReservationDetail>, ParkingServiceError> {
        let row = reservations::Entity::find()
            .filter(reservations::Column::SpotId.eq(spot_id))
            .filter(reservations::Column::LeavingTimestamp.is_null())
            .find_also_related(parking_spots::Entity)
            .one(&self.db)
            .await
            .context("find open reservation of spot")?;
        self.first_detail(row).await
    }

    async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<ReservationDetail>, ParkingServiceError> {
        let rows = reservations::Entity::find()
            .filter(reservations::Column::UserId.eq(user_id))
            .order_by_desc(reservations::Column::Id)
            .find_also_related(parking_spots::Entity)
            .all(&self.db)
            .await
            .context("list reservations of user")?;
        self.details(rows).await
    }

    async fn reserve(
        &self,
        user_id: i32,
        lot_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Reservation>, ParkingServiceError> {
        let result = self
            .db
            .transaction::<_, Option<reservations::Model>, TxnError>(|txn| {
                Box::pin(async move {
                    let Some(spot) = parking_spots::Entity::find()
                        .filter(parking_spots::Column::LotId.eq(lot_id))
                        .filter(parking_spots::Column::Status.eq(SpotStatus::Available.as_code()))
                        .order_by_asc(parking_spots::Column::Id)
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };
                    transition_spot(txn, spot.id, SpotStatus::Available, SpotAction::Reserve)
                        .await?;
                    let reservation = reservations::ActiveModel {
                        user_id: Set(user_id),
                        spot_id: Set(spot.id),
                        parking_timestamp: Set(now),
                        leaving_timestamp: Set(None),
                        cost: Set(None),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    Ok(Some(reservation))
                })
            })
            .await;

        // The open-reservation unique index is the last line for concurrent reserves by one user.
        if let Err(TransactionError::Transaction(TxnError::Db(ref e))) = result {
            if is_unique_violation(e) {
                return Err(ParkingServiceError::ActiveReservationExists);
            }
        }
        match settle(result, "reserve spot")? {
            Some(model) => Ok(model.map(reservation_from_model)),
            None => Err(ParkingServiceError::Conflict),
        }
    }

    async fn occupy(
        &self,
        reservation_id: i32,
        now: DateTime<Utc>,
    ) -> Result<bool, ParkingServiceError> {
        let result = self
            .db
            .transaction::<_, (), TxnError>(|txn| {
                Box::pin(async move {
                    let spot_id = open_reservation_spot(txn, reservation_id).await?;
                    transition_spot(txn, spot_id, SpotStatus::Reserved, SpotAction::Occupy).await?;
                    let updated = reservations::Entity::update_many()
                        .col_expr(reservations::Column::ParkingTimestamp, Expr::value(now))
                        .filter(reservations::Column::Id.eq(reservation_id))
                        .filter(reservations::Column::LeavingTimestamp.is_null())
                        .exec(txn)
                        .await?;
                    if updated.rows_affected != 1 {
                        return Err(TxnError::Rejected);
                    }
                    Ok(())
                })
            })
            .await;
        Ok(settle(result, "occupy spot")?.is_some())
    }

    async fn release(
        &self,
        reservation_id: i32,
        leaving_timestamp: DateTime<Utc>,
        cost: f64,
    ) -> Result<bool, ParkingServiceError> {
        let result = self
            .db
            .transaction::<_, (), TxnError>(|txn| {
                Box::pin(async move {
                    let spot_id = open_reservation_spot(txn, reservation_id).await?;
                    transition_spot(txn, spot_id, SpotStatus::Occupied, SpotAction::Release)
                        .await?;
                    let updated = reservations::Entity::update_many()
                        .col_expr(
                            reservations::Column::LeavingTimestamp,
                            Expr::value(leaving_timestamp),
                        )
                        .col_expr(reservations::Column::Cost, Expr::value(cost))
                        .filter(reservations::Column::Id.eq(reservation_id))
                        .filter(reservations::Column::LeavingTimestamp.is_null())
                        .exec(txn)
                        .await?;
                    if updated.rows_affected != 1 {
                        return Err(TxnError::Rejected);
                    }
                    Ok(())
                })
            })
            .await;
        Ok(settle(result, "release spot")?.is_some())
    }
}

/// Spot id of an open reservation; `Rejected` if it is gone or already closed.
async fn open_reservation_spot<C: ConnectionTrait>(
    conn: &C,
    reservation_id: i32,
) -> Result<i32, TxnError> {
    let reservation = reservations::Entity::find_by_id(reservation_id)
        .filter(reservations::Column::LeavingTimestamp.is_null())
        .one(conn)
        .await?;
    reservation.map(|r| r.spot_id).ok_or(TxnError::Rejected)
}

fn reservation_from_model(model: reservations::Model) -> Reservation {
    Reservation {
        id: model.id,
        user_id: model.user_id,
        spot_id: model.spot_id,
        parking_timestamp: model.parking_timestamp,
        leaving_timestamp: model.leaving_timestamp,
        cost: model.cost,
    }
}
