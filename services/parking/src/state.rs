use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbLotRepository, DbReservationRepository, DbSpotRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub session_secret: String,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn lot_repo(&self) -> DbLotRepository {
        DbLotRepository {
            db: self.db.clone(),
        }
    }

    pub fn spot_repo(&self) -> DbSpotRepository {
        DbSpotRepository {
            db: self.db.clone(),
        }
    }

    pub fn reservation_repo(&self) -> DbReservationRepository {
        DbReservationRepository {
            db: self.db.clone(),
        }
    }
}
