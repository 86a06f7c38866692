use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use parking_core::flash::{Flash, redirect_with_flash, take_flash};
use parking_domain::lot::LotDetailsInput;

use crate::error::ParkingServiceError;
use crate::session::AdminUser;
use crate::state::AppState;
use crate::usecase::lot::{
    CreateLotUseCase, DeleteLotUseCase, GetLotUseCase, ListLotsUseCase, UpdateLotUseCase,
};
use crate::usecase::spot::{AdminReleaseSpotUseCase, GetSpotUseCase, ListLotSpotsUseCase};
use crate::usecase::user::ListCustomersUseCase;
use crate::views;

const DASHBOARD: &str = "/admin/dashboard";

type Page = Result<(CookieJar, Html<String>), ParkingServiceError>;

// ── GET /admin/dashboard ─────────────────────────────────────────────────────

pub async fn dashboard(_admin: AdminUser, State(state): State<AppState>, jar: CookieJar) -> Page {
    let usecase = ListLotsUseCase {
        lots: state.lot_repo(),
    };
    let lots = usecase.execute().await?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, views::admin::dashboard(&lots, flash.as_ref())))
}

// ── Lot form ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LotForm {
    #[serde(default)]
    pub prime_location_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pin_code: String,
    #[serde(default)]
    pub price_per_hour: String,
    #[serde(default)]
    pub max_spots: String,
}

impl LotForm {
    fn as_input(&self) -> LotDetailsInput<'_> {
        LotDetailsInput {
            prime_location_name: &self.prime_location_name,
            address: &self.address,
            pin_code: &self.pin_code,
            price_per_hour: &self.price_per_hour,
            max_spots: &self.max_spots,
        }
    }
}

// ── GET/POST /admin/lots/create ──────────────────────────────────────────────

pub async fn create_lot_form(_admin: AdminUser, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::admin::lot_form(None, flash.as_ref()))
}

pub async fn create_lot(
    _admin: AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LotForm>,
) -> Result<Response, ParkingServiceError> {
    let usecase = CreateLotUseCase {
        lots: state.lot_repo(),
    };
    match usecase.execute(form.as_input()).await {
        Ok(_) => Ok(redirect_with_flash(
            jar,
            DASHBOARD,
            Flash::success("Parking lot created successfully!"),
        )),
        Err(e) => e.flash_to(jar, "/admin/lots/create"),
    }
}

// ── GET/POST /admin/lots/{lot_id}/edit ───────────────────────────────────────

pub async fn edit_lot_form(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(lot_id): Path<i32>,
    jar: CookieJar,
) -> Page {
    let usecase = GetLotUseCase {
        lots: state.lot_repo(),
    };
    let lot = usecase.execute(lot_id).await?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, views::admin::lot_form(Some(&lot), flash.as_ref())))
}

pub async fn edit_lot(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(lot_id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<LotForm>,
) -> Result<Response, ParkingServiceError> {
    let usecase = UpdateLotUseCase {
        lots: state.lot_repo(),
    };
    match usecase.execute(lot_id, form.as_input()).await {
        Ok(()) => Ok(redirect_with_flash(
            jar,
            DASHBOARD,
            Flash::success("Parking lot updated."),
        )),
        Err(e) => e.flash_to(jar, &format!("/admin/lots/{lot_id}/edit")),
    }
}

// ── POST /admin/lots/{lot_id}/delete ─────────────────────────────────────────

pub async fn delete_lot(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(lot_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, ParkingServiceError> {
    let usecase = DeleteLotUseCase {
        lots: state.lot_repo(),
    };
    match usecase.execute(lot_id).await {
        Ok(()) => Ok(redirect_with_flash(
            jar,
            DASHBOARD,
            Flash::success("Parking lot deleted."),
        )),
        Err(e) => e.flash_to(jar, DASHBOARD),
    }
}

// ── GET /admin/lots/{lot_id}/spots ───────────────────────────────────────────

pub async fn lot_spots(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(lot_id): Path<i32>,
    jar: CookieJar,
) -> Page {
    let usecase = ListLotSpotsUseCase {
        lots: state.lot_repo(),
        spots: state.spot_repo(),
    };
    let lot_spots = usecase.execute(lot_id).await?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, views::admin::spots(&lot_spots, flash.as_ref())))
}

// ── POST /admin/spots/{spot_id}/release ──────────────────────────────────────

pub async fn release_spot(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(spot_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, ParkingServiceError> {
    let spot = GetSpotUseCase {
        spots: state.spot_repo(),
    }
    .execute(spot_id)
    .await?;
    let back = format!("/admin/lots/{}/spots", spot.lot_id);

    let usecase = AdminReleaseSpotUseCase {
        reservations: state.reservation_repo(),
    };
    match usecase.execute(spot, Utc::now()).await {
        Ok(cost) => {
            tracing::info!(admin_id = admin.id, spot_id, "admin release confirmed");
            Ok(redirect_with_flash(
                jar,
                &back,
                Flash::success(format!(
                    "Spot released successfully. The user was billed {}.",
                    views::layout::money(cost)
                )),
            ))
        }
        Err(e) => e.flash_to(jar, &back),
    }
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

pub async fn users(_admin: AdminUser, State(state): State<AppState>, jar: CookieJar) -> Page {
    let usecase = ListCustomersUseCase {
        users: state.user_repo(),
    };
    let customers = usecase.execute().await?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, views::admin::users(&customers, flash.as_ref())))
}
