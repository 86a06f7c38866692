use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use parking_core::flash::{Flash, redirect_with_flash, take_flash};

use crate::error::ParkingServiceError;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::reservation::{
    GetReservationUseCase, HistoryUseCase, OccupySpotUseCase, ReleaseSpotUseCase,
    ReserveSpotUseCase, UserDashboardUseCase,
};
use crate::views;

const DASHBOARD: &str = "/user/dashboard";

type Page = Result<(CookieJar, Html<String>), ParkingServiceError>;

// ── GET /user/dashboard ──────────────────────────────────────────────────────

pub async fn dashboard(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Page {
    let usecase = UserDashboardUseCase {
        lots: state.lot_repo(),
        reservations: state.reservation_repo(),
    };
    let dashboard = usecase.execute(user.id).await?;
    let (jar, flash) = take_flash(jar);
    Ok((
        jar,
        views::user::dashboard(&dashboard, &user.full_name, flash.as_ref()),
    ))
}

// ── POST /user/reserve ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReserveForm {
    #[serde(default)]
    pub lot_id: String,
}

pub async fn reserve(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ReserveForm>,
) -> Result<Response, ParkingServiceError> {
    let Ok(lot_id) = form.lot_id.trim().parse::<i32>() else {
        return ParkingServiceError::InvalidInput("Please choose a parking lot.".to_owned())
            .flash_to(jar, DASHBOARD);
    };
    let usecase = ReserveSpotUseCase {
        reservations: state.reservation_repo(),
    };
    match usecase.execute(user.id, lot_id, Utc::now()).await {
        Ok(reservation) => {
            Ok(Redirect::to(&format!("/user/reserve/{}", reservation.id)).into_response())
        }
        Err(e) => e.flash_to(jar, DASHBOARD),
    }
}

// ── GET /user/reserve/{reservation_id} ───────────────────────────────────────

pub async fn reservation(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, ParkingServiceError> {
    let usecase = GetReservationUseCase {
        reservations: state.reservation_repo(),
    };
    match usecase.execute(user.id, reservation_id).await {
        Ok(detail) => {
            let (jar, flash) = take_flash(jar);
            Ok((jar, views::user::reservation(&detail, flash.as_ref())).into_response())
        }
        Err(e) => e.flash_to(jar, DASHBOARD),
    }
}

// ── POST /user/occupy/{reservation_id} ───────────────────────────────────────

pub async fn occupy(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, ParkingServiceError> {
    let usecase = OccupySpotUseCase {
        reservations: state.reservation_repo(),
    };
    match usecase.execute(user.id, reservation_id, Utc::now()).await {
        Ok(()) => Ok(redirect_with_flash(
            jar,
            DASHBOARD,
            Flash::success("Spot occupied successfully! The parking timer has started."),
        )),
        Err(e) => e.flash_to(jar, DASHBOARD),
    }
}

// ── POST /user/release/{reservation_id} ──────────────────────────────────────

pub async fn release(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, ParkingServiceError> {
    let usecase = ReleaseSpotUseCase {
        reservations: state.reservation_repo(),
    };
    match usecase.execute(user.id, reservation_id, Utc::now()).await {
        Ok(cost) => Ok(redirect_with_flash(
            jar,
            "/user/history",
            Flash::success(format!(
                "Spot released. Your total cost is {}.",
                views::layout::money(cost)
            )),
        )),
        Err(e) => e.flash_to(jar, DASHBOARD),
    }
}

// ── GET /user/history ────────────────────────────────────────────────────────

pub async fn history(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Page {
    let usecase = HistoryUseCase {
        reservations: state.reservation_repo(),
    };
    let reservations = usecase.execute(user.id).await?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, views::user::history(&reservations, flash.as_ref())))
}
