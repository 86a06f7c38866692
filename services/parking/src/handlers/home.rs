use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use parking_core::flash::take_flash;

use crate::state::AppState;
use crate::views;

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::home::index(flash.as_ref()))
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

/// Readiness: the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
