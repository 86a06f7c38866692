use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use parking_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use parking_core::flash::{Flash, redirect_with_flash, take_flash};

use crate::error::ParkingServiceError;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::usecase::auth::{LoginUseCase, RegisterInput, RegisterUseCase};
use crate::views;

// ── GET/POST /auth/register ──────────────────────────────────────────────────

pub async fn register_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::auth::register(flash.as_ref()))
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ParkingServiceError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let result = usecase
        .execute(RegisterInput {
            email: form.email,
            full_name: form.full_name,
            password: form.password,
        })
        .await;
    match result {
        Ok(_) => Ok(redirect_with_flash(
            jar,
            "/auth/login",
            Flash::success("Registered successfully. Please login."),
        )),
        Err(e) => e.flash_to(jar, "/auth/register"),
    }
}

// ── GET/POST /auth/login ─────────────────────────────────────────────────────

pub async fn login_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = take_flash(jar);
    (jar, views::auth::login(flash.as_ref()))
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ParkingServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        session_secret: state.session_secret.clone(),
    };
    let output = match usecase.execute(&form.email, &form.password).await {
        Ok(output) => output,
        Err(e) => return e.flash_to(jar, "/auth/login"),
    };

    let jar = set_session_cookie(jar, output.session_token, state.cookie_secure);
    let to = if output.user.role.is_admin() {
        "/admin/dashboard"
    } else {
        "/user/dashboard"
    };
    Ok((jar, Redirect::to(to)).into_response())
}

// ── GET /auth/logout ─────────────────────────────────────────────────────────

pub async fn logout(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    tracing::info!(user_id = user.id, "user logged out");
    let jar = clear_session_cookie(jar, state.cookie_secure);
    redirect_with_flash(jar, "/auth/login", Flash::info("Logged out successfully."))
}
