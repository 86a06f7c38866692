//! Cookie-session extractors.
//!
//! The session cookie only carries the user id; the account is re-read on every
//! request so deleted users and role changes take effect immediately.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use parking_auth_types::cookie::PARKING_SESSION;
use parking_auth_types::token::{SessionInfo, validate_session_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ParkingServiceError;
use crate::state::AppState;

fn session_from_headers(headers: &HeaderMap, secret: &str) -> Option<SessionInfo> {
    let jar = CookieJar::from_headers(headers);
    let token = jar.get(PARKING_SESSION)?;
    match validate_session_token(token.value(), secret) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!(error = %e, "rejected session cookie");
            None
        }
    }
}

/// A logged-in user. Rejects with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ParkingServiceError;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`: read the cookie
    // synchronously and move owned values into the future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = session_from_headers(&parts.headers, &state.session_secret);
        let users = state.user_repo();

        async move {
            let session = session.ok_or(ParkingServiceError::Unauthenticated)?;
            let user = users
                .find_by_id(session.user_id)
                .await?
                .ok_or(ParkingServiceError::Unauthenticated)?;
            Ok(Self(user))
        }
    }
}

/// A logged-in admin. Non-admins are redirected to the login page.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ParkingServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let current = CurrentUser::from_request_parts(parts, state);

        async move {
            let CurrentUser(user) = current.await?;
            if !user.role.is_admin() {
                return Err(ParkingServiceError::AdminOnly);
            }
            Ok(Self(user))
        }
    }
}
