//! Mock session helpers for integration tests.
//!
//! Routes under `/user` and `/admin` read a signed `parking_session` cookie. In tests,
//! `MockSession` signs one directly so no login round-trip is needed.

use axum_extra::extract::cookie::Cookie;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};

use parking_auth_types::cookie::PARKING_SESSION;
use parking_auth_types::token::issue_session_token;

/// Session secret shared by test apps and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-tests-only";

/// Identity to sign into a test session cookie.
pub struct MockSession {
    pub user_id: i32,
    pub user_role: u8,
}

impl MockSession {
    pub fn new(user_id: i32, user_role: u8) -> Self {
        Self { user_id, user_role }
    }

    pub fn user(user_id: i32) -> Self {
        Self::new(user_id, 0)
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, 1)
    }

    /// Session token signed with [`TEST_SESSION_SECRET`].
    pub fn token(&self) -> String {
        issue_session_token(self.user_id, self.user_role, TEST_SESSION_SECRET)
            .expect("sign test session token")
            .0
    }

    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::new(PARKING_SESSION, self.token())
    }

    /// `Cookie` request header carrying the session, for raw `http::Request`s.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{PARKING_SESSION}={}", self.token())).unwrap(),
        );
        map
    }
}
