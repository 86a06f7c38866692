//! One-shot flash messages carried across a redirect in a short-lived cookie.
//!
//! The cookie value is base64url (no padding) of the JSON-encoded [`Flash`], so
//! it never contains characters that need quoting in a `Set-Cookie` header.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use time::Duration;

/// Cookie name for the pending flash message.
pub const PARKING_FLASH: &str = "parking_flash";

/// Flash cookie Max-Age in seconds.
pub const FLASH_MAX_AGE_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Danger,
}

impl FlashLevel {
    /// CSS class suffix used by the page layout.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    /// Returns `None` for values that were not produced by [`Flash::encode`].
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Queue `flash` for the next rendered page. A pending flash is replaced.
pub fn set_flash(jar: CookieJar, flash: &Flash) -> CookieJar {
    match flash.encode() {
        Ok(value) => jar.add(
            Cookie::build((PARKING_FLASH, value))
                .path("/")
                .max_age(Duration::seconds(FLASH_MAX_AGE_SECS))
                .http_only(true)
                .same_site(SameSite::Lax)
                .build(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode flash message");
            jar
        }
    }
}

/// Take the pending flash, if any, and clear its cookie.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(value) = jar.get(PARKING_FLASH).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(PARKING_FLASH).path("/"));
    (jar, Flash::decode(&value))
}

/// `303 See Other` to `to`, carrying `flash`.
pub fn redirect_with_flash(jar: CookieJar, to: &str, flash: Flash) -> Response {
    (set_flash(jar, &flash), Redirect::to(to)).into_response()
}
