//! Read flash messages back out of responses.

use http::HeaderMap;
use http::header::SET_COOKIE;

use parking_core::flash::{Flash, PARKING_FLASH};

/// The flash set by a response's `Set-Cookie` headers, if any.
pub fn flash_from_headers(headers: &HeaderMap) -> Option<Flash> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == PARKING_FLASH)
        .and_then(|(_, value)| Flash::decode(value.trim()))
}
