use axum::response::Html;

use parking_core::flash::Flash;

use super::layout::{Nav, page};

pub fn index(flash: Option<&Flash>) -> Html<String> {
    page(
        "Vehicle Parking",
        Nav::Guest,
        flash,
        "<p>Find a parking lot, reserve a spot and pay only for the time you park.</p>\
         <p><a href=\"/auth/login\">Login</a> or <a href=\"/auth/register\">create an account</a>.</p>",
    )
}
