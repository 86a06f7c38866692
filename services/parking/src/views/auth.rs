use axum::response::Html;

use parking_core::flash::Flash;
use parking_domain::user::MIN_PASSWORD_LEN;

use super::layout::{Nav, page};

pub fn login(flash: Option<&Flash>) -> Html<String> {
    page(
        "User Login",
        Nav::Guest,
        flash,
        "<form method=\"post\" action=\"/auth/login\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Login</button></form>\
         <p>No account yet? <a href=\"/auth/register\">Register</a></p>",
    )
}

pub fn register(flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        "<form method=\"post\" action=\"/auth/register\">\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Full name <input type=\"text\" name=\"full_name\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" minlength=\"{MIN_PASSWORD_LEN}\" required></label>\
         <button type=\"submit\">Register</button></form>\
         <p>Already registered? <a href=\"/auth/login\">Login</a></p>"
    );
    page("User Sign-up", Nav::Guest, flash, &body)
}
