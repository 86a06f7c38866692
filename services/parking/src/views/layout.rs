use std::fmt::Write as _;

use axum::response::Html;
use chrono::{DateTime, Utc};

use parking_core::flash::Flash;

use super::escape;

/// Navigation bar variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Guest,
    User,
    Admin,
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#f6f7f9;color:#222}\
nav{background:#1f3a5f;padding:.6rem 1rem}nav a{color:#fff;margin-right:1rem;text-decoration:none}\
main{max-width:960px;margin:1.5rem auto;padding:0 1rem}\
table{border-collapse:collapse;width:100%;background:#fff}th,td{border:1px solid #ddd;padding:.4rem .6rem;text-align:left}\
.flash{padding:.6rem 1rem;border-radius:4px;margin-bottom:1rem}\
.flash-success{background:#d4edda}.flash-info{background:#d1ecf1}.flash-danger{background:#f8d7da}\
form.inline{display:inline}label{display:block;margin:.5rem 0}";

/// Render a full page around `body`, which must already be escaped markup.
pub fn page(title: &str, nav: Nav, flash: Option<&Flash>, body: &str) -> Html<String> {
    let links: &[(&str, &str)] = match nav {
        Nav::Guest => &[("/", "Home"), ("/auth/login", "Login"), ("/auth/register", "Register")],
        Nav::User => &[
            ("/user/dashboard", "Dashboard"),
            ("/user/history", "History"),
            ("/auth/logout", "Logout"),
        ],
        Nav::Admin => &[
            ("/admin/dashboard", "Dashboard"),
            ("/admin/lots/create", "New lot"),
            ("/admin/users", "Users"),
            ("/auth/logout", "Logout"),
        ],
    };

    let mut html = String::with_capacity(body.len() + 1024);
    let _ = write!(
        html,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title} | Vehicle Parking</title>\
         <style>{STYLE}</style></head><body><nav>",
        title = escape(title),
    );
    for (href, label) in links {
        let _ = write!(html, "<a href=\"{href}\">{label}</a>");
    }
    let _ = write!(html, "</nav><main><h1>{}</h1>", escape(title));
    if let Some(flash) = flash {
        let _ = write!(
            html,
            "<div class=\"flash flash-{}\">{}</div>",
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
    html.push_str(body);
    html.push_str("</main></body></html>\n");
    Html(html)
}

/// Amount in rupees with two decimals.
pub fn money(amount: f64) -> String {
    format!("₹{amount:.2}")
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
