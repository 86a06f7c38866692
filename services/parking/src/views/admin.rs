use std::fmt::Write as _;

use axum::response::Html;

use parking_core::flash::Flash;
use parking_domain::lot::MAX_SPOTS_PER_LOT;
use parking_domain::spot::SpotStatus;

use super::escape;
use super::layout::{Nav, money, page, timestamp};
use crate::domain::types::{Customer, Lot, LotSummary};
use crate::usecase::spot::LotSpots;

pub fn dashboard(lots: &[LotSummary], flash: Option<&Flash>) -> Html<String> {
    let mut body = String::from("<p><a href=\"/admin/lots/create\">Add a parking lot</a></p>");
    if lots.is_empty() {
        body.push_str("<p>No parking lots yet.</p>");
        return page("Admin Dashboard", Nav::Admin, flash, &body);
    }

    body.push_str(
        "<table><tr><th>#</th><th>Location</th><th>Address</th><th>Pin code</th>\
         <th>Price / hour</th><th>Occupied</th><th></th></tr>",
    );
    for summary in lots {
        let lot = &summary.lot;
        let _ = write!(
            body,
            "<tr><td>{id}</td><td>{name}</td><td>{address}</td><td>{pin}</td><td>{price}</td>\
             <td>{occupied} / {total}</td><td>\
             <a href=\"/admin/lots/{id}/spots\">Spots</a> \
             <a href=\"/admin/lots/{id}/edit\">Edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/admin/lots/{id}/delete\">\
             <button type=\"submit\">Delete</button></form></td></tr>",
            id = lot.id,
            name = escape(&lot.details.prime_location_name),
            address = escape(&lot.details.address),
            pin = escape(&lot.details.pin_code),
            price = money(lot.details.price_per_hour),
            occupied = summary.occupied_spots,
            total = summary.total_spots,
        );
    }
    body.push_str("</table>");
    page("Admin Dashboard", Nav::Admin, flash, &body)
}

/// Create form when `lot` is `None`, edit form otherwise.
pub fn lot_form(lot: Option<&Lot>, flash: Option<&Flash>) -> Html<String> {
    let (title, action) = match lot {
        Some(lot) => ("Edit Parking Lot", format!("/admin/lots/{}/edit", lot.id)),
        None => ("New Parking Lot", "/admin/lots/create".to_owned()),
    };
    let details = lot.map(|l| &l.details);
    let name = details.map(|d| escape(&d.prime_location_name)).unwrap_or_default();
    let address = details.map(|d| escape(&d.address)).unwrap_or_default();
    let pin = details.map(|d| escape(&d.pin_code)).unwrap_or_default();
    let price = details
        .map(|d| format!("{:.2}", d.price_per_hour))
        .unwrap_or_default();
    let max_spots = details.map(|d| d.max_spots.to_string()).unwrap_or_default();

    let body = format!(
        "<form method=\"post\" action=\"{action}\">\
         <label>Location name <input type=\"text\" name=\"prime_location_name\" value=\"{name}\" required></label>\
         <label>Address <input type=\"text\" name=\"address\" value=\"{address}\" required></label>\
         <label>Pin code <input type=\"text\" name=\"pin_code\" value=\"{pin}\" required></label>\
         <label>Price per hour <input type=\"number\" name=\"price_per_hour\" min=\"0\" step=\"0.01\" value=\"{price}\" required></label>\
         <label>Maximum spots <input type=\"number\" name=\"max_spots\" min=\"0\" max=\"{MAX_SPOTS_PER_LOT}\" value=\"{max_spots}\" required></label>\
         <button type=\"submit\">Save</button> <a href=\"/admin/dashboard\">Cancel</a></form>"
    );
    page(title, Nav::Admin, flash, &body)
}

pub fn spots(lot_spots: &LotSpots, flash: Option<&Flash>) -> Html<String> {
    let lot = &lot_spots.lot;
    let mut body = format!(
        "<p>{address} ({pin}), {price} per hour</p>\
         <p>Occupied: {occupied} &middot; Reserved: {reserved} &middot; Available: {available}</p>",
        address = escape(&lot.details.address),
        pin = escape(&lot.details.pin_code),
        price = money(lot.details.price_per_hour),
        occupied = lot_spots.count(SpotStatus::Occupied),
        reserved = lot_spots.count(SpotStatus::Reserved),
        available = lot_spots.count(SpotStatus::Available),
    );

    body.push_str(
        "<table><tr><th>Spot</th><th>Status</th><th>Held by</th><th>Since</th><th></th></tr>",
    );
    for entry in &lot_spots.spots {
        let spot = &entry.spot;
        let (holder, since) = match &entry.holder {
            Some(h) => (
                format!("{} &lt;{}&gt;", escape(&h.full_name), escape(&h.email)),
                timestamp(h.parking_timestamp),
            ),
            None if spot.status.is_held() => ("unknown".to_owned(), String::new()),
            None => (String::new(), String::new()),
        };
        let action = if spot.status == SpotStatus::Occupied {
            format!(
                "<form class=\"inline\" method=\"post\" action=\"/admin/spots/{}/release\">\
                 <button type=\"submit\">Release</button></form>",
                spot.id
            )
        } else {
            String::new()
        };
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{holder}</td><td>{since}</td><td>{action}</td></tr>",
            spot.id,
            spot.status.label(),
        );
    }
    body.push_str("</table><p><a href=\"/admin/dashboard\">Back to dashboard</a></p>");

    let title = format!("Spots of {}", lot.details.prime_location_name);
    page(&title, Nav::Admin, flash, &body)
}

pub fn users(customers: &[Customer], flash: Option<&Flash>) -> Html<String> {
    let mut body = String::from(
        "<table><tr><th>#</th><th>Email</th><th>Full name</th><th>Latest spot status</th></tr>",
    );
    for customer in customers {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            customer.id,
            escape(&customer.email),
            escape(&customer.full_name),
            customer.latest_spot_status.map_or("N/A", SpotStatus::label),
        );
    }
    body.push_str("</table>");
    page("Registered Users", Nav::Admin, flash, &body)
}
