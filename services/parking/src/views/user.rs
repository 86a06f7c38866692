use std::fmt::Write as _;

use axum::response::Html;

use parking_core::flash::Flash;
use parking_domain::spot::SpotStatus;

use super::escape;
use super::layout::{Nav, money, page, timestamp};
use crate::domain::types::ReservationDetail;
use crate::usecase::reservation::UserDashboard;

fn occupy_button(reservation_id: i32) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/user/occupy/{reservation_id}\">\
         <button type=\"submit\">Occupy spot</button></form>"
    )
}

fn release_button(reservation_id: i32) -> String {
    format!(
        "<form class=\"inline\" method=\"post\" action=\"/user/release/{reservation_id}\">\
         <button type=\"submit\">Release spot</button></form>"
    )
}

/// Next step for an open reservation, if any.
fn action_for(detail: &ReservationDetail) -> String {
    if !detail.reservation.is_open() {
        return String::new();
    }
    match detail.spot_status {
        SpotStatus::Reserved => occupy_button(detail.reservation.id),
        SpotStatus::Occupied => release_button(detail.reservation.id),
        SpotStatus::Available => String::new(),
    }
}

pub fn dashboard(dashboard: &UserDashboard, full_name: &str, flash: Option<&Flash>) -> Html<String> {
    let mut body = format!("<p>Welcome, {}.</p>", escape(full_name));

    match &dashboard.active {
        Some(active) => {
            let _ = write!(
                body,
                "<h2>Your active reservation</h2>\
                 <p>Spot #{spot} at {lot} ({status}) since {since}. {action}</p>",
                spot = active.reservation.spot_id,
                lot = escape(&active.lot_name),
                status = active.spot_status.label(),
                since = timestamp(active.reservation.parking_timestamp),
                action = action_for(active),
            );
        }
        None => body.push_str("<p>You have no active reservation.</p>"),
    }

    body.push_str(
        "<h2>Parking lots</h2><table><tr><th>Location</th><th>Address</th><th>Price / hour</th>\
         <th>Available</th><th></th></tr>",
    );
    for summary in &dashboard.lots {
        let lot = &summary.lot;
        let reserve = if dashboard.active.is_none() && summary.available_spots > 0 {
            format!(
                "<form class=\"inline\" method=\"post\" action=\"/user/reserve\">\
                 <input type=\"hidden\" name=\"lot_id\" value=\"{}\">\
                 <button type=\"submit\">Reserve</button></form>",
                lot.id
            )
        } else {
            String::new()
        };
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{reserve}</td></tr>",
            escape(&lot.details.prime_location_name),
            escape(&lot.details.address),
            money(lot.details.price_per_hour),
            summary.available_spots,
        );
    }
    body.push_str("</table>");
    page("User Dashboard", Nav::User, flash, &body)
}

pub fn reservation(detail: &ReservationDetail, flash: Option<&Flash>) -> Html<String> {
    let body = format!(
        "<table>\
         <tr><th>Reservation</th><td>#{id}</td></tr>\
         <tr><th>Parking lot</th><td>{lot}</td></tr>\
         <tr><th>Spot</th><td>#{spot} ({status})</td></tr>\
         <tr><th>Price per hour</th><td>{price}</td></tr>\
         <tr><th>Since</th><td>{since}</td></tr>\
         </table><p>{action}</p><p><a href=\"/user/dashboard\">Back to dashboard</a></p>",
        id = detail.reservation.id,
        lot = escape(&detail.lot_name),
        spot = detail.reservation.spot_id,
        status = detail.spot_status.label(),
        price = money(detail.price_per_hour),
        since = timestamp(detail.reservation.parking_timestamp),
        action = action_for(detail),
    );
    page("Reservation Confirmed", Nav::User, flash, &body)
}

pub fn history(reservations: &[ReservationDetail], flash: Option<&Flash>) -> Html<String> {
    if reservations.is_empty() {
        return page(
            "Parking History",
            Nav::User,
            flash,
            "<p>You have not parked with us yet.</p>",
        );
    }

    let mut body = String::from(
        "<table><tr><th>#</th><th>Lot</th><th>Spot</th><th>Parked at</th><th>Left at</th>\
         <th>Cost</th><th></th></tr>",
    );
    for detail in reservations {
        let r = &detail.reservation;
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>#{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            r.id,
            escape(&detail.lot_name),
            r.spot_id,
            timestamp(r.parking_timestamp),
            r.leaving_timestamp.map(timestamp).unwrap_or_else(|| "Active".to_owned()),
            r.cost.map(money).unwrap_or_default(),
            action_for(detail),
        );
    }
    body.push_str("</table>");
    page("Parking History", Nav::User, flash, &body)
}
