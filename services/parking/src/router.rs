use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use parking_core::health::healthz;
use parking_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{
        create_lot, create_lot_form, dashboard as admin_dashboard, delete_lot, edit_lot,
        edit_lot_form, lot_spots, release_spot, users,
    },
    auth::{login, login_form, logout, register, register_form},
    home::{index, readyz},
    user::{dashboard as user_dashboard, history, occupy, release, reservation, reserve},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", get(register_form).post(register))
        .route("/auth/login", get(login_form).post(login))
        .route("/auth/logout", get(logout))
        // Admin
        .route("/admin/dashboard", get(admin_dashboard))
        .route("/admin/lots/create", get(create_lot_form).post(create_lot))
        .route("/admin/lots/{lot_id}/edit", get(edit_lot_form).post(edit_lot))
        .route("/admin/lots/{lot_id}/delete", post(delete_lot))
        .route("/admin/lots/{lot_id}/spots", get(lot_spots))
        .route("/admin/spots/{spot_id}/release", post(release_spot))
        .route("/admin/users", get(users))
        // User
        .route("/user/dashboard", get(user_dashboard))
        .route("/user/reserve", post(reserve))
        .route("/user/reserve/{reservation_id}", get(reservation))
        .route("/user/occupy/{reservation_id}", post(occupy))
        .route("/user/release/{reservation_id}", post(release))
        .route("/user/history", get(history))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
