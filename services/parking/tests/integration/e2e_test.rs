use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::{DatabaseConnection, EntityTrait};

use parking_auth_types::cookie::PARKING_SESSION;
use parking_core::flash::FlashLevel;
use parking_schema::{parking_lots, parking_spots, reservations};
use parking_service::router::build_router;
use parking_service::state::AppState;
use parking_service::usecase::auth::EnsureAdminUseCase;
use parking_testing::auth::{MockSession, TEST_SESSION_SECRET};
use parking_testing::flash::flash_from_headers;

use crate::helpers::sqlite_db;

const ADMIN_EMAIL: &str = "admin@vpapp.com";
const ADMIN_PASSWORD: &str = "admin123";

async fn setup() -> (TestServer, DatabaseConnection) {
    let db = sqlite_db().await;

    let state = AppState {
        db: db.clone(),
        session_secret: TEST_SESSION_SECRET.to_owned(),
        cookie_secure: false,
    };
    EnsureAdminUseCase {
        users: state.user_repo(),
    }
    .execute(ADMIN_EMAIL, ADMIN_PASSWORD)
    .await
    .unwrap();

    (TestServer::new(build_router(state)).unwrap(), db)
}

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_owned()
}

#[tokio::test]
async fn should_report_health() {
    let (server, _db) = setup().await;
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_redirect_guests_to_login() {
    let (server, _db) = setup().await;

    let response = server.get("/user/dashboard").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
    let flash = flash_from_headers(response.headers()).unwrap();
    assert_eq!(flash.level, FlashLevel::Info);
    assert_eq!(flash.message, "Please log in to access this page.");
}

#[tokio::test]
async fn should_keep_users_out_of_admin_pages() {
    let (server, _db) = setup().await;
    server
        .post("/auth/register")
        .form(&[
            ("email", "asha@example.com"),
            ("full_name", "Asha Rao"),
            ("password", "secret1"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    // Admin is id 1, the new customer id 2.
    let response = server
        .get("/admin/dashboard")
        .add_cookie(MockSession::user(2).cookie())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
    let flash = flash_from_headers(response.headers()).unwrap();
    assert_eq!(flash.message, "Admins only! Access denied.");
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let (server, _db) = setup().await;

    let response = server
        .post("/auth/login")
        .form(&[("email", ADMIN_EMAIL), ("password", "wrong-password")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
    assert_eq!(
        flash_from_headers(response.headers()).unwrap().level,
        FlashLevel::Danger
    );
}

#[tokio::test]
async fn should_run_full_parking_session() {
    let (server, db) = setup().await;

    // Admin creates a lot with three spots.
    let admin_login = server
        .post("/auth/login")
        .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
        .await;
    admin_login.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&admin_login), "/admin/dashboard");
    let admin_cookie = admin_login.cookie(PARKING_SESSION);

    let created = server
        .post("/admin/lots/create")
        .add_cookie(admin_cookie.clone())
        .form(&[
            ("prime_location_name", "Central Plaza"),
            ("address", "12 Market Road"),
            ("pin_code", "560001"),
            ("price_per_hour", "40"),
            ("max_spots", "3"),
        ])
        .await;
    created.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&created), "/admin/dashboard");
    let lot = parking_lots::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(parking_spots::Entity::find().all(&db).await.unwrap().len(), 3);

    // Customer registers and logs in.
    let registered = server
        .post("/auth/register")
        .form(&[
            ("email", "Asha@Example.com"),
            ("full_name", "Asha Rao"),
            ("password", "secret1"),
        ])
        .await;
    registered.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&registered), "/auth/login");

    let user_login = server
        .post("/auth/login")
        .form(&[("email", "asha@example.com"), ("password", "secret1")])
        .await;
    user_login.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&user_login), "/user/dashboard");
    let user_cookie = user_login.cookie(PARKING_SESSION);

    let dashboard = server
        .get("/user/dashboard")
        .add_cookie(user_cookie.clone())
        .await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains("Central Plaza"));

    // Reserve, occupy, release.
    let lot_id = lot.id.to_string();
    let reserved = server
        .post("/user/reserve")
        .add_cookie(user_cookie.clone())
        .form(&[("lot_id", lot_id.as_str())])
        .await;
    reserved.assert_status(StatusCode::SEE_OTHER);
    let reservation_page = location(&reserved);
    let reservation = reservations::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(reservation_page, format!("/user/reserve/{}", reservation.id));

    server
        .get(&reservation_page)
        .add_cookie(user_cookie.clone())
        .await
        .assert_status_ok();

    let second = server
        .post("/user/reserve")
        .add_cookie(user_cookie.clone())
        .form(&[("lot_id", lot_id.as_str())])
        .await;
    second.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        flash_from_headers(second.headers()).unwrap().level,
        FlashLevel::Danger
    );

    let occupied = server
        .post(&format!("/user/occupy/{}", reservation.id))
        .add_cookie(user_cookie.clone())
        .await;
    occupied.assert_status(StatusCode::SEE_OTHER);
    let spot = parking_spots::Entity::find_by_id(reservation.spot_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(spot.status, "O");

    let released = server
        .post(&format!("/user/release/{}", reservation.id))
        .add_cookie(user_cookie.clone())
        .await;
    released.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&released), "/user/history");
    let flash = flash_from_headers(released.headers()).unwrap();
    assert!(flash.message.starts_with("Spot released. Your total cost is ₹"));

    let rows = reservations::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].leaving_timestamp.is_some());
    // Released within a minute, billed for the one-minute minimum.
    assert_eq!(rows[0].cost, Some(0.67));
    let spot = parking_spots::Entity::find_by_id(reservation.spot_id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(spot.status, "A");

    let history = server
        .get("/user/history")
        .add_cookie(user_cookie)
        .await;
    history.assert_status_ok();
    assert!(history.text().contains("₹0.67"));

    // The lot is free again and can be deleted.
    let deleted = server
        .post(&format!("/admin/lots/{}/delete", lot.id))
        .add_cookie(admin_cookie)
        .await;
    deleted.assert_status(StatusCode::SEE_OTHER);
    assert!(parking_lots::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(reservations::Entity::find().all(&db).await.unwrap().is_empty());
}
