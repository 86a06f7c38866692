use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use parking_core::config::Config;
use parking_core::tracing::init_tracing;
use parking_migration::Migrator;
use parking_service::config::ParkingConfig;
use parking_service::router::build_router;
use parking_service::state::AppState;
use parking_service::usecase::auth::EnsureAdminUseCase;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ParkingConfig::from_env();

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None).await.expect("failed to run migrations");
        info!("database migrations applied");
    }

    let state = AppState {
        db,
        session_secret: config.session_secret.clone(),
        cookie_secure: config.cookie_secure,
    };

    if let Some((email, password)) = config.admin_credentials() {
        EnsureAdminUseCase {
            users: state.user_repo(),
        }
        .execute(email, password)
        .await
        .expect("failed to ensure admin user");
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.parking_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("parking service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
