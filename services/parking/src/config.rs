use serde::Deserialize;

use parking_core::config::Config;

/// Parking service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ParkingConfig {
    /// sea-orm connection URL. Env var: `DATABASE_URL`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `PARKING_PORT`.
    #[serde(default = "default_port")]
    pub parking_port: u16,
    /// HS256 key for session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// Mark cookies `Secure`. Enable when served over HTTPS.
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Bootstrap admin account, created at startup when both are set.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config for ParkingConfig {}

impl ParkingConfig {
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://parking.db?mode=rwc".to_owned()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}
