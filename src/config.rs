//! Application configuration management with security considerations.
//!
//! This module handles all configuration values required for the application.
//! Sensitive fields are marked and must never be logged.

use envconfig::Envconfig;
use std::sync::LazyLock;

/// Application configuration loaded from environment variables.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Never log or expose sensitive values
/// - Rotate the token secrets on security incidents, it logs every user out
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/happy_paws.db"
    #[envconfig(default = "sqlite:data/happy_paws.db")]
    pub db_host: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "3000")]
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: password used to derive the bearer token signing key (UUID format)
    pub token_pass: String,

    /// 🔒 SENSITIVE: salt used to derive the bearer token signing key (UUID format)
    pub token_salt: String,

    /// Days a bearer token stays valid (NON-SENSITIVE)
    #[envconfig(default = "15")]
    pub token_ttl_days: i64,

    /// Directory where uploaded images are written and served from (NON-SENSITIVE)
    #[envconfig(default = "uploads")]
    pub uploads_dir: String,

    /// IANA timezone used to decide what "today" is for bookings (NON-SENSITIVE)
    #[envconfig(default = "Asia/Manila")]
    pub business_timezone: String,

    /// Number of consecutive days offered for booking, starting today (NON-SENSITIVE)
    #[envconfig(default = "30")]
    pub booking_window_days: u32,

    /// Seconds between the welcome and the promotion notification (NON-SENSITIVE)
    #[envconfig(default = "3")]
    pub promotion_delay_secs: u64,

    /// Reject appointments whose prices or total disagree with the service catalog
    #[envconfig(default = "false")]
    pub enforce_price_list: bool,

    /// Reject appointments dated in the past, on a weekend or outside the booking window
    #[envconfig(default = "false")]
    pub enforce_booking_dates: bool,

    /// Only allow admin status changes listed in the transition table
    #[envconfig(default = "false")]
    pub enforce_status_transitions: bool,

    /// Minutes between appointment reminder sweeps (NON-SENSITIVE)
    #[envconfig(default = "60")]
    pub reminder_sweep_minutes: u64,

    /// 🔒 SENSITIVE: Logfire write token, logs go to stdout when missing
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Parses the configured business timezone
    pub fn timezone(&self) -> anyhow::Result<chrono_tz::Tz> {
        self.business_timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| anyhow::anyhow!("invalid BUSINESS_TIMEZONE: {e}"))
    }
}

/// Global application configuration instance
///
/// Only `main` reads it; handlers receive what they need through the app state.
/// If loading fails, the application panics with a descriptive error message.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});
