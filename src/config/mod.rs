use once_cell::sync::Lazy;
use std::env;

/// Process configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub shutdown_grace_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Allow tests and deployments to override the port via env
        let port = env::var("PETSTORE_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://petstore.db".to_string());

        let jwt_secret = env::var("SIGN_KEY").unwrap_or_else(|_| {
            tracing::warn!("SIGN_KEY not set, falling back to the development signing key");
            "petstore-dev-sign-key".to_string()
        });

        let jwt_expiry_hours = env::var("PETSTORE_JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let shutdown_grace_secs = env::var("PETSTORE_SHUTDOWN_GRACE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Self {
            bind_addr: format!("0.0.0.0:{port}"),
            database_url,
            jwt_secret,
            jwt_expiry_hours,
            shutdown_grace_secs,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
