use vibevote_core::appeal::{AppealConfig, DEFAULT_PARTICIPATION_THRESHOLD};

use crate::auth::jwt::JwtConfig;

/// Default number of movies returned by the movie list.
pub const DEFAULT_MOVIE_LIMIT: i64 = 25;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Appeal scoring parameters.
    pub appeal: AppealConfig,
    /// Default page size for `GET /movies` (default: `25`).
    pub movie_limit: i64,
    /// Admin account created at startup when missing.
    pub admin: AdminBootstrapConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Credentials for the single shared admin account.
#[derive(Debug, Clone)]
pub struct AdminBootstrapConfig {
    pub username: String,
    /// When unset, no account is created and login stays impossible until
    /// one is inserted by hand.
    pub password: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `PARTICIPATION_THRESHOLD` | `3`                     |
    /// | `MOVIE_LIMIT`             | `25`                    |
    /// | `ADMIN_USERNAME`          | `admin`                 |
    /// | `ADMIN_PASSWORD`          | unset                   |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let participation_threshold: i64 = std::env::var("PARTICIPATION_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_PARTICIPATION_THRESHOLD.to_string())
            .parse()
            .expect("PARTICIPATION_THRESHOLD must be a valid i64");
        let appeal = AppealConfig::new(participation_threshold)
            .expect("PARTICIPATION_THRESHOLD must not be negative");

        let movie_limit: i64 = std::env::var("MOVIE_LIMIT")
            .unwrap_or_else(|_| DEFAULT_MOVIE_LIMIT.to_string())
            .parse()
            .expect("MOVIE_LIMIT must be a valid i64");
        assert!(movie_limit > 0, "MOVIE_LIMIT must be positive");

        let admin = AdminBootstrapConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            appeal,
            movie_limit,
            admin,
            jwt,
        }
    }
}
