//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blogicum_core::services::DEFAULT_PAGE_SIZE;
use blogicum_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Posts per feed page.
    pub page_size: u64,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    /// Accounts granted administrator rights when they register or log in.
    pub admin_usernames: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_or("DB_MIN_CONNECTIONS", defaults.min_connections),
                ..defaults
            }
        });

        let page_size = match parse_or("PAGE_SIZE", DEFAULT_PAGE_SIZE) {
            0 => {
                tracing::warn!("PAGE_SIZE must be positive, using {}", DEFAULT_PAGE_SIZE);
                DEFAULT_PAGE_SIZE
            }
            size => size,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            page_size,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            admin_usernames: env::var("ADMIN_USERNAMES")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when it is
/// unset or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
