//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use vinculo_infra::{GeminiConfig, JwtConfig};

#[cfg(feature = "rate-limit")]
use vinculo_infra::RateLimitConfig;

/// Content store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtConfig,
    pub gemini: GeminiConfig,
    #[cfg(feature = "rate-limit")]
    pub generate_rate_limit: RateLimitConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseSettings {
                url,
                max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(2),
                connect_timeout: Duration::from_secs(
                    parsed("DB_CONNECT_TIMEOUT_SECS").unwrap_or(10),
                ),
            });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            gemini: GeminiConfig::from_env(),
            #[cfg(feature = "rate-limit")]
            generate_rate_limit: RateLimitConfig::from_env(),
        }
    }
}
