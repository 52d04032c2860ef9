//! Configuration module
//!
//! Environment-driven application configuration with sensible defaults.
//! `Config::from_env` is the single entry point; the binary loads `.env`
//! via dotenvy before calling it.

use std::env;
use std::time::Duration;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// TTL backstop for staged uploads that were never explicitly cleaned up.
const DEFAULT_STAGE_TTL_SECS: u64 = 3600;
/// Expiry for the read-through analysis record cache.
const DEFAULT_RECORD_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_MAX_CONTRACT_SIZE_MB: usize = 10;

/// Application configuration, loaded once at startup and shared through AppState.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub stage_ttl_secs: u64,
    pub record_cache_ttl_secs: u64,
    pub max_contract_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS")
            .or_else(|_| env::var("CLIENT_URL"))
            .unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_contract_size_mb = env::var("MAX_CONTRACT_SIZE_MB")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_CONTRACT_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_DB_TIMEOUT_SECS),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRY_HOURS),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable is required"))?,
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            stage_ttl_secs: env::var("STAGE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_STAGE_TTL_SECS),
            record_cache_ttl_secs: env::var("RECORD_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RECORD_CACHE_TTL_SECS),
            max_contract_size_bytes: max_contract_size_mb * 1024 * 1024,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production" || self.environment == "prod"
    }

    pub fn stage_ttl(&self) -> Duration {
        Duration::from_secs(self.stage_ttl_secs)
    }

    pub fn record_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.record_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8080,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            database_url: "postgresql://localhost/pactscan_test".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 5,
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_hours: 24,
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-pro".to_string(),
            stage_ttl_secs: 3600,
            record_cache_ttl_secs: 3600,
            max_contract_size_bytes: 10 * 1024 * 1024,
        }
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_ttl_durations() {
        let config = test_config();
        assert_eq!(config.stage_ttl(), Duration::from_secs(3600));
        assert_eq!(config.record_cache_ttl(), Duration::from_secs(3600));
    }
}
