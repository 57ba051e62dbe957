use anyhow::{Context, Result};

const DEFAULT_STROKE_SERVICE_URL: &str = "http://localhost:3001";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Base URL of the stroke-counting service (no trailing slash needed).
    pub stroke_service_url: String,
    pub stroke_service_timeout_secs: u64,
    /// Seeds every random draw when set, for reproducible readings.
    pub fortune_seed: Option<u64>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            stroke_service_url: std::env::var("STROKE_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_STROKE_SERVICE_URL.to_string()),
            stroke_service_timeout_secs: std::env::var("STROKE_SERVICE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("STROKE_SERVICE_TIMEOUT_SECS must be a whole number of seconds")?,
            fortune_seed: std::env::var("FORTUNE_SEED")
                .ok()
                .map(|seed| seed.parse::<u64>())
                .transpose()
                .context("FORTUNE_SEED must be an unsigned integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
