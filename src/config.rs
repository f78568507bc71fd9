use std::env;

/// Sync period matching the upstream feed's refresh cadence.
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub feed_base_url: String,
    pub sync_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let feed_base_url =
            env::var("FEED_BASE_URL").unwrap_or_else(|_| "https://fakestoreapi.com".to_string());
        let sync_interval_secs = env::var("SYNC_INTERVAL_SECS")
            .ok()
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SYNC_INTERVAL_SECS);
        Ok(Self {
            database_url,
            host,
            port,
            feed_base_url,
            sync_interval_secs,
        })
    }
}
