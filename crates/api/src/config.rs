//! Application configuration loaded from environment variables.

use common::RetailerId;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default `"0.0.0.0"`)
/// - `PORT`: listen port (default `3000`)
/// - `RUST_LOG`: tracing filter directive (default `"info"`)
/// - `SEED_RETAILER_IDS`: comma-separated retailer ids known at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub seed_retailer_ids: Vec<RetailerId>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_retailer_ids: std::env::var("SEED_RETAILER_IDS")
                .map(|raw| parse_retailer_ids(&raw))
                .unwrap_or_default(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            seed_retailer_ids: Vec::new(),
        }
    }
}

/// Parses a comma-separated id list. Malformed entries are skipped.
pub fn parse_retailer_ids(raw: &str) -> Vec<RetailerId> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(entry, error = %err, "ignoring malformed retailer id");
                None
            }
        })
        .collect()
}
