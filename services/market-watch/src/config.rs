//! Service configuration
//!
//! Every knob the pipeline needs, overridable through the environment
//! so tests can run with compressed intervals and local endpoints.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Default poll interval. Three pages per cycle means polling much
/// faster risks upstream rate limits.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;
/// Default number of snapshot pages fetched per cycle.
pub const DEFAULT_PAGES: u32 = 3;
/// Default listings per page.
pub const DEFAULT_PER_PAGE: u32 = 250;

#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Reference venue contract catalog endpoint.
    pub catalog_url: String,
    /// Ranked market snapshot endpoint (paginated).
    pub snapshot_url: String,
    /// Pages fetched per cycle.
    pub pages: u32,
    /// Listings per page.
    pub per_page: u32,
    /// Fixed poll cadence.
    pub poll_interval: Duration,
    /// Durable favorites blob location.
    pub favorites_path: PathBuf,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://fapi.binance.com/fapi/v1/exchangeInfo".to_string(),
            snapshot_url: "https://api.coingecko.com/api/v3/coins/markets".to_string(),
            pages: DEFAULT_PAGES,
            per_page: DEFAULT_PER_PAGE,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            favorites_path: PathBuf::from("favorites.json"),
        }
    }
}

impl WatchConfig {
    /// Build a config from `MARKET_WATCH_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_url: env_string("MARKET_WATCH_CATALOG_URL", defaults.catalog_url),
            snapshot_url: env_string("MARKET_WATCH_SNAPSHOT_URL", defaults.snapshot_url),
            pages: env_parsed("MARKET_WATCH_PAGES", defaults.pages),
            per_page: env_parsed("MARKET_WATCH_PER_PAGE", defaults.per_page),
            poll_interval: Duration::from_secs(env_parsed(
                "MARKET_WATCH_POLL_INTERVAL_SECS",
                defaults.poll_interval.as_secs(),
            )),
            favorites_path: PathBuf::from(env_string(
                "MARKET_WATCH_FAVORITES_PATH",
                defaults.favorites_path.display().to_string(),
            )),
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unparseable config value, using default");
            default
        }),
        Err(_) => default,
    }
}
