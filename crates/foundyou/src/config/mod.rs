use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::marketplace::search::{ListingMode, SimulatedLatency};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub marketplace: MarketplaceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            marketplace: MarketplaceConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the simulated marketplace backend.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub latency: SimulatedLatency,
    pub listing_mode: ListingMode,
    pub total_pages: u32,
    pub roster_csv: Option<PathBuf>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            latency: SimulatedLatency::default(),
            listing_mode: ListingMode::Passthrough,
            total_pages: DEFAULT_TOTAL_PAGES,
            roster_csv: None,
        }
    }
}

const DEFAULT_TOTAL_PAGES: u32 = 3;

impl MarketplaceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = SimulatedLatency::default();
        let latency = SimulatedLatency {
            search: millis_var("APP_SEARCH_LATENCY_MS", defaults.search)?,
            page_change: millis_var("APP_PAGE_LATENCY_MS", defaults.page_change)?,
            profile: millis_var("APP_PROFILE_LATENCY_MS", defaults.profile)?,
        };

        let listing_mode = match env::var("APP_LISTING_MODE") {
            Ok(raw) => ListingMode::parse(&raw).ok_or(ConfigError::InvalidListingMode(raw))?,
            Err(_) => ListingMode::Passthrough,
        };

        let total_pages = match env::var("APP_TOTAL_PAGES") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|pages| *pages > 0)
                .ok_or(ConfigError::InvalidNumber {
                    variable: "APP_TOTAL_PAGES",
                })?,
            Err(_) => DEFAULT_TOTAL_PAGES,
        };

        let roster_csv = env::var("APP_TALENT_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            latency,
            listing_mode,
            total_pages,
            roster_csv,
        })
    }
}

fn millis_var(variable: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidNumber { variable }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str },
    InvalidListingMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a non-negative integer")
            }
            ConfigError::InvalidListingMode(value) => write!(
                f,
                "APP_LISTING_MODE must be 'passthrough' or 'filtered' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidListingMode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for variable in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_SEARCH_LATENCY_MS",
            "APP_PAGE_LATENCY_MS",
            "APP_PROFILE_LATENCY_MS",
            "APP_LISTING_MODE",
            "APP_TOTAL_PAGES",
            "APP_TALENT_CSV",
        ] {
            env::remove_var(variable);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.marketplace.listing_mode, ListingMode::Passthrough);
        assert_eq!(config.marketplace.total_pages, 3);
        assert_eq!(
            config.marketplace.latency.search,
            Duration::from_millis(800)
        );
        assert_eq!(
            config.marketplace.latency.page_change,
            Duration::from_millis(500)
        );
        assert!(config.marketplace.roster_csv.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn marketplace_overrides_are_read() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LISTING_MODE", "Filtered");
        env::set_var("APP_SEARCH_LATENCY_MS", "0");
        env::set_var("APP_TOTAL_PAGES", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.marketplace.listing_mode, ListingMode::Filtered);
        assert_eq!(config.marketplace.latency.search, Duration::ZERO);
        assert_eq!(config.marketplace.total_pages, 5);
        reset_env();
    }

    #[test]
    fn rejects_unknown_listing_mode_and_zero_pages() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LISTING_MODE", "magic");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidListingMode(_))
        ));

        reset_env();
        env::set_var("APP_TOTAL_PAGES", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                variable: "APP_TOTAL_PAGES"
            })
        ));
        reset_env();
    }
}
