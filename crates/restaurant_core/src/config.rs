//! Process configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! ## Required
//! - `RESTAURANTS_DB_PATH` - SQLite file holding the `restaurants` table
//! - `LOCATION_PLACE_INDEX` - place index name used for geocoding
//! - `LOCATION_ENDPOINT` - base URL of the places API
//!
//! ## Optional
//! - `LOCATION_API_KEY` - API key appended to place-search requests
//! - `LOCATION_TIMEOUT_SECS` - place-search timeout (default: 10)
//! - `CORS_ALLOW_ORIGIN` - `Access-Control-Allow-Origin` value (default: `*`)
//! - `LOG_LEVEL` - trace|debug|info|warn|error (default: build-mode dependent)
//! - `LOG_DIR` - absolute directory for rolling log files (default: stderr)
//!
//! Read once at startup and passed into the handler; nothing here is global.

use crate::geocode::HttpPlaceSearchConfig;
use crate::logging::default_log_level;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ALLOW_ORIGIN: &str = "*";
const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;

/// Configuration loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingEnvVar(String),
    InvalidEnvVar(String, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => write!(f, "missing environment variable: {name}"),
            Self::InvalidEnvVar(name, reason) => {
                write!(f, "invalid environment variable {name}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Response headers attached to every handler response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "Access-Control-Allow-Origin".to_string(),
                self.allow_origin.clone(),
            ),
            (
                "Access-Control-Allow-Credentials".to_string(),
                self.allow_credentials.to_string(),
            ),
        ])
    }
}

/// Everything the shell needs to build a `RestaurantHandler`.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub db_path: PathBuf,
    pub place_index: String,
    pub location: HttpPlaceSearchConfig,
    pub cors: CorsConfig,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require =
            |name: &str| get(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let timeout_secs = match get("LOCATION_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|err| {
                ConfigError::InvalidEnvVar("LOCATION_TIMEOUT_SECS".to_string(), err.to_string())
            })?,
            None => DEFAULT_LOCATION_TIMEOUT_SECS,
        };

        let mut location = HttpPlaceSearchConfig::new(require("LOCATION_ENDPOINT")?)
            .with_timeout(Duration::from_secs(timeout_secs));
        if let Some(api_key) = get("LOCATION_API_KEY") {
            location = location.with_api_key(api_key);
        }

        let cors = CorsConfig {
            allow_origin: get("CORS_ALLOW_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOW_ORIGIN.to_string()),
            ..CorsConfig::default()
        };

        Ok(Self {
            db_path: PathBuf::from(require("RESTAURANTS_DB_PATH")?),
            place_index: require("LOCATION_PLACE_INDEX")?,
            location,
            cors,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string()),
            log_dir: get("LOG_DIR"),
        })
    }
}
