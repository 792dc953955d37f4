use std::net::SocketAddr;
use std::path::PathBuf;

use crate::matching::OrganReleasePolicy;

/// Application-level constants
pub const APP_NAME: &str = "LifeLink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8001";
const DEFAULT_LOG_FILTER: &str = "lifelink_lib=info,lifelink=info,tower_http=warn";

/// Get the application data directory (`~/LifeLink/`).
/// Falls back to the working directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default database location inside the data directory.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("lifelink.db")
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    std::env::var("LIFELINK_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Runtime configuration, read from `LIFELINK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub release_policy: OrganReleasePolicy,
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = lookup("LIFELINK_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let bind_raw = lookup("LIFELINK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e| ConfigError::Invalid {
            var: "LIFELINK_BIND_ADDR",
            reason: format!("'{bind_raw}': {e}"),
        })?;

        let release_policy = match lookup("LIFELINK_RELEASE_POLICY") {
            Some(raw) => raw.trim().parse().map_err(|e: crate::matching::MatchError| {
                ConfigError::Invalid {
                    var: "LIFELINK_RELEASE_POLICY",
                    reason: e.to_string(),
                }
            })?,
            None => OrganReleasePolicy::default(),
        };

        let cors_origins = match lookup("LIFELINK_CORS_ORIGINS") {
            None => None,
            Some(raw) if raw.trim() == "*" => None,
            Some(raw) => Some(
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            ),
        };

        Ok(Self {
            db_path,
            bind_addr,
            release_policy,
            cors_origins,
        })
    }
}
