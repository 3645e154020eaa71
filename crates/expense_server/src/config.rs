//! Environment-driven server settings.
//!
//! Variables:
//! - `DATABASE_URL`: `sqlite:///<path>` or `sqlite:///:memory:`.
//! - `CORS_ORIGINS`: comma-separated origin list.
//! - `EXPENSE_BIND_ADDR`: socket address to listen on.
//! - `EXPENSE_LOG_LEVEL`: `trace|debug|info|warn|error`.
//! - `EXPENSE_LOG_DIR`: rotating log directory; stderr when unset.

use config::{Config, Environment, Map};
use expense_core::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./app.db";
pub const DEFAULT_DATABASE_PATH: &str = "./app.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

const ENV_PREFIX: &str = "EXPENSE";
const SQLITE_SCHEME: &str = "sqlite://";
const MEMORY_PATH: &str = ":memory:";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    File(PathBuf),
    Memory,
}

impl Default for DatabaseTarget {
    fn default() -> Self {
        Self::File(PathBuf::from(DEFAULT_DATABASE_PATH))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    UnsupportedDatabaseUrl(String),
    InvalidCorsOrigin(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load settings: {err}"),
            Self::UnsupportedDatabaseUrl(url) => {
                write!(f, "unsupported DATABASE_URL `{url}`; expected sqlite:///<path>")
            }
            Self::InvalidCorsOrigin(value) => write!(f, "invalid CORS origin `{value}`"),
            Self::InvalidLogLevel(value) => write!(f, "invalid EXPENSE_LOG_LEVEL `{value}`"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    #[serde(skip)]
    pub database: DatabaseTarget,
    pub cors_origins: Vec<String>,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(None)
    }

    /// Loads settings from `vars` instead of the process environment when
    /// given. Empty values count as unset.
    pub fn from_source(vars: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let default_origins: Vec<String> = DEFAULT_CORS_ORIGINS
            .iter()
            .map(|origin| (*origin).to_string())
            .collect();

        let builder = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("cors_origins", default_origins)?
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("log_level", default_log_level())?
            // DATABASE_URL -> database_url
            .add_source(
                Environment::with_prefix("DATABASE")
                    .keep_prefix(true)
                    .ignore_empty(true)
                    .source(vars.clone()),
            )
            // CORS_ORIGINS -> cors_origins (comma separated)
            .add_source(
                Environment::with_prefix("CORS")
                    .keep_prefix(true)
                    .ignore_empty(true)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .source(vars.clone()),
            )
            // EXPENSE_BIND_ADDR -> bind_addr
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .ignore_empty(true)
                    .source(vars),
            );

        let mut settings: Self = builder.build()?.try_deserialize()?;
        settings.normalize()?;
        Ok(settings)
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        self.database = parse_database_url(self.database_url.trim())?;
        self.cors_origins = self
            .cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(ToString::to_string)
            .collect();
        self.log_level = parse_log_level(&self.log_level)?;
        self.log_dir = self
            .log_dir
            .take()
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty());
        Ok(())
    }
}

/// Maps a `sqlite://` URL to a store target.
///
/// `sqlite:///./app.db` is relative, `sqlite:////var/app.db` absolute.
pub fn parse_database_url(url: &str) -> Result<DatabaseTarget, ConfigError> {
    let unsupported = || ConfigError::UnsupportedDatabaseUrl(url.to_string());
    let rest = url.strip_prefix(SQLITE_SCHEME).ok_or_else(unsupported)?;
    let path = match rest.strip_prefix('/') {
        Some(path) => path,
        None if rest.is_empty() => return Ok(DatabaseTarget::Memory),
        None => return Err(unsupported()),
    };
    match path {
        "" | MEMORY_PATH => Ok(DatabaseTarget::Memory),
        path => Ok(DatabaseTarget::File(PathBuf::from(path))),
    }
}

fn parse_log_level(raw: &str) -> Result<String, ConfigError> {
    let level = raw.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(level),
        _ => Err(ConfigError::InvalidLogLevel(raw.to_string())),
    }
}
