use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;
use survey_db::StoreConfig;

/// How the vote tally is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TallyStrategy {
    /// Fetch every stored slot value and count in the server process.
    #[default]
    Client,
    /// Let the database group and count.
    Server,
}

impl FromStr for TallyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            other => Err(format!("expected 'client' or 'server', got '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding the page's markdown files (default: `content`).
    pub content_dir: PathBuf,
    pub tally_strategy: TallyStrategy,
    /// Table store credentials, handed to the store at construction.
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `CONTENT_DIR`          | `content`                  |
    /// | `TALLY_STRATEGY`       | `client`                   |
    /// | `STORE_USER`           | required                   |
    /// | `STORE_PASSWORD`       | required                   |
    /// | `STORE_ACCOUNT`        | required                   |
    /// | `STORE_WAREHOUSE`      | empty                      |
    /// | `STORE_DATABASE`       | required                   |
    /// | `STORE_SCHEMA`         | `public`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.into());
        let required = |key: &'static str| {
            get(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let host = or_default("HOST", "0.0.0.0");

        let port: u16 = parse("PORT", &or_default("PORT", "3000"))?;

        let cors_origins: Vec<String> = or_default("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                key: "CORS_ORIGINS",
                reason: format!("'{origin}': {e}"),
            })?;
        }

        let request_timeout_secs: u64 =
            parse("REQUEST_TIMEOUT_SECS", &or_default("REQUEST_TIMEOUT_SECS", "30"))?;

        let content_dir = PathBuf::from(or_default("CONTENT_DIR", "content"));

        let tally_strategy: TallyStrategy =
            parse("TALLY_STRATEGY", &or_default("TALLY_STRATEGY", "client"))?;

        let store = StoreConfig {
            user: required("STORE_USER")?,
            password: required("STORE_PASSWORD")?,
            account: required("STORE_ACCOUNT")?,
            warehouse: or_default("STORE_WAREHOUSE", ""),
            database: required("STORE_DATABASE")?,
            schema: or_default("STORE_SCHEMA", "public"),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            content_dir,
            tally_strategy,
            store,
        })
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
