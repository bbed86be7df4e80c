//! Runtime configuration read from the environment (and `.env` when present).
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://taskboard.db?mode=rwc` |
//! | `BIND_ADDRESS` | `0.0.0.0:3000` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |

use sea_orm::ConnectOptions;
use std::fmt;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub max_connections: u32,
}

/// A variable was set to a value that does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Load `.env` if there is one, then read the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind_address = parse_var(&lookup, "BIND_ADDRESS")?
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDRESS));

        let max_connections =
            parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            database_url,
            bind_address,
            max_connections,
        })
    }

    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.database_url.clone());
        options
            .max_connections(self.max_connections)
            .sqlx_logging(false);
        options
    }
}

fn parse_var<F, T>(lookup: &F, variable: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(variable) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { variable, value }),
    }
}
