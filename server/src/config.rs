//! Configuration management for the Todo API server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Nothing outside this module reads the environment.

use std::env;
use thiserror::Error;
use todo_api_sqlite::{ConnectionString, ConnectionStringError};
use todo_api_web::{Environment, UnknownEnvironment};

/// Environment variable holding the named `TodoDb` connection string.
pub const CONNECTION_STRING_VAR: &str = "CONNECTIONSTRINGS__TODODB";

/// Connection string used when none is configured.
pub const DEFAULT_CONNECTION_STRING: &str = "Data Source=../todos.db";

/// Configuration errors, reported once at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The connection string could not be parsed.
    #[error("Invalid {CONNECTION_STRING_VAR}: {0}")]
    ConnectionString(#[from] ConnectionStringError),

    /// `APP_ENVIRONMENT` names no known environment.
    #[error("Invalid APP_ENVIRONMENT: {0}")]
    Environment(#[from] UnknownEnvironment),

    /// A numeric variable did not parse.
    #[error("Invalid {key}: {value:?}")]
    InvalidNumber {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store configuration
    pub database: DatabaseConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Hosting environment; controls 500 detail exposure
    pub environment: Environment,
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Parsed connection string
    pub connection: ConnectionString,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` bind address.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid. Unset
    /// variables fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection = lookup(CONNECTION_STRING_VAR)
            .unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string())
            .parse()?;

        let environment = match lookup("APP_ENVIRONMENT") {
            Some(name) => name.parse()?,
            None => Environment::default(),
        };

        Ok(Self {
            database: DatabaseConfig {
                connection,
                max_connections: number(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: number(&lookup, "PORT", 5000)?,
            },
            environment,
        })
    }
}

fn number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
