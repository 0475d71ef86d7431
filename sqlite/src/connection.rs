//! Connection string parsing.
//!
//! Two spellings are accepted:
//!
//! ```text
//! sqlite://todos.db?mode=rwc          URL form, handed to sqlx as-is
//! sqlite::memory:
//! Data Source=../todos.db             key/value form
//! Data Source=todos.db;Mode=ReadOnly
//! Data Source=:memory:
//! ```
//!
//! Key/value keys are case-insensitive and ignore inner spaces. Recognised
//! keys: `Data Source` (alias `Filename`), `Mode`, `Cache`.

use sqlx::sqlite::SqliteConnectOptions;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a connection string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionStringError {
    /// Nothing to parse.
    #[error("Connection string is empty")]
    Empty,

    /// A `key=value` segment had no `=`.
    #[error("Malformed connection string segment: '{0}'")]
    MalformedPair(String),

    /// A key this store does not understand.
    #[error("Unsupported connection string keyword: '{0}'")]
    UnknownKey(String),

    /// A recognised key with an unusable value.
    #[error("Invalid value '{value}' for connection string keyword '{key}'")]
    InvalidValue {
        /// Keyword as written
        key: String,
        /// Offending value
        value: String,
    },

    /// No `Data Source` was given, or it was blank.
    #[error("Connection string has no data source")]
    MissingDataSource,

    /// sqlx rejected a URL-form connection string.
    #[error("Invalid SQLite URL: {0}")]
    InvalidUrl(String),
}

/// How the database file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OpenMode {
    #[default]
    ReadWriteCreate,
    ReadWrite,
    ReadOnly,
    Memory,
}

impl FromStr for OpenMode {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "readwritecreate" => Ok(Self::ReadWriteCreate),
            "readwrite" => Ok(Self::ReadWrite),
            "readonly" => Ok(Self::ReadOnly),
            "memory" => Ok(Self::Memory),
            _ => Err(ConnectionStringError::InvalidValue {
                key: "Mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A parsed SQLite connection string.
///
/// Keeps the text it was parsed from so it can be logged verbatim.
#[derive(Debug, Clone)]
pub struct ConnectionString {
    raw: String,
    options: SqliteConnectOptions,
    in_memory: bool,
}

impl ConnectionString {
    /// Options to open connections with.
    #[must_use]
    pub const fn options(&self) -> &SqliteConnectOptions {
        &self.options
    }

    /// Whether the database lives only as long as its connections.
    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        self.in_memory
    }

    /// The connection string as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn parse_url(raw: &str) -> Result<Self, ConnectionStringError> {
        let options = SqliteConnectOptions::from_str(raw)
            .map_err(|e| ConnectionStringError::InvalidUrl(e.to_string()))?;
        let in_memory = raw.contains(":memory:") || raw.contains("mode=memory");

        Ok(Self {
            raw: raw.to_string(),
            options,
            in_memory,
        })
    }

    fn parse_key_value(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut data_source = None;
        let mut mode = OpenMode::default();
        let mut shared_cache = false;

        for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedPair(pair.to_string()))?;
            let key = key.trim();
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');

            match normalize_key(key).as_str() {
                "datasource" | "filename" => data_source = Some(value.to_string()),
                "mode" => mode = value.parse()?,
                "cache" => {
                    shared_cache = match value.to_ascii_lowercase().as_str() {
                        "shared" => true,
                        "private" | "default" => false,
                        _ => {
                            return Err(ConnectionStringError::InvalidValue {
                                key: key.to_string(),
                                value: value.to_string(),
                            });
                        }
                    };
                }
                _ => return Err(ConnectionStringError::UnknownKey(key.to_string())),
            }
        }

        let data_source = data_source
            .filter(|s| !s.is_empty())
            .ok_or(ConnectionStringError::MissingDataSource)?;

        if data_source == ":memory:" || mode == OpenMode::Memory {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| ConnectionStringError::InvalidUrl(e.to_string()))?;
            return Ok(Self {
                raw: raw.to_string(),
                options,
                in_memory: true,
            });
        }

        let options = SqliteConnectOptions::new()
            .filename(&data_source)
            .shared_cache(shared_cache);
        let options = match mode {
            OpenMode::ReadWriteCreate => options.create_if_missing(true),
            OpenMode::ReadWrite | OpenMode::Memory => options,
            OpenMode::ReadOnly => options.read_only(true),
        };

        Ok(Self {
            raw: raw.to_string(),
            options,
            in_memory: false,
        })
    }
}

/// `Data Source` → `datasource`
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase()
}

impl FromStr for ConnectionString {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ConnectionStringError::Empty);
        }

        if raw.starts_with("sqlite:") {
            Self::parse_url(raw)
        } else {
            Self::parse_key_value(raw)
        }
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
