//! Hosting environment.
//!
//! The environment only changes how much of a server error reaches the
//! caller. The HTTP contract is the same in both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where the service is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    /// Local development: 500 responses carry the underlying error text.
    Development,
    /// Anything else: 500 responses carry a generic detail.
    #[default]
    Production,
}

impl Environment {
    /// Returns `true` for [`Environment::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// An environment name that is neither development nor production.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown environment '{0}' (expected Development or Production)")]
pub struct UnknownEnvironment(pub String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("Development"),
            Self::Production => f.write_str("Production"),
        }
    }
}
