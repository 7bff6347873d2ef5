//! Deployment environments
//!
//! The set of environments is closed: a build is either `development` or
//! `production`. Anything else is rejected before any file is touched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target environment for a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// All valid environments, in display order
    pub const ALL: [Environment; 2] = [Environment::Development, Environment::Production];

    /// Name as it appears in the marker file and the environment config
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Parse an optional CLI argument, falling back to `development`
    pub fn from_arg(arg: Option<&str>) -> Result<Self, EnvironmentError> {
        match arg {
            Some(name) => name.parse(),
            None => Ok(Environment::default()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| EnvironmentError::Invalid(s.to_string()))
    }
}

/// Environment validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvironmentError {
    #[error("invalid environment \"{0}\", use development or production")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!("development".parse(), Ok(Environment::Development));
        assert_eq!("production".parse(), Ok(Environment::Production));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Production".parse::<Environment>().unwrap_err();
        assert_eq!(err, EnvironmentError::Invalid("Production".to_string()));
    }

    #[test]
    fn test_parse_invalid_carries_value() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert!(err.to_string().contains("\"staging\""));
        assert!(err.to_string().contains("development or production"));
    }

    #[test]
    fn test_empty_string_rejected() {
        assert!(Environment::from_arg(Some("")).is_err());
    }

    #[test]
    fn test_default_is_development() {
        assert_eq!(Environment::from_arg(None), Ok(Environment::Development));
    }

    #[test]
    fn test_display_round_trips_name() {
        for env in Environment::ALL {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }
}
