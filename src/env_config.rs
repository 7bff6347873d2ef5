//! Environment table (`env.json`)
//!
//! Maps each environment name to a settings bundle. The only part of a
//! bundle this tool consumes is its `manifest` object, which is overlaid
//! onto the extension manifest.

use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::environment::Environment;
use crate::json::json_kind;

/// Environment table errors
#[derive(Debug, Error)]
pub enum EnvConfigError {
    #[error("environment config not found: {0}")]
    NotFound(String),

    #[error("failed to read environment config {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse environment config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("environment \"{0}\" is not defined in the environment config")]
    UnknownEnvironment(String),

    #[error("environment \"{0}\" has no manifest section")]
    MissingManifestSection(String),
}

/// Parsed environment table
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    entries: Map<String, Value>,
}

impl EnvironmentConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, EnvConfigError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EnvConfigError::NotFound(display.clone()),
            _ => EnvConfigError::Io {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;

        Self::from_json(&json).map_err(|message| EnvConfigError::Parse {
            path: display,
            message,
        })
    }

    /// Parse from a JSON string; the top level must be an object
    pub fn from_json(json: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(json).map_err(|e| e.to_string())? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
        }
    }

    /// The `manifest` overlay for an environment
    pub fn manifest_overlay(&self, env: Environment) -> Result<&Map<String, Value>, EnvConfigError> {
        let bundle = self
            .entries
            .get(env.as_str())
            .ok_or_else(|| EnvConfigError::UnknownEnvironment(env.to_string()))?;

        bundle
            .get("manifest")
            .and_then(Value::as_object)
            .ok_or_else(|| EnvConfigError::MissingManifestSection(env.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> EnvironmentConfig {
        EnvironmentConfig::from_json(
            &json!({
                "development": {
                    "manifest": {"name": "Bookmarks (dev)"},
                    "server": "http://localhost:8080"
                },
                "production": {
                    "manifest": {"permissions": ["tabs"]}
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_manifest_overlay() {
        let config = sample();

        let dev = config.manifest_overlay(Environment::Development).unwrap();
        assert_eq!(dev["name"], "Bookmarks (dev)");
        assert_eq!(dev.len(), 1);

        let prod = config.manifest_overlay(Environment::Production).unwrap();
        assert_eq!(prod["permissions"], json!(["tabs"]));
    }

    #[test]
    fn test_unknown_environment() {
        let config = EnvironmentConfig::from_json(r#"{"development": {"manifest": {}}}"#).unwrap();

        let err = config.manifest_overlay(Environment::Production).unwrap_err();
        assert!(matches!(err, EnvConfigError::UnknownEnvironment(ref e) if e == "production"));
    }

    #[test]
    fn test_missing_manifest_section() {
        let config = EnvironmentConfig::from_json(r#"{"production": {"server": "x"}}"#).unwrap();

        let err = config.manifest_overlay(Environment::Production).unwrap_err();
        assert!(matches!(err, EnvConfigError::MissingManifestSection(_)));
    }

    #[test]
    fn test_manifest_section_must_be_object() {
        let config = EnvironmentConfig::from_json(r#"{"production": {"manifest": [1, 2]}}"#).unwrap();

        let err = config.manifest_overlay(Environment::Production).unwrap_err();
        assert!(matches!(err, EnvConfigError::MissingManifestSection(_)));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = EnvironmentConfig::from_json("[]").unwrap_err();
        assert!(err.contains("an array"));
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();

        let err = EnvironmentConfig::load(&dir.path().join("env.json")).unwrap_err();
        assert!(matches!(err, EnvConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("env.json");
        fs::write(&path, "{\"production\": ").unwrap();

        let err = EnvironmentConfig::load(&path).unwrap_err();
        assert!(matches!(err, EnvConfigError::Parse { .. }));
    }
}
