//! Build configuration for a browser extension project
//!
//! Switches a project between its `development` and `production` builds by
//! rewriting the environment marker script, overlaying environment fields
//! onto the extension manifest and regenerating the version stamp.

pub mod config;
pub mod env_config;
pub mod environment;
pub mod fsutil;
pub mod json;
pub mod manifest;
pub mod marker;
pub mod updater;
pub mod version_info;

pub use config::{ConfigError, Settings, SettingsOverrides};
pub use env_config::{EnvConfigError, EnvironmentConfig};
pub use environment::{Environment, EnvironmentError};
pub use manifest::{ManifestDocument, ManifestError, DEFAULT_VERSION};
pub use marker::{EnvironmentMarker, MarkerError};
pub use updater::{ConfigUpdater, UpdateError, UpdateReport};
pub use version_info::{VersionInfo, VersionInfoError};
