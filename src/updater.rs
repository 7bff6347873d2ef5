//! Build configuration update
//!
//! Applies an environment to a project in three steps:
//! - Rewrite the marker's `current` value
//! - Overlay the environment's manifest fields onto the manifest
//! - Regenerate the version stamp from the manifest on disk
//!
//! Each step writes its file atomically, but the steps are not a
//! transaction: a failure in a later step leaves earlier files updated.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, Settings};
use crate::env_config::{EnvConfigError, EnvironmentConfig};
use crate::environment::Environment;
use crate::manifest::{ManifestDocument, ManifestError};
use crate::marker::{EnvironmentMarker, MarkerError};
use crate::version_info::{VersionInfo, VersionInfoError};

/// Update errors
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    EnvConfig(#[from] EnvConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    VersionInfo(#[from] VersionInfoError),
}

/// What a full run changed
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub environment: Environment,

    /// Marker value before the rewrite
    pub previous_environment: String,

    /// Manifest keys set from the environment config
    pub manifest_keys: Vec<String>,

    /// Version written to the stamp, if it was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Applies environments to one project
#[derive(Debug, Clone)]
pub struct ConfigUpdater {
    settings: Settings,
}

impl ConfigUpdater {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Point the marker at `env`, returning the previous value.
    ///
    /// A marker without a `current` declaration is an error and the file
    /// is left untouched.
    pub fn update_marker(&self, env: Environment) -> Result<String, UpdateError> {
        let path = &self.settings.paths.marker;
        debug!(path = %path.display(), "updating environment marker");

        let mut marker = EnvironmentMarker::load(path)?;
        let previous = marker.current().to_string();
        marker.set_current(env);
        marker.save(path)?;

        info!(from = %previous, to = %env, "environment marker updated");
        Ok(previous)
    }

    /// Overlay the environment's manifest fields and persist the manifest.
    ///
    /// Returns the keys that were set, in overlay order.
    pub fn update_manifest(&self, env: Environment) -> Result<Vec<String>, UpdateError> {
        let paths = &self.settings.paths;
        debug!(
            env_config = %paths.env_config.display(),
            manifest = %paths.manifest.display(),
            "updating manifest"
        );

        let env_config = EnvironmentConfig::load(&paths.env_config)?;
        let mut manifest = ManifestDocument::load(&paths.manifest)?;

        let overlay = env_config.manifest_overlay(env)?;
        manifest.overlay(overlay);
        manifest.save(&paths.manifest)?;

        let keys: Vec<String> = overlay.keys().cloned().collect();
        info!(keys = ?keys, version = manifest.version(), "manifest updated");
        Ok(keys)
    }

    /// Regenerate the version stamp from the manifest currently on disk
    pub fn generate_version_info(&self) -> Result<VersionInfo, UpdateError> {
        let paths = &self.settings.paths;
        debug!(path = %paths.version_info.display(), "generating version info");

        let manifest = ManifestDocument::load(&paths.manifest)?;
        let version_info = VersionInfo::today(manifest.version());
        version_info.write(&paths.version_info)?;

        info!(
            version = %version_info.version,
            date = %version_info.last_update,
            "version info generated"
        );
        Ok(version_info)
    }

    /// Run every step in order
    pub fn run(&self, env: Environment) -> Result<UpdateReport, UpdateError> {
        let previous_environment = self.update_marker(env)?;
        let manifest_keys = self.update_manifest(env)?;

        let version = if self.settings.version_info_enabled {
            Some(self.generate_version_info()?.version)
        } else {
            debug!("version info disabled, skipping");
            None
        };

        Ok(UpdateReport {
            environment: env,
            previous_environment,
            manifest_keys,
            version,
        })
    }
}
