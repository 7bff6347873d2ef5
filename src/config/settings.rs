//! Resolved settings
//!
//! Built from the built-in defaults, the optional project `build.toml`
//! and CLI overrides. Each field comes from the highest layer that sets it.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::BuiltinDefaults;

/// Project settings file name, looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "build.toml";

/// Contents of `build.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub paths: ProjectPaths,
    pub version_info: VersionInfoSection,
}

/// `[paths]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectPaths {
    pub env_config: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub marker: Option<PathBuf>,
    pub version_info: Option<PathBuf>,
}

/// `[version_info]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionInfoSection {
    pub enabled: Option<bool>,
}

impl ProjectConfig {
    /// Load and parse a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        // toml errors span several lines; fold them onto one
        toml::from_str(&contents).map_err(|e: toml::de::Error| {
            let message = e.message().split_whitespace().collect::<Vec<_>>().join(" ");
            ConfigError::ParseError(format!(
                "TOML parse error in {}: {}",
                path.display(),
                message
            ))
        })
    }
}

/// Overrides collected from command-line flags
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub env_config: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub marker: Option<PathBuf>,
    pub version_info: Option<PathBuf>,
    pub version_info_enabled: Option<bool>,
}

/// Locations of the artifacts a build touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub env_config: PathBuf,
    pub manifest: PathBuf,
    pub marker: PathBuf,
    pub version_info: PathBuf,
}

/// Merged settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Artifact locations, already joined onto the project root
    pub paths: ArtifactPaths,

    /// Whether to regenerate the version stamp
    pub version_info_enabled: bool,
}

impl Settings {
    /// Build settings for a project.
    ///
    /// `config_path` names an explicit settings file, which must exist. When
    /// it is `None`, `<project_root>/build.toml` is used if present.
    pub fn load(
        project_root: &Path,
        config_path: Option<&Path>,
        overrides: &SettingsOverrides,
    ) -> Result<Self, ConfigError> {
        let project_file = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::IoError(format!(
                        "settings file not found: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => {
                let default_path = project_root.join(PROJECT_CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        let project = match project_file {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading project settings");
                ProjectConfig::load(&path)?
            }
            None => ProjectConfig::default(),
        };

        Self::resolve(project_root, project, overrides)
    }

    /// Layer CLI overrides over the project config over the defaults
    pub fn resolve(
        project_root: &Path,
        project: ProjectConfig,
        overrides: &SettingsOverrides,
    ) -> Result<Self, ConfigError> {
        let defaults = BuiltinDefaults::default();
        let paths = ArtifactPaths {
            env_config: resolve_path(
                project_root,
                "env_config",
                overrides.env_config.clone().or(project.paths.env_config),
                defaults.env_config,
            )?,
            manifest: resolve_path(
                project_root,
                "manifest",
                overrides.manifest.clone().or(project.paths.manifest),
                defaults.manifest,
            )?,
            marker: resolve_path(
                project_root,
                "marker",
                overrides.marker.clone().or(project.paths.marker),
                defaults.marker,
            )?,
            version_info: resolve_path(
                project_root,
                "version_info",
                overrides.version_info.clone().or(project.paths.version_info),
                defaults.version_info,
            )?,
        };

        let version_info_enabled = overrides
            .version_info_enabled
            .or(project.version_info.enabled)
            .unwrap_or(defaults.version_info_enabled);

        Ok(Self {
            paths,
            version_info_enabled,
        })
    }
}

/// Join the chosen path onto the project root, falling back to `default`
fn resolve_path(
    project_root: &Path,
    key: &str,
    chosen: Option<PathBuf>,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    let path = chosen.unwrap_or_else(|| PathBuf::from(default));
    if path.to_string_lossy().trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "paths.{} must not be empty",
            key
        )));
    }
    Ok(project_root.join(path))
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
