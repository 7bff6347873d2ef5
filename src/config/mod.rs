//! Layered settings
//!
//! Each setting is taken from the first layer that defines it:
//! 1. CLI flags
//! 2. Project config (build.toml)
//! 3. Built-in defaults

mod defaults;
mod settings;

pub use defaults::BuiltinDefaults;
pub use settings::{
    ArtifactPaths, ConfigError, ProjectConfig, ProjectPaths, Settings, SettingsOverrides,
    VersionInfoSection, PROJECT_CONFIG_FILE,
};
