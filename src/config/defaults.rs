//! Built-in defaults (layer 1)
//!
//! File locations used when neither `build.toml` nor the CLI override them.

/// Built-in default settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinDefaults {
    /// Environment table (default: "env.json")
    pub env_config: &'static str,

    /// Extension manifest (default: "manifest.json")
    pub manifest: &'static str,

    /// Environment marker script (default: "env.js")
    pub marker: &'static str,

    /// Generated version stamp (default: "version.js")
    pub version_info: &'static str,

    /// Generate the version stamp (default: true)
    pub version_info_enabled: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            env_config: "env.json",
            manifest: "manifest.json",
            marker: "env.js",
            version_info: "version.js",
            version_info_enabled: true,
        }
    }
}
