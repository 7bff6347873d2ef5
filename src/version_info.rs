//! Generated version stamp (`version.js`)

use chrono::{Local, NaiveDate};
use std::path::Path;
use thiserror::Error;

use crate::fsutil::write_atomic;

/// Version stamp errors
#[derive(Debug, Error)]
pub enum VersionInfoError {
    #[error("failed to write version info {path}: {message}")]
    Io { path: String, message: String },
}

/// Version and date embedded in the generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub last_update: NaiveDate,
}

impl VersionInfo {
    /// Stamp `version` with today's local date
    pub fn today(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            last_update: Local::now().date_naive(),
        }
    }

    /// Render the generated script
    pub fn render(&self) -> String {
        format!(
            "// This file is auto-generated by the build script. Do not edit it manually.\n\
             const VERSION_INFO = {{\n    \
             version: '{}',\n    \
             lastUpdate: '{}'\n\
             }};\n",
            escape_single_quoted(&self.version),
            self.last_update.format("%Y-%m-%d"),
        )
    }

    /// Overwrite `path` with the rendered script
    pub fn write(&self, path: &Path) -> Result<(), VersionInfoError> {
        write_atomic(path, self.render().as_bytes()).map_err(|e| VersionInfoError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Escape a value for a single-quoted JS string literal
fn escape_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
