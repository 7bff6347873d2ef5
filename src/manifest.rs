//! Extension manifest (`manifest.json`)
//!
//! The manifest is kept as an ordered JSON object so that rewriting it
//! preserves key order and every field this tool does not know about.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::fsutil::write_atomic;
use crate::json::json_kind;

/// Version reported when the manifest has no usable `version` field
pub const DEFAULT_VERSION: &str = "1.0.0";

const INDENT: &[u8] = b"    ";

/// Manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    NotFound(String),

    #[error("failed to access manifest {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse manifest {path}: {message}")]
    Parse { path: String, message: String },

    #[error("manifest must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("manifest serialized to invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extension manifest document
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    fields: Map<String, Value>,
}

impl ManifestDocument {
    /// Load from file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let display = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ManifestError::NotFound(display.clone()),
            _ => ManifestError::Io {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;

        let value: Value = serde_json::from_str(&json).map_err(|e| ManifestError::Parse {
            path: display,
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Wrap a parsed JSON value; only objects are accepted
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ManifestError::NotAnObject(json_kind(&other))),
        }
    }

    /// Shallow overlay: every overlay key replaces or extends the manifest.
    ///
    /// Replaced keys keep their position; new keys are appended in overlay
    /// order. Nested objects are replaced wholesale, not merged.
    pub fn overlay(&mut self, updates: &Map<String, Value>) {
        for (key, value) in updates {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// The manifest `version`, or [`DEFAULT_VERSION`] when absent or not a string
    pub fn version(&self) -> &str {
        self.fields
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_VERSION)
    }

    /// Pretty-print with four-space indentation; non-ASCII stays literal
    pub fn to_json(&self) -> Result<String, ManifestError> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.fields.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Write the full document back to `path`
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let json = self.to_json()?;
        write_atomic(path, json.as_bytes()).map_err(|e| ManifestError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
