//! Environment marker (`env.js`)
//!
//! The marker is a script containing a `current: '<environment>'`
//! declaration. Parsing locates the span of the quoted value so a rewrite
//! touches nothing else in the file.

use regex_lite::Regex;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

use crate::environment::Environment;
use crate::fsutil::write_atomic;

/// Marker errors
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("environment marker not found: {0}")]
    NotFound(String),

    #[error("failed to access environment marker {path}: {message}")]
    Io { path: String, message: String },

    #[error("no `current: '...'` declaration found in {0}")]
    FieldNotFound(String),
}

// regex-lite's `\s` is ASCII-only; the class adds the Unicode spaces
const UNICODE_SPACE: &str =
    r"[\s\x{1c}-\x{1f}\x{85}\x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}]";

fn current_field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"current:{}*'([^']*)'", UNICODE_SPACE))
            .expect("valid marker pattern")
    })
}

/// Parsed marker file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentMarker {
    text: String,
    /// Byte range of the quoted value (without quotes)
    value: Range<usize>,
}

impl EnvironmentMarker {
    /// Parse marker text. `source` names the file in errors.
    ///
    /// When several declarations exist the first one is authoritative.
    pub fn parse(text: String, source: &str) -> Result<Self, MarkerError> {
        let value = current_field_re()
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.range())
            .ok_or_else(|| MarkerError::FieldNotFound(source.to_string()))?;

        Ok(Self { text, value })
    }

    /// Load and parse a marker file
    pub fn load(path: &Path) -> Result<Self, MarkerError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => MarkerError::NotFound(display.clone()),
            _ => MarkerError::Io {
                path: display.clone(),
                message: e.to_string(),
            },
        })?;
        Self::parse(text, &display)
    }

    /// The currently declared value, verbatim
    pub fn current(&self) -> &str {
        &self.text[self.value.clone()]
    }

    /// Replace the declared value with `env`
    pub fn set_current(&mut self, env: Environment) {
        let name = env.as_str();
        self.text.replace_range(self.value.clone(), name);
        self.value = self.value.start..self.value.start + name.len();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write the full text back to `path`
    pub fn save(&self, path: &Path) -> Result<(), MarkerError> {
        write_atomic(path, self.text.as_bytes()).map_err(|e| MarkerError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
