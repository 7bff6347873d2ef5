//! Test fixtures
//!
//! `tests/fixtures/project` holds a minimal extension project: marker
//! script, environment table and manifest. Each test works on its own copy.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the pristine project fixture
pub fn project_fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

/// A throwaway copy of the project fixture
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// Copy the fixture into a fresh temp directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for entry in fs::read_dir(project_fixture_path()).expect("Failed to read fixture") {
            let entry = entry.expect("Failed to read fixture entry");
            fs::copy(entry.path(), dir.path().join(entry.file_name()))
                .expect("Failed to copy fixture file");
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("Failed to read project file")
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(name)).expect("Failed to parse project JSON")
    }

    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.path(name), contents).expect("Failed to write project file");
    }

    /// Every file in the project with its exact bytes
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        fs::read_dir(self.root())
            .expect("Failed to list project")
            .map(|entry| {
                let entry = entry.expect("Failed to read project entry");
                (
                    entry.file_name().to_string_lossy().to_string(),
                    fs::read(entry.path()).expect("Failed to read project file"),
                )
            })
            .collect()
    }
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
