//! Test helpers for creating hermetic filesystem test environments
//!
//! Available to unit tests and, through the `test-helpers` feature, to the
//! integration tests under `tests/`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use license_updater::test_helpers::TestProject;
//!
//! let project = TestProject::new().unwrap();
//! project.add_file("cmd/main.go", "package main\n").unwrap();
//! // Now run the updater against project.root()
//! ```

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A project tree inside a temporary directory, removed on drop
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Write a file relative to the project root, creating parent directories
    pub fn add_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.path(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;

        Ok(file_path)
    }

    /// Read a file relative to the project root; panics if it is missing
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path(relative_path))
            .unwrap_or_else(|e| panic!("failed to read {}: {}", relative_path, e))
    }

    /// Every non-directory entry under the root with its content, sorted by path
    pub fn snapshot(&self) -> Result<Vec<(PathBuf, Vec<u8>)>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(self.root()).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let content = fs::read(entry.path())?;
            files.push((entry.into_path(), content));
        }

        Ok(files)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }
}
