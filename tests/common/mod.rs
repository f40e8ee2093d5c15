//! Test helpers for creating hermetic workspaces on disk.

#![allow(dead_code)]

use css_module_companion::{CompanionError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workspace builder backed by a temporary directory
///
/// The directory is removed when the project is dropped.
pub struct TestProject {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl TestProject {
    /// Create a new empty workspace
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()
            .map_err(|e| CompanionError::Internal(format!("Failed to create temp directory: {}", e)))?;
        let project_root = temp_dir.path().to_path_buf();

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a workspace containing `files`, each empty
    pub fn with_files(files: &[&str]) -> Result<Self> {
        let project = Self::new()?;
        for file in files {
            project.add_file(file, "")?;
        }
        Ok(project)
    }

    /// Add a file relative to the workspace root, creating parent
    /// directories as needed
    pub fn add_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.project_root.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, content)?;

        Ok(file_path)
    }

    pub fn read(&self, relative_path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path(relative_path))?)
    }

    pub fn root(&self) -> &Path {
        &self.project_root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.join(relative)
    }
}
