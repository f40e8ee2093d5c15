//! Filesystem-backed hosts rooted at a workspace directory.

use super::{Document, Storage, Workspace};
use crate::models::FilePath;
use crate::{CompanionError, Result};
use async_trait::async_trait;
use globset::Glob;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

/// Directories an editor leaves out of workspace searches by default.
const EXCLUDED_DIRS: &[&str] = &["node_modules"];

#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn native_path(&self, path: &FilePath) -> PathBuf {
        path.to_native(&self.root)
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn exists(&self, path: &FilePath) -> bool {
        tokio::fs::metadata(self.native_path(path)).await.is_ok()
    }

    async fn write(&self, path: &FilePath, contents: &[u8]) -> Result<()> {
        let native = self.native_path(path);
        if let Some(parent) = native.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&native, contents).await?;
        debug!("Wrote {} bytes to {}", contents.len(), native.display());
        Ok(())
    }

    async fn read_to_string(&self, path: &FilePath) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.native_path(path)).await?)
    }
}

#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_searchable(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    !name.starts_with('.') && !EXCLUDED_DIRS.contains(&name.as_ref())
}

fn walk_matching(root: &Path, pattern: &str, limit: usize) -> Result<Vec<FilePath>> {
    let matcher = Glob::new(pattern)?.compile_matcher();
    let mut found = Vec::new();
    if limit == 0 {
        return Ok(found);
    }

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_searchable)
    {
        // Unreadable directories are left out of the search
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable workspace entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = FilePath::from_native(root, entry.path());
        if matcher.is_match(path.as_str()) {
            found.push(path);
            if found.len() >= limit {
                break;
            }
        }
    }

    Ok(found)
}

#[async_trait]
impl Workspace for FsWorkspace {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<FilePath>> {
        let root = self.root.clone();
        let pattern = pattern.to_string();
        tokio::task::spawn_blocking(move || walk_matching(&root, &pattern, limit))
            .await
            .map_err(|e| CompanionError::Internal(format!("workspace scan aborted: {}", e)))?
    }
}

/// A file opened into an in-memory buffer. Edits stay in the buffer until
/// [`FileDocument::save`] is called.
#[derive(Debug)]
pub struct FileDocument {
    path: FilePath,
    text: RwLock<String>,
}

impl FileDocument {
    pub async fn open(storage: &dyn Storage, path: FilePath) -> Result<Self> {
        let text = storage.read_to_string(&path).await?;
        Ok(Self {
            path,
            text: RwLock::new(text),
        })
    }

    pub async fn save(&self, storage: &dyn Storage) -> Result<()> {
        let text = self.text.read().await;
        storage.write(&self.path, text.as_bytes()).await
    }
}

#[async_trait]
impl Document for FileDocument {
    fn path(&self) -> &FilePath {
        &self.path
    }

    async fn text(&self) -> String {
        self.text.read().await.clone()
    }

    async fn insert_at(&self, offset: usize, text: &str) -> Result<()> {
        let mut buffer = self.text.write().await;
        let byte_offset = super::memory::char_to_byte_offset(&buffer, offset).ok_or_else(|| {
            CompanionError::Edit(format!("offset {} is past the end of {}", offset, self.path))
        })?;
        buffer.insert_str(byte_offset, text);
        Ok(())
    }
}
