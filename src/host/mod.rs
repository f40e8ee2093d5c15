//! Host capabilities the companion depends on.
//!
//! The editor (or the CLI) owns the filesystem, the open documents, the
//! views and the user. The engine only talks to them through these traits,
//! so every flow can run against the in-memory hosts in [`memory`].

pub mod fs;
pub mod memory;

use crate::models::{FilePath, ViewId, ViewSlot};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// File existence checks, reads and writes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Whether anything can be stat'ed at `path`. A failed stat is simply
    /// `false`.
    async fn exists(&self, path: &FilePath) -> bool;

    async fn write(&self, path: &FilePath, contents: &[u8]) -> Result<()>;

    async fn read_to_string(&self, path: &FilePath) -> Result<String>;
}

/// Workspace-wide file enumeration.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Up to `limit` files matching `pattern` (a glob such as `**/*.scss`).
    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<FilePath>>;
}

/// One entry of a quick pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
    pub picked: bool,
}

impl PickItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            picked: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn preselected(mut self) -> Self {
        self.picked = true;
        self
    }
}

/// Modal choice presented to the user.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Index of the chosen item, or `None` when the user dismissed the
    /// prompt.
    async fn pick(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<usize>>;
}

/// An open text document.
#[async_trait]
pub trait Document: Send + Sync {
    fn path(&self) -> &FilePath;

    async fn text(&self) -> String;

    /// Insert `text` at character `offset`. Either the whole insertion is
    /// applied or nothing is.
    async fn insert_at(&self, offset: usize, text: &str) -> Result<()>;
}

/// Editor views.
#[async_trait]
pub trait Display: Send + Sync {
    /// The document with focus, if any.
    async fn active_document(&self) -> Option<Arc<dyn Document>>;

    /// The view currently showing `path`, if any.
    async fn find_visible(&self, path: &FilePath) -> Option<ViewId>;

    async fn show(&self, path: &FilePath, slot: ViewSlot) -> Result<()>;
}
