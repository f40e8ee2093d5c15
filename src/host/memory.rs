//! In-process hosts.
//!
//! Deterministic implementations of every capability, used by the test
//! suite and by embedders that keep their own buffers.

use super::{Display, Document, PickItem, Prompt, Storage, Workspace};
use crate::models::{FilePath, ViewId, ViewSlot};
use crate::{CompanionError, Result};
use async_trait::async_trait;
use globset::Glob;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// File store keyed by logical path. Also serves as the workspace index.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<FilePath, Vec<u8>>>,
    stat_delays: HashMap<FilePath, Duration>,
    read_only: bool,
    writes: AtomicUsize,
    stats: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FilePath>,
    {
        let files = paths
            .into_iter()
            .map(|path| (path.into(), Vec::new()))
            .collect();
        Self {
            files: RwLock::new(files),
            ..Self::default()
        }
    }

    /// Delay the stat of `path`, to make completion order differ from
    /// request order.
    pub fn with_stat_delay(mut self, path: impl Into<FilePath>, delay: Duration) -> Self {
        self.stat_delays.insert(path.into(), delay);
        self
    }

    /// Reject every write, like a read-only mount.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub async fn contents(&self, path: &FilePath) -> Option<Vec<u8>> {
        self.files.read().await.get(path).cloned()
    }

    pub async fn paths(&self) -> Vec<FilePath> {
        self.files.read().await.keys().cloned().collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn stat_count(&self) -> usize {
        self.stats.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn exists(&self, path: &FilePath) -> bool {
        self.stats.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.stat_delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        self.files.read().await.contains_key(path)
    }

    async fn write(&self, path: &FilePath, contents: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(CompanionError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path),
            )));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.files
            .write()
            .await
            .insert(path.clone(), contents.to_vec());
        Ok(())
    }

    async fn read_to_string(&self, path: &FilePath) -> Result<String> {
        let files = self.files.read().await;
        let bytes = files
            .get(path)
            .ok_or_else(|| CompanionError::NotFound(path.to_string()))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| CompanionError::Internal(format!("{} is not UTF-8: {}", path, e)))
    }
}

#[async_trait]
impl Workspace for MemoryStorage {
    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<FilePath>> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        Ok(self
            .files
            .read()
            .await
            .keys()
            .filter(|path| matcher.is_match(path.as_str()))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Text buffer that is never persisted.
#[derive(Debug)]
pub struct MemoryDocument {
    path: FilePath,
    text: RwLock<String>,
    edits: AtomicUsize,
}

impl MemoryDocument {
    pub fn new(path: impl Into<FilePath>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: RwLock::new(text.into()),
            edits: AtomicUsize::new(0),
        }
    }

    pub fn edit_count(&self) -> usize {
        self.edits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Document for MemoryDocument {
    fn path(&self) -> &FilePath {
        &self.path
    }

    async fn text(&self) -> String {
        self.text.read().await.clone()
    }

    async fn insert_at(&self, offset: usize, text: &str) -> Result<()> {
        let mut buffer = self.text.write().await;
        let byte_offset = char_to_byte_offset(&buffer, offset).ok_or_else(|| {
            CompanionError::Edit(format!("offset {} is past the end of {}", offset, self.path))
        })?;
        buffer.insert_str(byte_offset, text);
        self.edits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) fn char_to_byte_offset(text: &str, offset: usize) -> Option<usize> {
    if offset == text.chars().count() {
        return Some(text.len());
    }
    text.char_indices().nth(offset).map(|(idx, _)| idx)
}

/// Prompt that replays canned answers. Once the script runs out every
/// further prompt is dismissed.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<usize>>>,
    calls: Mutex<Vec<(String, Vec<PickItem>)>>,
    broken: bool,
}

impl ScriptedPrompt {
    pub fn answering<I>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<usize>>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
            broken: false,
        }
    }

    pub fn dismissing() -> Self {
        Self::default()
    }

    /// A prompt that cannot be shown at all.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Every prompt shown so far, as `(placeholder, items)`.
    pub async fn calls(&self) -> Vec<(String, Vec<PickItem>)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Prompt for ScriptedPrompt {
    async fn pick(&self, placeholder: &str, items: &[PickItem]) -> Result<Option<usize>> {
        self.calls
            .lock()
            .await
            .push((placeholder.to_string(), items.to_vec()));
        if self.broken {
            return Err(CompanionError::Prompt("no user to ask".to_string()));
        }
        let answer = self.answers.lock().await.pop_front().flatten();
        Ok(answer.filter(|idx| *idx < items.len()))
    }
}

/// Display that remembers what it was asked to show.
#[derive(Default)]
pub struct RecordingDisplay {
    active: RwLock<Option<Arc<dyn Document>>>,
    visible: RwLock<HashMap<FilePath, ViewId>>,
    shown: Mutex<Vec<(FilePath, ViewSlot)>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(document: Arc<dyn Document>) -> Self {
        Self {
            active: RwLock::new(Some(document)),
            ..Self::default()
        }
    }

    pub async fn set_active(&self, document: Option<Arc<dyn Document>>) {
        *self.active.write().await = document;
    }

    pub async fn set_visible(&self, path: impl Into<FilePath>, view: ViewId) {
        self.visible.write().await.insert(path.into(), view);
    }

    pub async fn shown(&self) -> Vec<(FilePath, ViewSlot)> {
        self.shown.lock().await.clone()
    }
}

#[async_trait]
impl Display for RecordingDisplay {
    async fn active_document(&self) -> Option<Arc<dyn Document>> {
        self.active.read().await.clone()
    }

    async fn find_visible(&self, path: &FilePath) -> Option<ViewId> {
        self.visible.read().await.get(path).copied()
    }

    async fn show(&self, path: &FilePath, slot: ViewSlot) -> Result<()> {
        self.shown.lock().await.push((path.clone(), slot));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_storage_write_then_exists() {
        let storage = MemoryStorage::new();
        let path = FilePath::new("src/App.module.css");
        assert!(!storage.exists(&path).await);

        storage.write(&path, b"").await.unwrap();

        assert!(storage.exists(&path).await);
        assert_eq!(storage.contents(&path).await, Some(Vec::new()));
        assert_eq!(storage.write_count(), 1);
    }

    #[tokio::test]
    async fn test_read_only_storage_rejects_writes() {
        let storage = MemoryStorage::new().read_only();
        let result = storage.write(&FilePath::new("a.css"), b"").await;
        assert!(matches!(result, Err(CompanionError::Io(_))));
        assert_eq!(storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_find_files_respects_limit() {
        let storage = MemoryStorage::with_files(["a/x.scss", "b/y.scss", "c/z.less"]);
        let found = storage.find_files("**/*.scss", 1).await.unwrap();
        assert_eq!(found, vec![FilePath::new("a/x.scss")]);
        let found = storage.find_files("**/*.less", 10).await.unwrap();
        assert_eq!(found, vec![FilePath::new("c/z.less")]);
    }

    #[tokio::test]
    async fn test_document_insert_uses_char_offsets() {
        let doc = MemoryDocument::new("a.tsx", "héllo");
        doc.insert_at(2, "-").await.unwrap();
        assert_eq!(doc.text().await, "hé-llo");
        doc.insert_at(6, "!").await.unwrap();
        assert_eq!(doc.text().await, "hé-llo!");
    }

    #[tokio::test]
    async fn test_document_insert_past_end_is_rejected() {
        let doc = MemoryDocument::new("a.tsx", "abc");
        let result = doc.insert_at(4, "x").await;
        assert!(matches!(result, Err(CompanionError::Edit(_))));
        assert_eq!(doc.text().await, "abc");
        assert_eq!(doc.edit_count(), 0);
    }

    #[tokio::test]
    async fn test_scripted_prompt_dismisses_when_exhausted() {
        let prompt = ScriptedPrompt::answering([Some(1)]);
        let items = [PickItem::new("Yes"), PickItem::new("No")];
        assert_eq!(prompt.pick("?", &items).await.unwrap(), Some(1));
        assert_eq!(prompt.pick("?", &items).await.unwrap(), None);
        assert_eq!(prompt.calls().await.len(), 2);
    }
}
