//! In-memory document store for tests and embedding.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{is_markdown, DocumentHandle, DocumentStore};
use crate::error::AppError;

/// Document store backed by concurrent maps.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<String, String>,
    folders: DashSet<String>,
    /// Successful `write_text`/`create_text` calls
    writes: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document directly, bypassing the write counter.
    pub fn insert(&self, path: impl Into<String>, text: impl Into<String>) {
        let path = path.into();
        self.add_parent_folders(&path);
        self.documents.insert(path, text.into());
    }

    /// Current contents of a document.
    pub fn get(&self, path: &str) -> Option<String> {
        self.documents.get(path).map(|doc| doc.value().clone())
    }

    /// Number of writes performed through the [`DocumentStore`] interface.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn add_parent_folders(&self, path: &str) {
        let mut parent = path;
        while let Some((dir, _)) = parent.rsplit_once('/') {
            if dir.is_empty() {
                break;
            }
            self.folders.insert(dir.to_string());
            parent = dir;
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_documents(&self, folder: &str) -> Result<Vec<DocumentHandle>, AppError> {
        let folder = folder.trim_end_matches('/');
        let prefix = format!("{}/", folder);

        let mut handles: Vec<DocumentHandle> = self
            .documents
            .iter()
            .map(|doc| doc.key().clone())
            .filter(|path| folder.is_empty() || path.starts_with(&prefix))
            .filter(|path| is_markdown(path))
            .map(DocumentHandle::new)
            .collect();
        handles.sort();
        Ok(handles)
    }

    async fn read_text(&self, path: &str) -> Result<String, AppError> {
        self.get(path)
            .ok_or_else(|| AppError::NotFound(path.to_string()))
    }

    async fn write_text(&self, path: &str, text: &str) -> Result<(), AppError> {
        let mut doc = self
            .documents
            .get_mut(path)
            .ok_or_else(|| AppError::NotFound(path.to_string()))?;
        *doc = text.to_string();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn create_text(&self, path: &str, text: &str) -> Result<DocumentHandle, AppError> {
        match self.documents.entry(path.to_string()) {
            Entry::Occupied(_) => {
                return Err(AppError::Storage(format!("Document already exists: {}", path)))
            }
            Entry::Vacant(entry) => {
                entry.insert(text.to_string());
            }
        }
        self.add_parent_folders(path);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(DocumentHandle::new(path))
    }

    async fn exists(&self, path: &str) -> Result<bool, AppError> {
        let path = path.trim_end_matches('/');
        Ok(self.documents.contains_key(path) || self.folders.contains(path))
    }

    async fn create_folder(&self, path: &str) -> Result<(), AppError> {
        let path = path.trim_end_matches('/');
        if !path.is_empty() {
            self.add_parent_folders(path);
            self.folders.insert(path.to_string());
        }
        Ok(())
    }
}
