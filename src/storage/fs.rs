// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filesystem document store rooted at a directory (a notes vault).

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{is_markdown, join_path, DocumentHandle, DocumentStore};
use crate::error::AppError;

/// Document store over a local directory tree.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store-relative path. Absolute paths and `..` are rejected.
    fn resolve(&self, path: &str) -> Result<PathBuf, AppError> {
        let relative = Path::new(path.trim_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AppError::Storage(format!(
                "Path escapes the document root: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

fn storage_error(path: &str, err: std::io::Error) -> AppError {
    if err.kind() == ErrorKind::NotFound {
        AppError::NotFound(path.to_string())
    } else {
        AppError::Storage(format!("{}: {}", path, err))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn list_documents(&self, folder: &str) -> Result<Vec<DocumentHandle>, AppError> {
        let folder = folder.trim_matches('/');
        let mut pending = vec![folder.to_string()];
        let mut handles = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(self.resolve(&dir)?).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(storage_error(&dir, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| storage_error(&dir, e))?
            {
                let Ok(name) = entry.file_name().into_string() else {
                    tracing::debug!(dir = %dir, "Skipping non-UTF-8 file name");
                    continue;
                };
                let path = join_path(&dir, &name);
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| storage_error(&path, e))?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && is_markdown(&path) {
                    handles.push(DocumentHandle::new(path));
                }
            }
        }

        handles.sort();
        Ok(handles)
    }

    async fn read_text(&self, path: &str) -> Result<String, AppError> {
        fs::read_to_string(self.resolve(path)?)
            .await
            .map_err(|e| storage_error(path, e))
    }

    async fn write_text(&self, path: &str, text: &str) -> Result<(), AppError> {
        let full = self.resolve(path)?;
        if !fs::try_exists(&full).await.map_err(|e| storage_error(path, e))? {
            return Err(AppError::NotFound(path.to_string()));
        }
        fs::write(&full, text)
            .await
            .map_err(|e| storage_error(path, e))
    }

    async fn create_text(&self, path: &str, text: &str) -> Result<DocumentHandle, AppError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(path, e))?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    AppError::Storage(format!("Document already exists: {}", path))
                }
                _ => storage_error(path, e),
            })?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| storage_error(path, e))?;
        file.flush().await.map_err(|e| storage_error(path, e))?;

        Ok(DocumentHandle::new(path.trim_matches('/')))
    }

    async fn exists(&self, path: &str) -> Result<bool, AppError> {
        fs::try_exists(self.resolve(path)?)
            .await
            .map_err(|e| storage_error(path, e))
    }

    async fn create_folder(&self, path: &str) -> Result<(), AppError> {
        fs::create_dir_all(self.resolve(path)?)
            .await
            .map_err(|e| storage_error(path, e))
    }
}
