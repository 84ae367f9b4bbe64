//! Document storage layer.
//!
//! The codec never performs I/O itself; everything that touches persisted
//! documents goes through [`DocumentStore`]. Paths are `/`-separated and
//! relative to the store root.

pub mod fs;
pub mod memory;

pub use fs::FsDocumentStore;
pub use memory::MemoryDocumentStore;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;

/// Extension of workout documents.
pub const MARKDOWN_EXTENSION: &str = "md";

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocumentHandle {
    /// Store-relative path, e.g. `Workouts/2024-01-15-1700000000000-Push-Day.md`
    pub path: String,
    /// File name without directory or extension
    pub basename: String,
}

impl DocumentHandle {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let basename = basename(&path).to_string();
        Self { path, basename }
    }
}

/// Storage collaborator used by the workout services.
///
/// Calls are independent; implementations need not be transactional beyond
/// a single call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All markdown documents under `folder` (recursively), sorted by path.
    async fn list_documents(&self, folder: &str) -> Result<Vec<DocumentHandle>, AppError>;

    async fn read_text(&self, path: &str) -> Result<String, AppError>;

    /// Replace the contents of an existing document.
    async fn write_text(&self, path: &str, text: &str) -> Result<(), AppError>;

    /// Create a new document. Fails if one already exists at `path`.
    async fn create_text(&self, path: &str, text: &str) -> Result<DocumentHandle, AppError>;

    async fn exists(&self, path: &str) -> Result<bool, AppError>;

    /// Create a folder (and any missing parents).
    async fn create_folder(&self, path: &str) -> Result<(), AppError>;
}

/// File name of `path` without its directory or extension.
pub fn basename(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// True when `path` names a markdown document.
pub fn is_markdown(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|file| file.rsplit_once('.'))
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}

/// Join a folder and a file name with a single `/`.
pub fn join_path(folder: &str, name: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}
