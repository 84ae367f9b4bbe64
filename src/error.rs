// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the document codec and the services built on it.

/// Failure to recover a workout from a frontmatter block.
///
/// Body parsing never produces one of these; it degrades field by field
/// instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// No frontmatter block at the start of the document.
    #[error("No frontmatter block found")]
    NotFound,

    /// A frontmatter block exists but is not valid YAML.
    #[error("Malformed frontmatter: {0}")]
    MalformedMetadata(String),

    /// Valid YAML that lacks the `workoutTracker: true` marker.
    #[error("Frontmatter is not a workout tracker record")]
    NotAnOwnedRecord,

    #[error("Failed to encode frontmatter: {0}")]
    Encode(String),
}

impl From<serde_yaml::Error> for CodecError {
    fn from(err: serde_yaml::Error) -> Self {
        CodecError::Encode(err.to_string())
    }
}

/// Application error type for storage-backed operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not valid workout data: {0}")]
    InvalidDocument(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when the error came from the storage collaborator.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::NotFound(_))
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;
