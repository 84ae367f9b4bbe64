// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reconciliation of hand-edited workout documents.
//!
//! The markdown body is what people edit, so it wins when it disagrees with
//! the frontmatter. The frontmatter is only used when the body has lost its
//! structure entirely. The canonical document is regenerated from whichever
//! encoding produced a workout and compared byte for byte with the input.

use serde::Serialize;

use crate::document::{self, body, frontmatter, ParsedFrom};
use crate::error::CodecError;

/// Result of reconciling one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOutcome {
    /// Canonical text to write back, when it differs from the input
    pub updated_text: Option<String>,
    pub changed: bool,
    pub source: ParsedFrom,
}

impl SyncOutcome {
    fn skipped() -> Self {
        Self {
            updated_text: None,
            changed: false,
            source: ParsedFrom::None,
        }
    }
}

/// Regenerate a document from its body (or, failing that, its frontmatter)
/// and report whether the stored text needs rewriting.
///
/// The caller performs the write.
pub fn reconcile(raw: &str, fallback_name: &str) -> Result<SyncOutcome, CodecError> {
    let (workout, source) = if let Some(workout) = body::decode(raw, fallback_name) {
        (workout, ParsedFrom::Body)
    } else if let Some(workout) = document::parse(raw, fallback_name) {
        (workout, ParsedFrom::Frontmatter)
    } else {
        return Ok(SyncOutcome::skipped());
    };

    let expected = document::generate(&workout)?;
    if expected == raw {
        return Ok(SyncOutcome {
            updated_text: None,
            changed: false,
            source,
        });
    }

    Ok(SyncOutcome {
        updated_text: Some(expected),
        changed: true,
        source,
    })
}

/// Cheap ownership check: frontmatter present, parseable, and marked.
pub fn is_owned_document(raw: &str) -> bool {
    frontmatter::has_marker(raw)
}
