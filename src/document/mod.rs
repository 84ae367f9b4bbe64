// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout documents: YAML frontmatter followed by a markdown body.
//!
//! The two halves are independent encodings of the same [`Workout`]:
//! - [`frontmatter`] is lossless and authoritative for programs
//! - [`body`] is what people read and edit by hand
//!
//! [`generate`] is the only producer of canonical document text.
//! [`parse`] reads the frontmatter only; falling back to the body is a
//! reconciliation decision (see `services::sync`).

pub mod body;
pub mod frontmatter;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::CodecError;
use crate::models::Workout;

/// Opening and closing line of the frontmatter block.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Frontmatter block at the very start of a document. The enclosed YAML may
/// be empty.
static FRONTMATTER_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").ok()
});

/// Which encoding a workout was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsedFrom {
    Frontmatter,
    Body,
    /// Neither encoding yielded a workout
    None,
}

/// Split a document into its frontmatter YAML and the remaining body.
///
/// Returns `None` when the document does not start with a frontmatter block.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let captures = FRONTMATTER_BLOCK.as_ref()?.captures(text)?;
    let whole = captures.get(0)?;
    let yaml = captures.get(1).map_or("", |m| m.as_str());
    Some((yaml, &text[whole.end()..]))
}

/// Render the canonical document for a workout.
pub fn generate(workout: &Workout) -> Result<String, CodecError> {
    let mut yaml = frontmatter::encode(workout)?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }

    Ok(format!(
        "{delim}\n{yaml}{delim}\n\n{body}",
        delim = FRONTMATTER_DELIMITER,
        body = body::encode(workout)
    ))
}

/// Recover a workout from a document's frontmatter.
///
/// `fallback_name` (typically the document's base name) is used when the
/// frontmatter has no name.
pub fn try_parse(raw: &str, fallback_name: &str) -> Result<Workout, CodecError> {
    frontmatter::decode(raw, fallback_name)
}

/// Recover a workout from a document's frontmatter, or `None` if the
/// document is not a workout tracker record.
pub fn parse(raw: &str, fallback_name: &str) -> Option<Workout> {
    match try_parse(raw, fallback_name) {
        Ok(workout) => Some(workout),
        Err(err @ CodecError::MalformedMetadata(_)) => {
            tracing::warn!(document = fallback_name, error = %err, "Unreadable workout frontmatter");
            None
        }
        Err(err) => {
            tracing::debug!(document = fallback_name, error = %err, "Not a workout document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, ExerciseSet};

    fn sample_workout() -> Workout {
        let mut bench = Exercise::new("Bench Press");
        bench.sets = vec![
            ExerciseSet::strength(10, 100.0),
            ExerciseSet::strength(8, 102.5),
        ];
        bench.notes = Some("Paused reps".to_string());

        Workout {
            id: "1700000000000".to_string(),
            date: "2024-01-15".to_string(),
            name: "Push Day".to_string(),
            exercises: vec![bench],
            duration: Some(45.0),
            notes: Some("Felt strong".to_string()),
        }
    }

    #[test]
    fn test_split_frontmatter() {
        let (yaml, body) = split_frontmatter("---\na: 1\n---\n\n# Title\n").unwrap();
        assert_eq!(yaml, "a: 1");
        assert_eq!(body, "\n# Title\n");
    }

    #[test]
    fn test_split_frontmatter_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nbody").unwrap();
        assert_eq!(yaml, "");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_frontmatter_requires_document_start() {
        assert!(split_frontmatter("# Title\n---\na: 1\n---\n").is_none());
        assert!(split_frontmatter("---\na: 1\n").is_none());
    }

    #[test]
    fn test_generate_layout() {
        let text = generate(&sample_workout()).unwrap();
        assert!(text.starts_with("---\nid: "));
        assert!(text.lines().nth(1).unwrap().contains("1700000000000"));
        assert!(text.contains("workoutTracker: true\n---\n\n# Push Day\n\n**Date:** 2024-01-15\n"));
        assert!(text.ends_with("## Notes\n\nFelt strong\n"));
    }

    #[test]
    fn test_parse_round_trip() {
        let workout = sample_workout();
        let text = generate(&workout).unwrap();
        assert_eq!(parse(&text, "ignored"), Some(workout));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let text = generate(&sample_workout()).unwrap();
        let reparsed = parse(&text, "ignored").unwrap();
        assert_eq!(generate(&reparsed).unwrap(), text);
    }

    #[test]
    fn test_parse_rejects_plain_markdown() {
        assert_eq!(parse("# Shopping list\n\n- eggs\n", "list"), None);
        assert_eq!(
            try_parse("# Shopping list\n", "list"),
            Err(CodecError::NotFound)
        );
    }
}
