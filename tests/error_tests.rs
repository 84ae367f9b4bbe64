// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::error::{AppError, CodecError};

#[test]
fn test_is_storage_error_matches() {
    assert!(AppError::Storage("disk full".to_string()).is_storage_error());
    assert!(AppError::NotFound("Workouts/a.md".to_string()).is_storage_error());
}

#[test]
fn test_is_storage_error_no_match() {
    assert!(!AppError::InvalidDocument("Workouts/a.md".to_string()).is_storage_error());
    assert!(!AppError::Codec(CodecError::NotFound).is_storage_error());
    assert!(!AppError::Internal(anyhow::anyhow!("boom")).is_storage_error());
}

#[test]
fn test_codec_error_is_transparent() {
    let err: AppError = CodecError::NotAnOwnedRecord.into();
    assert_eq!(
        err.to_string(),
        CodecError::NotAnOwnedRecord.to_string(),
        "Codec errors should display unchanged"
    );
}

#[test]
fn test_invalid_document_message() {
    let err = AppError::InvalidDocument("Workouts/notes.md".to_string());
    assert_eq!(err.to_string(), "Not valid workout data: Workouts/notes.md");
}

#[test]
fn test_yaml_error_maps_to_encode() {
    let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
    let err = CodecError::from(yaml_err);
    assert!(matches!(err, CodecError::Encode(_)));
}
