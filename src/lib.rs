// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: workout logs as human-editable markdown documents.
//!
//! Each workout is persisted as a markdown document carrying two encodings
//! of the same data: a YAML frontmatter block for programs and a readable
//! body for people. This crate generates those documents, parses them back,
//! reconciles them after manual edits, and computes statistics over them.

pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod time_utils;

pub use document::{generate, parse, ParsedFrom};
pub use models::{Exercise, ExerciseSet, Workout, WorkoutStatistics};
pub use services::sync::{is_owned_document, reconcile, SyncOutcome};
