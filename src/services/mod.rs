// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod scheduler;
pub mod statistics;
pub mod sync;
pub mod workout_files;

pub use scheduler::SyncScheduler;
pub use statistics::{ExerciseCount, ProgressionPoint};
pub use sync::{is_owned_document, reconcile, SyncOutcome};
pub use workout_files::WorkoutFileService;
