// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod stats;
pub mod workout;

pub use stats::{PersonalRecord, WorkoutStatistics};
pub use workout::{Exercise, ExerciseSet, Workout};
