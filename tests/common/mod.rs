// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::services::WorkoutFileService;
use workout_tracker::storage::MemoryDocumentStore;
use workout_tracker::{Exercise, ExerciseSet, Workout};

pub const WORKOUT_FOLDER: &str = "Workouts";

/// Build a workout with a fixed id so generated text is deterministic.
#[allow(dead_code)]
pub fn workout(id: &str, date: &str, name: &str, exercises: Vec<Exercise>) -> Workout {
    let mut workout = Workout::new(name, date);
    workout.id = id.to_string();
    workout.exercises = exercises;
    workout
}

/// An exercise made of `(reps, weight)` strength sets.
#[allow(dead_code)]
pub fn exercise(name: &str, sets: &[(u32, f64)]) -> Exercise {
    let mut exercise = Exercise::new(name);
    exercise.sets = sets
        .iter()
        .map(|&(reps, weight)| ExerciseSet::strength(reps, weight))
        .collect();
    exercise
}

/// Push day used across the integration tests.
#[allow(dead_code)]
pub fn push_day() -> Workout {
    let mut workout = workout(
        "1705312800000",
        "2024-01-15",
        "Push Day",
        vec![
            exercise("Bench Press", &[(10, 100.0), (8, 110.0)]),
            exercise("Overhead Press", &[(8, 50.0)]),
        ],
    );
    workout.duration = Some(55.0);
    workout.notes = Some("Felt strong".to_string());
    workout
}

/// Service over an empty in-memory store.
#[allow(dead_code)]
pub fn memory_service() -> WorkoutFileService<MemoryDocumentStore> {
    WorkoutFileService::new(MemoryDocumentStore::new(), WORKOUT_FOLDER)
}
