// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout record model shared by both document encodings.

use serde::{Deserialize, Serialize};

use crate::time_utils;

/// One logged workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Stable identifier, assigned once and preserved through every rewrite
    pub id: String,
    /// Session date (YYYY-MM-DD)
    pub date: String,
    /// Display name
    pub name: String,
    /// Exercises in the order they were performed
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Total duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A named exercise within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    /// Sets in performed order
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One performed set or interval. Every field is optional; a set with no
/// fields at all is a valid placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Load lifted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Rest after the set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<f64>,
}

impl Workout {
    /// Create an empty workout with a freshly generated identifier.
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: time_utils::generate_id(),
            date: date.into(),
            name: name.into(),
            exercises: Vec::new(),
            duration: None,
            notes: None,
        }
    }

    /// Assign an identifier if this workout does not have one yet.
    pub fn ensure_id(&mut self) {
        if self.id.trim().is_empty() {
            self.id = time_utils::generate_id();
        }
    }

    /// Total number of sets across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: Vec::new(),
            notes: None,
        }
    }
}

impl ExerciseSet {
    /// A strength set with repetitions and load.
    pub fn strength(reps: u32, weight: f64) -> Self {
        Self {
            reps: Some(reps),
            weight: Some(weight),
            ..Self::default()
        }
    }

    /// Weight × reps, when both are recorded.
    pub fn volume(&self) -> Option<f64> {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) => Some(weight * f64::from(reps)),
            _ => None,
        }
    }

    /// True when no field is recorded.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}
