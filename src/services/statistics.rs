// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived statistics queries over parsed workouts.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Workout, WorkoutStatistics};
use crate::time_utils;

/// Exercise name with the number of times it was logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseCount {
    pub exercise: String,
    pub count: u32,
}

/// One workout's contribution to an exercise's progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressionPoint {
    pub date: String,
    pub max_weight: f64,
    pub total_volume: f64,
}

/// Aggregate statistics as of today's local date.
pub fn aggregate(workouts: &[Workout]) -> WorkoutStatistics {
    WorkoutStatistics::from_workouts(workouts, time_utils::today())
}

/// The `limit` most frequently logged exercises, most frequent first.
/// Equal counts are ordered by name.
pub fn top_exercises(workouts: &[Workout], limit: usize) -> Vec<ExerciseCount> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        *counts.entry(exercise.name.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<ExerciseCount> = counts
        .into_iter()
        .map(|(exercise, count)| ExerciseCount {
            exercise: exercise.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration is name-ordered and the sort is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Workouts dated within `[start, end]`, inclusive.
pub fn workouts_in_date_range(workouts: &[Workout], start: &str, end: &str) -> Vec<Workout> {
    workouts
        .iter()
        .filter(|w| w.date.as_str() >= start && w.date.as_str() <= end)
        .cloned()
        .collect()
}

/// Statistics restricted to workouts dated within `[start, end]`.
pub fn statistics_for_period(workouts: &[Workout], start: &str, end: &str) -> WorkoutStatistics {
    aggregate(&workouts_in_date_range(workouts, start, end))
}

/// Workout count per month ("YYYY-MM").
pub fn monthly_counts(workouts: &[Workout]) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for workout in workouts {
        if let Some(month) = time_utils::month_key(&workout.date) {
            *counts.entry(month.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Heaviest weight and volume per workout for one exercise, oldest first.
///
/// Only the first matching exercise in each workout is considered, and
/// workouts with no weighted set are skipped.
pub fn exercise_progression(workouts: &[Workout], exercise_name: &str) -> Vec<ProgressionPoint> {
    let mut progression: Vec<ProgressionPoint> = workouts
        .iter()
        .filter_map(|workout| {
            let exercise = workout.exercises.iter().find(|e| e.name == exercise_name)?;

            let mut max_weight: f64 = 0.0;
            let mut total_volume = 0.0;
            for set in &exercise.sets {
                if let Some(weight) = set.weight {
                    max_weight = max_weight.max(weight);
                }
                if let Some(volume) = set.volume() {
                    total_volume += volume;
                }
            }

            (max_weight > 0.0).then(|| ProgressionPoint {
                date: workout.date.clone(),
                max_weight,
                total_volume,
            })
        })
        .collect();

    progression.sort_by(|a, b| a.date.cmp(&b.date));
    progression
}
