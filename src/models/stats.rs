//! Workout statistics aggregated over a set of parsed documents.
//!
//! Aggregates are recomputed from scratch on each call; nothing is cached
//! between calls.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::Workout;
use crate::time_utils;

/// Heaviest set recorded for an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub weight: f64,
    pub reps: u32,
    /// Date of the workout the set belongs to
    pub date: String,
}

/// Statistics over a collection of workouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStatistics {
    // ─── Totals ──────────────────────────────────────────────────
    #[serde(default)]
    pub total_workouts: u32,
    #[serde(default)]
    pub total_exercises: u32,
    #[serde(default)]
    pub total_sets: u32,
    /// Sum of weight × reps over sets recording both
    #[serde(default)]
    pub total_volume: f64,
    /// Mean duration (minutes) of workouts that record one
    #[serde(default)]
    pub average_duration: f64,

    // ─── By Exercise ─────────────────────────────────────────────
    /// Occurrences per exercise name
    #[serde(default)]
    pub exercise_frequency: HashMap<String, u32>,
    #[serde(default)]
    pub personal_records: HashMap<String, PersonalRecord>,

    // ─── By Date ─────────────────────────────────────────────────
    /// Workouts grouped by date ("YYYY-MM-DD")
    #[serde(default)]
    pub workouts_by_date: BTreeMap<String, Vec<Workout>>,
    /// Consecutive training days ending today or yesterday
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_workout_date: Option<String>,
}

impl WorkoutStatistics {
    /// Aggregate statistics as of `today` (used for the streak).
    pub fn from_workouts(workouts: &[Workout], today: NaiveDate) -> Self {
        let mut stats = Self {
            total_workouts: workouts.len() as u32,
            ..Self::default()
        };
        if workouts.is_empty() {
            return stats;
        }

        // Stable sort: on exact ties the earliest-dated set keeps the record
        let mut sorted: Vec<&Workout> = workouts.iter().collect();
        sorted.sort_by(|a, b| a.date.cmp(&b.date));
        stats.last_workout_date = sorted.last().map(|w| w.date.clone());

        let mut total_duration = 0.0;
        let mut duration_count = 0u32;

        for workout in &sorted {
            stats.total_exercises += workout.exercises.len() as u32;

            if let Some(duration) = workout.duration {
                total_duration += duration;
                duration_count += 1;
            }

            for exercise in &workout.exercises {
                *stats
                    .exercise_frequency
                    .entry(exercise.name.clone())
                    .or_insert(0) += 1;
                stats.total_sets += exercise.sets.len() as u32;

                for set in &exercise.sets {
                    let (Some(weight), Some(reps)) = (set.weight, set.reps) else {
                        continue;
                    };
                    stats.total_volume += weight * f64::from(reps);

                    // Zero load or zero reps is not a record
                    if weight <= 0.0 || reps == 0 {
                        continue;
                    }
                    let beats_current = match stats.personal_records.get(&exercise.name) {
                        None => true,
                        Some(pr) => weight > pr.weight || (weight == pr.weight && reps > pr.reps),
                    };
                    if beats_current {
                        stats.personal_records.insert(
                            exercise.name.clone(),
                            PersonalRecord {
                                weight,
                                reps,
                                date: workout.date.clone(),
                            },
                        );
                    }
                }
            }
        }

        // Grouping keeps caller order within a date
        for workout in workouts {
            stats
                .workouts_by_date
                .entry(workout.date.clone())
                .or_default()
                .push(workout.clone());
        }

        if duration_count > 0 {
            stats.average_duration = total_duration / f64::from(duration_count);
        }

        stats.current_streak = current_streak(workouts.iter().map(|w| w.date.as_str()), today);

        stats
    }
}

/// Count consecutive workout days walking backward from `today`.
///
/// The most recent date may be today or yesterday; after that each earlier
/// date must be at most one day before the previous one. Unparseable dates
/// are ignored.
pub fn current_streak<'a>(dates: impl IntoIterator<Item = &'a str>, today: NaiveDate) -> u32 {
    let unique: BTreeSet<NaiveDate> = dates
        .into_iter()
        .filter_map(time_utils::parse_date)
        .collect();

    let mut streak = 0;
    let mut cursor = today;
    for date in unique.into_iter().rev() {
        if (cursor - date).num_days() <= 1 {
            streak += 1;
            cursor = date;
        } else {
            break;
        }
    }
    streak
}
