// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! YAML frontmatter encoding of a workout.
//!
//! Encoding is lossless: sets are written field for field and absent fields
//! stay absent. Decoding is lenient about shape (missing or mistyped fields
//! fall back to defaults) but strict about ownership: a block without
//! `workoutTracker: true` is never treated as a workout.

use serde::Serialize;
use serde_yaml::Value;

use super::body::trimmed_notes;
use super::split_frontmatter;
use crate::error::CodecError;
use crate::models::{Exercise, ExerciseSet, Workout};
use crate::time_utils;

/// Frontmatter key marking a document as owned by this crate.
pub const MARKER_KEY: &str = "workoutTracker";

/// Name given to exercises whose frontmatter entry has none.
pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

/// Key order here is the order written to disk.
#[derive(Serialize)]
struct FrontmatterBlock<'a> {
    id: &'a str,
    date: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    exercises: &'a [Exercise],
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
    #[serde(rename = "workoutTracker")]
    workout_tracker: bool,
}

/// Encode a workout as a YAML mapping (without the `---` delimiters).
///
/// Notes are trimmed and blank notes dropped, matching the body encoding.
pub fn encode(workout: &Workout) -> Result<String, CodecError> {
    let exercises: Vec<Exercise> = workout
        .exercises
        .iter()
        .map(|exercise| Exercise {
            notes: trimmed_notes(exercise.notes.as_deref()).map(str::to_string),
            ..exercise.clone()
        })
        .collect();

    let block = FrontmatterBlock {
        id: &workout.id,
        date: &workout.date,
        name: &workout.name,
        duration: workout.duration,
        exercises: &exercises,
        notes: trimmed_notes(workout.notes.as_deref()),
        workout_tracker: true,
    };

    Ok(serde_yaml::to_string(&block)?)
}

/// Decode the frontmatter of a document into a workout.
pub fn decode(raw: &str, fallback_name: &str) -> Result<Workout, CodecError> {
    let block = read_block(raw)?;
    if !is_marked(&block) {
        return Err(CodecError::NotAnOwnedRecord);
    }

    Ok(Workout {
        id: non_empty(scalar_string(block.get("id"))).unwrap_or_else(time_utils::generate_id),
        date: non_empty(scalar_string(block.get("date"))).unwrap_or_else(time_utils::today_string),
        name: non_empty(scalar_string(block.get("name")))
            .unwrap_or_else(|| fallback_name.to_string()),
        exercises: exercises(block.get("exercises")),
        duration: number(block.get("duration")),
        notes: scalar_string(block.get("notes")),
    })
}

/// True when the document has a parseable frontmatter block carrying the
/// ownership marker.
pub fn has_marker(raw: &str) -> bool {
    read_block(raw).is_ok_and(|block| is_marked(&block))
}

/// Identifier stored in the frontmatter, if the block parses and has one.
///
/// The marker is not checked: body parsing uses this to keep an id stable
/// even while the rest of the frontmatter is being ignored.
pub fn read_id(raw: &str) -> Option<String> {
    let block = read_block(raw).ok()?;
    non_empty(scalar_string(block.get("id")))
}

fn read_block(raw: &str) -> Result<Value, CodecError> {
    let (yaml, _body) = split_frontmatter(raw).ok_or(CodecError::NotFound)?;
    serde_yaml::from_str(yaml).map_err(|e| CodecError::MalformedMetadata(e.to_string()))
}

fn is_marked(block: &Value) -> bool {
    matches!(block.get(MARKER_KEY), Some(Value::Bool(true)))
}

fn exercises(value: Option<&Value>) -> Vec<Exercise> {
    match value {
        Some(Value::Sequence(items)) => items.iter().map(exercise).collect(),
        _ => Vec::new(),
    }
}

fn exercise(value: &Value) -> Exercise {
    let sets = match value.get("sets") {
        Some(Value::Sequence(sets)) => sets.iter().map(exercise_set).collect(),
        _ => Vec::new(),
    };

    Exercise {
        name: non_empty(scalar_string(value.get("name")))
            .unwrap_or_else(|| UNKNOWN_EXERCISE.to_string()),
        sets,
        notes: scalar_string(value.get("notes")),
    }
}

/// Non-mapping entries decode as placeholder sets so set numbering is kept.
fn exercise_set(value: &Value) -> ExerciseSet {
    ExerciseSet {
        reps: count(value.get("reps")),
        weight: number(value.get("weight")),
        duration: number(value.get("duration")),
        distance: number(value.get("distance")),
        rest_time: number(value.get("restTime")),
    }
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn count(value: Option<&Value>) -> Option<u32> {
    if let Some(Value::Number(n)) = value {
        if let Some(exact) = n.as_u64().and_then(|v| u32::try_from(v).ok()) {
            return Some(exact);
        }
    }
    number(value)
        .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.trunc() as u32)
}
