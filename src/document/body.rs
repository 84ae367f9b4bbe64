// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Markdown body encoding of a workout.
//!
//! Layout, in order:
//!
//! ```text
//! # {name}
//!
//! **Date:** {date}
//! **Duration:** {duration} minutes
//!
//! ## Exercises
//!
//! ### {exercise}
//!
//! | Set | Reps | Weight | Duration | Distance | Rest |
//! |-----|------|--------|----------|----------|------|
//! | 1 | 10 | 100 | - | - | 90 |
//!
//! **Notes:** {exercise notes}
//!
//! ## Notes
//!
//! {workout notes}
//! ```
//!
//! The decoder reads this layout back but never fails: each field is
//! extracted on its own and falls back to an absent or default value when
//! the text no longer matches. Users edit this text directly.

use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

use super::{frontmatter, split_frontmatter};
use crate::models::{Exercise, ExerciseSet, Workout};
use crate::time_utils;

/// Cell text for a field that was not recorded.
pub const PLACEHOLDER: &str = "-";

const EXERCISES_HEADING: &str = "## Exercises";
const NOTES_HEADING: &str = "## Notes";
const TABLE_HEADER: &str = "| Set | Reps | Weight | Duration | Distance | Rest |";
const TABLE_SEPARATOR: &str = "|-----|------|--------|----------|----------|------|";
const TABLE_COLUMNS: usize = 6;

static DATE_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)\*\*Date:\*\*[ \t]*(.+?)[ \t]*\r?$").ok());

static DURATION_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?m)\*\*Duration:\*\*[ \t]*(\d+(?:\.\d+)?)[ \t]*minutes?[ \t]*\r?$").ok()
});

/// Start of an exercise's notes; the notes run to the end of the exercise.
static NOTES_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\*\*Notes:\*\*[ \t]*(.*)$").ok());

/// Leading decimal number in a table cell ("100 kg" reads as 100).
static CELL_NUMBER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").ok());

/// Render the markdown body for a workout.
pub fn encode(workout: &Workout) -> String {
    let mut content = format!("# {}\n\n", workout.name);
    content.push_str(&format!("**Date:** {}\n", workout.date));
    if let Some(duration) = workout.duration {
        content.push_str(&format!("**Duration:** {} minutes\n", duration));
    }
    content.push_str(&format!("\n{}\n\n", EXERCISES_HEADING));

    for exercise in &workout.exercises {
        content.push_str(&format!("### {}\n\n", exercise.name));
        if !exercise.sets.is_empty() {
            content.push_str(TABLE_HEADER);
            content.push('\n');
            content.push_str(TABLE_SEPARATOR);
            content.push('\n');
            for (index, set) in exercise.sets.iter().enumerate() {
                content.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    index + 1,
                    cell(set.reps),
                    cell(set.weight),
                    cell(set.duration),
                    cell(set.distance),
                    cell(set.rest_time),
                ));
            }
        }
        if let Some(notes) = trimmed_notes(exercise.notes.as_deref()) {
            content.push_str(&format!("\n**Notes:** {}\n", notes));
        }
        content.push('\n');
    }

    if let Some(notes) = trimmed_notes(workout.notes.as_deref()) {
        content.push_str(&format!("{}\n\n{}\n", NOTES_HEADING, notes));
    }

    content
}

/// Recover a workout from a document's markdown body.
///
/// Any frontmatter in `text` is skipped, except that its `id` is kept so
/// the workout identity survives. Returns `None` only when the body has no
/// structure at all: no level-1 heading and no exercise headings.
pub fn decode(text: &str, fallback_name: &str) -> Option<Workout> {
    let body = split_frontmatter(text).map_or(text, |(_, body)| body);
    let (main, notes_section) = split_notes_section(body);

    let header = header_section(main);
    let title = extract_title(main);
    let exercises = extract_exercises(main);
    if title.is_none() && exercises.is_empty() {
        return None;
    }

    Some(Workout {
        id: frontmatter::read_id(text).unwrap_or_else(time_utils::generate_id),
        date: extract_date(header).unwrap_or_else(time_utils::today_string),
        name: title.unwrap_or_else(|| fallback_name.to_string()),
        exercises,
        duration: extract_duration(header),
        notes: trimmed_notes(notes_section).map(str::to_string),
    })
}

fn cell<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// Notes as both encodings write them: trimmed, and absent when blank.
pub(crate) fn trimmed_notes(notes: Option<&str>) -> Option<&str> {
    notes.map(str::trim).filter(|n| !n.is_empty())
}

/// Split the body at the first `## Notes` heading.
fn split_notes_section(body: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end() == NOTES_HEADING {
            return (&body[..offset], Some(&body[offset + line.len()..]));
        }
        offset += line.len();
    }
    (body, None)
}

/// Text before the first level 2 or 3 heading, where the date and duration
/// lines live.
fn header_section(main: &str) -> &str {
    let mut offset = 0;
    for line in main.split_inclusive('\n') {
        if heading(line).is_some_and(|(level, _)| level > 1) {
            return &main[..offset];
        }
        offset += line.len();
    }
    main
}

/// Heading level (1 to 3) and trimmed title of a markdown heading line.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level, rest.trim()))
}

fn extract_title(main: &str) -> Option<String> {
    main.lines().find_map(|line| match heading(line) {
        Some((1, title)) if !title.is_empty() => Some(title.to_string()),
        _ => None,
    })
}

fn extract_date(main: &str) -> Option<String> {
    let captures = DATE_LINE.as_ref()?.captures(main)?;
    let date = captures.get(1)?.as_str().trim();
    (!date.is_empty()).then(|| date.to_string())
}

fn extract_duration(main: &str) -> Option<f64> {
    let captures = DURATION_LINE.as_ref()?.captures(main)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Every `### ` heading starts an exercise whose content runs to the next
/// heading of level 1 to 3.
fn extract_exercises(main: &str) -> Vec<Exercise> {
    let mut exercises = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in main.lines() {
        match heading(line) {
            Some((level, title)) => {
                if let Some((name, lines)) = current.take() {
                    exercises.push(parse_exercise(name, &lines));
                }
                if level == 3 && !title.is_empty() {
                    current = Some((title, Vec::new()));
                }
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }
    if let Some((name, lines)) = current {
        exercises.push(parse_exercise(name, &lines));
    }

    exercises
}

fn parse_exercise(name: &str, lines: &[&str]) -> Exercise {
    let notes_start = NOTES_LINE.as_ref().and_then(|re| {
        lines.iter().enumerate().find_map(|(index, line)| {
            let captures = re.captures(line)?;
            Some((index, captures.get(1)?.as_str()))
        })
    });

    // Rows after the notes marker are notes text
    let table_end = notes_start.map_or(lines.len(), |(index, _)| index);
    let sets = lines[..table_end]
        .iter()
        .filter(|line| line.trim_start().starts_with('|'))
        .filter_map(|line| parse_set_row(line))
        .collect();

    let notes = notes_start.and_then(|(index, first_line)| {
        let rest = lines[index + 1..].iter().copied();
        let text = std::iter::once(first_line).chain(rest).collect::<Vec<_>>().join("\n");
        trimmed_notes(Some(text.as_str())).map(str::to_string)
    });

    Exercise {
        name: name.to_string(),
        sets,
        notes,
    }
}

/// Parse one table row into a set. Header, separator and short rows yield
/// `None`; unreadable cells yield absent fields.
fn parse_set_row(line: &str) -> Option<ExerciseSet> {
    let mut cells: Vec<&str> = line.trim().split('|').map(str::trim).collect();
    // Leading pipe always leaves an empty first cell; trailing pipe is optional
    cells.remove(0);
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    if cells.len() < TABLE_COLUMNS {
        return None;
    }
    if cells.iter().all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':')) {
        return None;
    }
    if cells[0].eq_ignore_ascii_case("set") {
        return None;
    }

    Some(ExerciseSet {
        reps: cell_count(cells[1]),
        weight: cell_number(cells[2]),
        duration: cell_number(cells[3]),
        distance: cell_number(cells[4]),
        rest_time: cell_number(cells[5]),
    })
}

fn cell_number(cell: &str) -> Option<f64> {
    if cell.is_empty() || cell == PLACEHOLDER {
        return None;
    }
    let matched = CELL_NUMBER.as_ref()?.find(cell)?;
    matched.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn cell_count(cell: &str) -> Option<u32> {
    cell_number(cell)
        .filter(|n| *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg_day() -> Workout {
        let mut squat = Exercise::new("Back Squat");
        squat.sets = vec![
            ExerciseSet {
                reps: Some(5),
                weight: Some(140.0),
                rest_time: Some(180.0),
                ..ExerciseSet::default()
            },
            ExerciseSet::strength(5, 142.5),
            ExerciseSet::default(),
        ];
        squat.notes = Some("Belt on top sets".to_string());

        let mut bike = Exercise::new("Bike");
        bike.sets = vec![ExerciseSet {
            duration: Some(12.5),
            distance: Some(6.2),
            ..ExerciseSet::default()
        }];

        Workout {
            id: "1".to_string(),
            date: "2024-03-02".to_string(),
            name: "Leg Day".to_string(),
            exercises: vec![squat, bike, Exercise::new("Stretching")],
            duration: Some(75.0),
            notes: Some("Good session.\nKnee felt fine.".to_string()),
        }
    }

    #[test]
    fn test_encode_layout() {
        let mut workout = Workout::new("Quick", "2024-03-02");
        let mut pushups = Exercise::new("Push-up");
        pushups.sets.push(ExerciseSet {
            reps: Some(20),
            ..ExerciseSet::default()
        });
        workout.exercises.push(pushups);

        let expected = "# Quick\n\n**Date:** 2024-03-02\n\n## Exercises\n\n### Push-up\n\n\
            | Set | Reps | Weight | Duration | Distance | Rest |\n\
            |-----|------|--------|----------|----------|------|\n\
            | 1 | 20 | - | - | - | - |\n\n";
        assert_eq!(encode(&workout), expected);
    }

    #[test]
    fn test_encode_skips_table_without_sets() {
        let text = encode(&leg_day());
        assert!(text.contains("### Stretching\n\n\n## Notes"));
        assert!(text.contains("**Duration:** 75 minutes\n"));
        assert!(text.contains("| 2 | 5 | 142.5 | - | - | - |\n"));
        assert!(text.contains("| 3 | - | - | - | - | - |\n"));
        assert!(text.contains("\n**Notes:** Belt on top sets\n"));
    }

    #[test]
    fn test_round_trip() {
        let workout = leg_day();
        let decoded = decode(&encode(&workout), "fallback").unwrap();

        assert_eq!(decoded.name, workout.name);
        assert_eq!(decoded.date, workout.date);
        assert_eq!(decoded.duration, workout.duration);
        assert_eq!(decoded.exercises, workout.exercises);
        assert_eq!(decoded.notes, workout.notes);
    }

    #[test]
    fn test_placeholder_is_not_zero() {
        let text = "# W\n\n### Plank\n\n| Set | Reps | Weight | Duration | Distance | Rest |\n|---|---|---|---|---|---|\n| 1 | 0 | - | 1.5 | - | 0 |\n";
        let workout = decode(text, "x").unwrap();
        let set = &workout.exercises[0].sets[0];

        assert_eq!(set.reps, Some(0));
        assert_eq!(set.weight, None);
        assert_eq!(set.duration, Some(1.5));
        assert_eq!(set.distance, None);
        assert_eq!(set.rest_time, Some(0.0));
    }

    #[test]
    fn test_zero_values_encode_as_zero() {
        let mut workout = Workout::new("W", "2024-01-01");
        let mut plank = Exercise::new("Plank");
        plank.sets.push(ExerciseSet {
            reps: Some(0),
            weight: Some(0.0),
            ..ExerciseSet::default()
        });
        workout.exercises.push(plank);

        assert!(encode(&workout).contains("| 1 | 0 | 0 | - | - | - |"));
    }

    #[test]
    fn test_decode_keeps_frontmatter_id() {
        let text = "---\nid: '1700000000000'\nname: Stale\n---\n\n# Fresh Name\n";
        let workout = decode(text, "x").unwrap();
        assert_eq!(workout.id, "1700000000000");
        assert_eq!(workout.name, "Fresh Name");
    }

    #[test]
    fn test_decode_without_structure() {
        assert_eq!(decode("Just some thoughts.\n\n## Ideas\n", "x"), None);
        assert_eq!(decode("", "x"), None);
    }

    #[test]
    fn test_decode_fallbacks() {
        let workout = decode("### Rowing\n\nEasy pace\n", "2024-05-05-Row").unwrap();

        assert_eq!(workout.name, "2024-05-05-Row");
        assert_eq!(workout.date, time_utils::today_string());
        assert_eq!(workout.duration, None);
        assert_eq!(workout.notes, None);
        assert_eq!(workout.exercises.len(), 1);
        assert!(workout.exercises[0].sets.is_empty());
        assert!(!workout.id.is_empty());
    }

    #[test]
    fn test_decode_tolerates_hand_edits() {
        let text = "# Pull Day  \n\n**Date:**  2024-04-01 \n**Duration:** 50.5 minutes\n\n\
            ### Deadlift\n\n\
            | Set | Reps | Weight | Duration | Distance | Rest |\n\
            |:---:|------|--------|----------|----------|------|\n\
            | 1 | 5 | 180 kg | - | - | 3\n\
            | 2 | five | 180 | | | |\n\
            | 3 | 5 |\n\
            **Notes:** grip gave out\n\
            ### Row\n\
            | 1 | 8.9 | 60 | - | - | - |\n";
        let workout = decode(text, "x").unwrap();

        assert_eq!(workout.name, "Pull Day");
        assert_eq!(workout.date, "2024-04-01");
        assert_eq!(workout.duration, Some(50.5));

        let deadlift = &workout.exercises[0];
        assert_eq!(deadlift.sets.len(), 2);
        assert_eq!(deadlift.sets[0].weight, Some(180.0));
        assert_eq!(deadlift.sets[0].rest_time, Some(3.0));
        assert_eq!(deadlift.sets[1].reps, None);
        assert_eq!(deadlift.sets[1].weight, Some(180.0));
        assert_eq!(deadlift.notes.as_deref(), Some("grip gave out"));

        let row = &workout.exercises[1];
        assert_eq!(row.sets[0].reps, Some(8));
    }

    #[test]
    fn test_headings_in_notes_are_not_exercises() {
        let text = "# W\n\n## Exercises\n\n### Squat\n\n## Notes\n\n### Not an exercise\nmore\n";
        let workout = decode(text, "x").unwrap();

        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(
            workout.notes.as_deref(),
            Some("### Not an exercise\nmore")
        );
    }

    #[test]
    fn test_exercise_notes_span_lines() {
        let text = "# W\n\n## Exercises\n\n### Squat\n\n\
            | Set | Reps | Weight | Duration | Distance | Rest |\n\
            |-----|------|--------|----------|----------|------|\n\
            | 1 | 5 | 100 | - | - | - |\n\n\
            **Notes:** Paused reps\n\
            Elbows tucked\n\n\
            | 9 | 9 | 9 | 9 | 9 | 9 |\n\n\
            ### Row\n";
        let workout = decode(text, "x").unwrap();

        let squat = &workout.exercises[0];
        assert_eq!(squat.sets.len(), 1);
        assert_eq!(
            squat.notes.as_deref(),
            Some("Paused reps\nElbows tucked\n\n| 9 | 9 | 9 | 9 | 9 | 9 |")
        );
        assert_eq!(workout.exercises[1].notes, None);
    }

    #[test]
    fn test_header_lines_are_not_read_from_exercises() {
        let text = "# W\n\n## Exercises\n\n### Plank\n\n\
            **Notes:** **Duration:** 5 minutes\n\
            **Date:** 2020-01-01\n";
        let workout = decode(text, "x").unwrap();

        assert_eq!(workout.duration, None);
        assert_eq!(workout.date, time_utils::today_string());
        assert!(workout.exercises[0]
            .notes
            .as_deref()
            .is_some_and(|n| n.starts_with("**Duration:** 5 minutes")));
    }

    #[test]
    fn test_encode_trims_notes() {
        let mut workout = leg_day();
        workout.notes = Some("\n  ".to_string());
        workout.exercises[0].notes = Some("  Belt on\n".to_string());

        let text = encode(&workout);
        assert!(!text.contains(NOTES_HEADING));
        assert!(text.contains("\n**Notes:** Belt on\n\n"));
    }

    #[test]
    fn test_unmatched_duration_is_absent() {
        let workout = decode("# W\n\n**Duration:** about an hour\n", "x").unwrap();
        assert_eq!(workout.duration, None);
    }
}
