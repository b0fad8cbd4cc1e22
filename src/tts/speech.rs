// ABOUTME: Rewrites workout text into speakable sentences
// ABOUTME: Expands notation (slashes, dashes, newlines) and assembles the narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use crate::models::Workout;

/// Rewrite one section of workout text for speech
///
/// `/` reads as an alternative, `-` as a range, newlines become sentence
/// breaks, and runs of whitespace collapse.
#[must_use]
pub fn format_for_speech(text: &str) -> String {
    let expanded = text
        .replace('/', " or ")
        .replace('-', " to ")
        .replace('\n', ". ");

    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Assemble the spoken narration for a full workout
///
/// The notes sentence is omitted when notes are empty so the narration never
/// trails off with "Important notes:" and silence.
#[must_use]
pub fn format_workout_speech(workout: &Workout) -> String {
    let mut narration = format!(
        "Today is {}. For warm up: {}. Workout of the day: {}.",
        workout.day,
        format_for_speech(&workout.warmup),
        format_for_speech(&workout.wod),
    );

    if !workout.notes.trim().is_empty() {
        narration.push_str(&format!(
            " Important notes: {}.",
            format_for_speech(&workout.notes)
        ));
    }

    narration
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::{Weekday, WorkoutSections};
    use uuid::Uuid;

    fn workout(warmup: &str, wod: &str, notes: &str) -> Workout {
        Workout::new(
            Uuid::new_v4(),
            Weekday::Monday,
            WorkoutSections {
                warmup: warmup.to_owned(),
                wod: wod.to_owned(),
                notes: notes.to_owned(),
            },
        )
    }

    #[test]
    fn slashes_read_as_alternatives_and_dashes_as_ranges() {
        assert_eq!(
            format_for_speech("21-15-9 thrusters/pull-ups"),
            "21 to 15 to 9 thrusters or pull to ups"
        );
    }

    #[test]
    fn newlines_become_sentence_breaks_and_whitespace_collapses() {
        assert_eq!(
            format_for_speech("Row 500m\n10   air squats\n"),
            "Row 500m. 10 air squats."
        );
    }

    #[test]
    fn narration_includes_day_and_all_sections() {
        let narration = format_workout_speech(&workout("row", "fran", "scale as needed"));
        assert_eq!(
            narration,
            "Today is Monday. For warm up: row. Workout of the day: fran. Important notes: scale as needed."
        );
    }

    #[test]
    fn empty_notes_omit_the_notes_sentence() {
        let narration = format_workout_speech(&workout("row", "fran", "   "));
        assert!(!narration.contains("Important notes"));
        assert!(narration.ends_with("Workout of the day: fran."));
    }
}
