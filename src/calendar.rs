// ABOUTME: iCalendar export of the current training week
// ABOUTME: One all-day VEVENT per workout, anchored to the ISO week of export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Calendar Export
//!
//! Renders a user's week as an RFC 5545 `text/calendar` document. Workouts
//! carry a weekday label, not a date; events are anchored to the ISO week of
//! the export moment so "Monday" lands on this week's Monday.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::models::Workout;

/// Product identifier embedded in exported calendars
const PRODID: &str = "-//Wodforge//Workout Planner//EN";

/// Escape text for an iCalendar property value
///
/// Backslash first, then the characters RFC 5545 reserves; newlines become
/// the literal `\n` sequence.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

/// Fold a content line to RFC 5545's 75-octet limit
///
/// Continuation lines start with a single space. Splits on character
/// boundaries, so multi-byte content folds slightly short of the limit.
fn fold_line(line: &str) -> String {
    const LIMIT: usize = 73;

    if line.len() <= 75 {
        return line.to_owned();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / LIMIT * 3);
    let mut budget = 75usize;
    let mut current = 0usize;

    for c in line.chars() {
        let width = c.len_utf8();
        if current + width > budget {
            folded.push_str("\r\n ");
            current = 0;
            budget = LIMIT;
        }
        folded.push(c);
        current += width;
    }

    folded
}

/// Monday of the ISO week containing `moment`
fn week_monday(moment: DateTime<Utc>) -> NaiveDate {
    moment.date_naive().week(chrono::Weekday::Mon).first_day()
}

/// Render a week of workouts as an iCalendar document
///
/// Each workout becomes an all-day event on its weekday within the ISO week
/// of `now`. Lines use CRLF endings as the format requires.
#[must_use]
pub fn render_week_ics(workouts: &[Workout], now: DateTime<Utc>) -> String {
    let monday = week_monday(now);
    let stamp = now.format("%Y%m%dT%H%M%SZ");

    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_owned(),
    ];

    for workout in workouts {
        let offset = u64::try_from(workout.day.index()).unwrap_or(0);
        let start = monday + Days::new(offset);
        let end = start + Days::new(1);

        let description = format!(
            "Warmup: {}\nWOD: {}\nNotes: {}",
            workout.warmup, workout.wod, workout.notes
        );

        lines.push("BEGIN:VEVENT".to_owned());
        lines.push(format!("UID:{}@wodforge", workout.id));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")));
        lines.push(format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
        lines.push(format!("SUMMARY:{} Workout", workout.day));
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
        lines.push("END:VEVENT".to_owned());
    }

    lines.push("END:VCALENDAR".to_owned());

    let mut document = String::new();
    for line in lines {
        document.push_str(&fold_line(&line));
        document.push_str("\r\n");
    }
    document
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::models::{Weekday, WorkoutSections};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn workout_with(day: Weekday, wod: &str) -> Workout {
        Workout::new(
            Uuid::new_v4(),
            day,
            WorkoutSections {
                warmup: "Row 500m".to_owned(),
                wod: wod.to_owned(),
                notes: "scale; as, needed".to_owned(),
            },
        )
    }

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_text("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
    }

    #[test]
    fn events_land_on_the_iso_week_of_export() {
        // 2025-01-15 is a Wednesday; Monday of that ISO week is 2025-01-13
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let workouts = vec![
            workout_with(Weekday::Monday, "fran"),
            workout_with(Weekday::Friday, "murph"),
        ];

        let ics = render_week_ics(&workouts, now);
        assert!(ics.contains("DTSTART;VALUE=DATE:20250113"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250117"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250118"));
        assert!(ics.contains("SUMMARY:Monday Workout"));
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn long_descriptions_are_folded() {
        let long_wod = "Thrusters ".repeat(30);
        let ics = render_week_ics(
            &[workout_with(Weekday::Monday, &long_wod)],
            Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        );
        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "line too long: {line}");
        }
    }
}
