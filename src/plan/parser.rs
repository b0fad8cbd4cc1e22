// ABOUTME: Extraction and normalization of workout JSON from model prose
// ABOUTME: Balanced-delimiter scanning, markdown stripping, defaults, and padding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Model responses wrap JSON in prose and markdown fences. This module
//! extracts the first JSON array or object with a string-aware balanced
//! scan, then normalizes the payload: markdown control characters stripped,
//! whitespace trimmed, missing fields defaulted, and weekly plans padded or
//! truncated to exactly five days.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Weekday, WorkoutSections};

/// Placeholder warmup for days the model failed to produce
const DEFAULT_WARMUP: &str = "Default warmup routine";
/// Placeholder WOD for days the model failed to produce
const DEFAULT_WOD: &str = "Default workout of the day";
/// Placeholder notes for days the model failed to produce
const DEFAULT_NOTES: &str = "Default coaching notes";

/// One day of a parsed weekly plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDay {
    /// Weekday this entry belongs to
    pub day: Weekday,
    /// Sanitized section content
    pub sections: WorkoutSections,
}

/// Raw weekly plan entry as the model emits it; every field is optional
/// because models drop fields under pressure
#[derive(Debug, Deserialize)]
struct RawDay {
    #[serde(default)]
    day: Option<String>,
    #[serde(default)]
    warmup: Option<String>,
    #[serde(default)]
    wod: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Raw regenerated sections; `warmUp` is accepted as an alias because older
/// model snapshots camel-case the field
#[derive(Debug, Deserialize)]
struct RawSections {
    #[serde(default, alias = "warmUp")]
    warmup: Option<String>,
    #[serde(default)]
    wod: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

/// Strip markdown control characters and trim
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '#' | '`'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Extract the first balanced JSON array or object starting at `open`
///
/// String-aware: delimiters inside JSON strings (and escaped quotes) do not
/// count toward the balance.
fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract the first JSON array from model prose
#[must_use]
pub fn extract_json_array(text: &str) -> Option<&str> {
    extract_balanced(text, '[', ']')
}

/// Extract the first JSON object from model prose
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    extract_balanced(text, '{', '}')
}

/// Parse a weekly plan response into exactly five normalized days
///
/// Day labels that are missing or unrecognizable fall back to the entry's
/// position; short plans are padded with placeholder workouts and long plans
/// truncated, so callers always receive Monday through Friday.
///
/// # Errors
///
/// Returns an external-service error if no JSON array is present or the
/// array fails to parse; an unusable reply is the model's fault, not the
/// caller's
pub fn parse_weekly_plan(text: &str) -> Result<Vec<PlannedDay>, AppError> {
    let json = extract_json_array(text).ok_or_else(|| {
        AppError::external_service("gemini", "Could not find valid JSON array in AI response")
    })?;

    let raw: Vec<RawDay> = serde_json::from_str(json).map_err(|e| {
        AppError::external_service("gemini", format!("Failed to parse AI response: {e}"))
    })?;

    let mut days: Vec<PlannedDay> = raw
        .into_iter()
        .take(Weekday::ALL.len())
        .enumerate()
        .map(|(index, entry)| {
            let day = entry
                .day
                .as_deref()
                .map(str::trim)
                .and_then(|label| label.parse::<Weekday>().ok())
                .unwrap_or_else(|| Weekday::from_index(index));

            let field = |value: Option<String>, fallback: &str| {
                let cleaned = value.as_deref().map(sanitize).unwrap_or_default();
                if cleaned.is_empty() {
                    fallback.to_owned()
                } else {
                    cleaned
                }
            };

            PlannedDay {
                day,
                sections: WorkoutSections {
                    warmup: field(entry.warmup, "No warmup provided"),
                    wod: field(entry.wod, "No workout provided"),
                    notes: field(entry.notes, "No notes provided"),
                },
            }
        })
        .collect();

    while days.len() < Weekday::ALL.len() {
        let day = Weekday::from_index(days.len());
        days.push(PlannedDay {
            day,
            sections: WorkoutSections {
                warmup: DEFAULT_WARMUP.to_owned(),
                wod: DEFAULT_WOD.to_owned(),
                notes: DEFAULT_NOTES.to_owned(),
            },
        });
    }

    Ok(days)
}

/// Parse a full-workout regeneration response
///
/// # Errors
///
/// Returns an external-service error if no JSON object is present or the
/// object fails to parse, and a validation error when any of the three
/// sections comes back empty
pub fn parse_regenerated_sections(text: &str) -> Result<WorkoutSections, AppError> {
    let json = extract_json_object(text).ok_or_else(|| {
        AppError::external_service("gemini", "Could not find valid JSON object in AI response")
    })?;

    let raw: RawSections = serde_json::from_str(json).map_err(|e| {
        AppError::external_service("gemini", format!("Failed to parse AI response: {e}"))
    })?;

    let sections = WorkoutSections {
        warmup: raw.warmup.as_deref().map(sanitize).unwrap_or_default(),
        wod: raw.wod.as_deref().map(sanitize).unwrap_or_default(),
        notes: raw.notes.as_deref().map(sanitize).unwrap_or_default(),
    };

    if !sections.is_complete() {
        return Err(AppError::invalid_input(
            "Invalid or empty workout fields received",
        ));
    }

    Ok(sections)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_markdown_controls() {
        assert_eq!(sanitize("**3 rounds** of `burpees` #fun _yes_"), "3 rounds of burpees fun yes");
        assert_eq!(sanitize("  plain text  "), "plain text");
    }

    #[test]
    fn extracts_array_from_surrounding_prose() {
        let text = "Here is your plan:\n```json\n[{\"day\": \"Monday\"}]\n```\nEnjoy!";
        assert_eq!(extract_json_array(text), Some("[{\"day\": \"Monday\"}]"));
    }

    #[test]
    fn balanced_scan_ignores_brackets_inside_strings() {
        let text = "noise {\"wod\": \"5x5 [heavy] squats\", \"notes\": \"ok\"} trailing";
        assert_eq!(
            extract_json_object(text),
            Some("{\"wod\": \"5x5 [heavy] squats\", \"notes\": \"ok\"}")
        );
    }

    #[test]
    fn reply_without_json_is_an_upstream_error() {
        let err = parse_weekly_plan("Sorry, I cannot help with that.").unwrap_err();
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn malformed_json_is_an_upstream_error() {
        let err = parse_weekly_plan(r#"[{"day": "Monday", "wod": }]"#).unwrap_err();
        assert_eq!(err.http_status(), 502);

        let err = parse_regenerated_sections("no object here at all").unwrap_err();
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn short_plan_is_padded_to_five_days() {
        let text = r#"[
            {"day": "Monday", "warmup": "row", "wod": "fran", "notes": "scale"},
            {"day": "Tuesday", "warmup": "bike", "wod": "cindy", "notes": "pace"}
        ]"#;
        let days = parse_weekly_plan(text).unwrap();
        assert_eq!(days.len(), 5);
        assert_eq!(days[2].day, Weekday::Wednesday);
        assert_eq!(days[4].sections.wod, DEFAULT_WOD);
    }

    #[test]
    fn long_plan_is_truncated_to_five_days() {
        let entries: Vec<String> = (0..7)
            .map(|i| format!(r#"{{"day": "Day{i}", "warmup": "w", "wod": "x", "notes": "n"}}"#))
            .collect();
        let text = format!("[{}]", entries.join(","));
        let days = parse_weekly_plan(&text).unwrap();
        assert_eq!(days.len(), 5);
        // Unrecognizable labels fall back to position
        assert_eq!(days[0].day, Weekday::Monday);
        assert_eq!(days[4].day, Weekday::Friday);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let text = r#"[{"day": "Monday", "wod": "**murph**"}]"#;
        let days = parse_weekly_plan(text).unwrap();
        assert_eq!(days[0].sections.warmup, "No warmup provided");
        assert_eq!(days[0].sections.wod, "murph");
        assert_eq!(days[0].sections.notes, "No notes provided");
    }

    #[test]
    fn regenerated_sections_require_all_three_fields() {
        let ok = parse_regenerated_sections(
            r#"{"warmup": "row", "wod": "fran", "notes": "scale"}"#,
        )
        .unwrap();
        assert_eq!(ok.wod, "fran");

        let err = parse_regenerated_sections(r#"{"warmup": "row", "wod": "", "notes": "scale"}"#)
            .unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn regenerated_sections_accept_camel_case_warmup() {
        let ok = parse_regenerated_sections(
            r#"{"warmUp": "jumping jacks", "wod": "amrap", "notes": "breathe"}"#,
        )
        .unwrap();
        assert_eq!(ok.warmup, "jumping jacks");
    }
}
