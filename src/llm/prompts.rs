// ABOUTME: Prompt construction for weekly plans, full regeneration, and section agents
// ABOUTME: Coaching instructions and strict output-format contracts for the model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Prompt builders for workout generation.
//!
//! Every prompt ends with a strict output-format contract because parsing
//! downstream only accepts JSON (or bare content, for section agents).

use crate::models::{SectionKind, Weekday, WorkoutSections};

/// Build the weekly plan prompt from the user's customization request.
///
/// The user text is embedded verbatim; the surrounding coaching brief and
/// JSON format contract are fixed.
#[must_use]
pub fn weekly_plan_prompt(user_request: &str) -> String {
    format!(
        r#"You are an expert CrossFit coach creating a comprehensive Monday-Friday workout program.

User's request: {user_request}

Create a detailed 5-day workout plan following these principles:
1. Progressive Overload: Gradually increase intensity across the week
2. Movement Pattern Balance: Include pushing, pulling, squatting, hinging, and core work
3. Energy System Development: Mix cardio, strength, and skill work
4. Recovery Consideration: Alternate body parts and intensity levels

For each day, provide:
1. Warmup (10-15 minutes):
   - Movement preparation specific to the day's workout
   - Mobility work for key joints involved
   - Progressive intensity buildup

2. WOD (Workout of the Day):
   - Clear structure (AMRAP, For Time, EMOM, etc.)
   - Specific rep schemes and weights
   - Work-to-rest ratios
   - Target time domain

3. Coaching Notes:
   - Detailed movement standards
   - Scaling options for different fitness levels
   - Strategy recommendations
   - Safety considerations

Ensure all text is clear, concise, and free of markdown formatting.

IMPORTANT: Return ONLY a JSON array with exactly 5 workout objects, one for each weekday. Each object MUST have these fields: day (string), warmup (string), wod (string), and notes (string). Example format:
[
  {{
    "day": "Monday",
    "warmup": "warmup details",
    "wod": "workout details",
    "notes": "coaching notes"
  }}
]"#
    )
}

/// Build the full-workout regeneration prompt.
///
/// Asks for a JSON object with all three sections; the response is rejected
/// downstream if any field comes back empty.
#[must_use]
pub fn regenerate_workout_prompt(
    day: Weekday,
    current: &WorkoutSections,
    user_request: &str,
) -> String {
    format!(
        r#"You are an expert CrossFit coach modifying a workout for {day}.
The user wants to: {user_request}

Current workout structure:
Warm-up: {warmup}
WOD: {wod}
Notes: {notes}

Respond with a valid JSON object containing exactly these three fields:
{{
  "warmup": "detailed warm-up plan",
  "wod": "workout of the day",
  "notes": "specific coaching notes"
}}

All fields must be non-empty strings. Only include the JSON object, no additional text."#,
        warmup = current.warmup,
        wod = current.wod,
        notes = current.notes,
    )
}

/// Build a single-section agent prompt.
///
/// The agent sees the whole current workout for context but is instructed to
/// return only the requested section's content, as bare text.
#[must_use]
pub fn section_agent_prompt(
    section: SectionKind,
    day: Weekday,
    current: &WorkoutSections,
    user_request: &str,
) -> String {
    let focus = match section {
        SectionKind::Wod => "WOD (Workout of the Day)",
        SectionKind::Warmup => "warmup",
        SectionKind::Notes => "notes",
    };

    let instruction = match section {
        SectionKind::Warmup => {
            "Generate a warmup routine that specifically prepares athletes for the current WOD while incorporating the user's modification request."
        }
        SectionKind::Wod => {
            "Create a WOD (Workout of the Day) that aligns with CrossFit principles and the user's modification request."
        }
        SectionKind::Notes => {
            "Provide coaching notes, scaling options, and tips specific to this workout considering the user's modification request."
        }
    };

    format!(
        r"You are a specialized CrossFit coach focusing on {focus} programming.
Current workout for {day}:
Warmup: {warmup}
WOD: {wod}
Notes: {notes}

User wants to modify the workout: {user_request}
{instruction}

Respond with only the content, no additional text or formatting.",
        warmup = current.warmup,
        wod = current.wod,
        notes = current.notes,
    )
}
