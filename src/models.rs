// ABOUTME: Common data models for users, profiles, and workout plans
// ABOUTME: Defines Weekday ordering, workout sections, and history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Data Models
//!
//! Core domain types shared across the database layer, orchestrators, and
//! HTTP routes. A weekly plan is exactly five [`Workout`] records, one per
//! [`Weekday`] Monday through Friday; each workout carries three free-text
//! sections (warm-up, WOD, coaching notes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password for authentication
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time user accessed the system
    pub last_active: DateTime<Utc>,
    /// Whether the user account is active
    pub is_active: bool,
}

impl User {
    /// Create a new user with a fresh id and current timestamps
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            created_at: now,
            last_active: now,
            is_active: true,
        }
    }
}

/// The five planning weekdays, in program order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
}

impl Weekday {
    /// All planning weekdays in order
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Day label as stored in the workouts table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }

    /// Zero-based position within the week (Monday = 0)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
        }
    }

    /// Weekday at the given position, wrapping past Friday
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 5]
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Monday" => Ok(Self::Monday),
            "Tuesday" => Ok(Self::Tuesday),
            "Wednesday" => Ok(Self::Wednesday),
            "Thursday" => Ok(Self::Thursday),
            "Friday" => Ok(Self::Friday),
            other => Err(format!("not a planning weekday: {other}")),
        }
    }
}

/// The three editable sections of a daily workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Movement preparation before the main block
    Warmup,
    /// Workout of the Day, the main exercise block
    Wod,
    /// Coaching notes, scaling options, and tips
    Notes,
}

impl SectionKind {
    /// Column name in the workouts table
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Wod => "wod",
            Self::Notes => "notes",
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The three text sections of a daily workout, without identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSections {
    /// Warm-up routine
    pub warmup: String,
    /// Workout of the Day
    pub wod: String,
    /// Coaching notes
    pub notes: String,
}

impl WorkoutSections {
    /// True when every section is non-empty after trimming
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.warmup.trim().is_empty()
            && !self.wod.trim().is_empty()
            && !self.notes.trim().is_empty()
    }
}

/// A persisted daily workout record, scoped to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Weekday this workout belongs to
    pub day: Weekday,
    /// Warm-up routine
    pub warmup: String,
    /// Workout of the Day
    pub wod: String,
    /// Coaching notes
    pub notes: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new workout record with a fresh id and current timestamps
    #[must_use]
    pub fn new(user_id: Uuid, day: Weekday, sections: WorkoutSections) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            day,
            warmup: sections.warmup,
            wod: sections.wod,
            notes: sections.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of the three sections of this workout
    #[must_use]
    pub fn sections(&self) -> WorkoutSections {
        WorkoutSections {
            warmup: self.warmup.clone(),
            wod: self.wod.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Sort workouts into weekday order (Monday first) for presentation
pub fn sort_into_week_order(workouts: &mut [Workout]) {
    workouts.sort_by_key(|w| w.day.index());
}

/// A record of one WOD regeneration, kept for history tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutHistoryEntry {
    /// Unique history entry identifier
    pub id: Uuid,
    /// The workout that was regenerated
    pub workout_id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// The modification request that drove the regeneration
    pub prompt: String,
    /// WOD text before regeneration
    pub previous_wod: String,
    /// WOD text after regeneration
    pub new_wod: String,
    /// When the regeneration happened
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_ordering() {
        let mut days = vec![Weekday::Friday, Weekday::Monday, Weekday::Wednesday];
        days.sort();
        assert_eq!(
            days,
            vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]
        );
    }

    #[test]
    fn test_weekday_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(day.label().parse::<Weekday>().unwrap(), day);
            assert_eq!(Weekday::from_index(day.index()), day);
        }
        assert!("Saturday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_sections_completeness() {
        let complete = WorkoutSections {
            warmup: "3 rounds of air squats".into(),
            wod: "21-15-9 thrusters".into(),
            notes: "keep elbows high".into(),
        };
        assert!(complete.is_complete());

        let missing_notes = WorkoutSections {
            notes: "   ".into(),
            ..complete
        };
        assert!(!missing_notes.is_complete());
    }

    #[test]
    fn test_sort_into_week_order() {
        let user_id = Uuid::new_v4();
        let sections = WorkoutSections {
            warmup: "w".into(),
            wod: "x".into(),
            notes: "n".into(),
        };
        let mut workouts = vec![
            Workout::new(user_id, Weekday::Thursday, sections.clone()),
            Workout::new(user_id, Weekday::Monday, sections.clone()),
            Workout::new(user_id, Weekday::Friday, sections),
        ];
        sort_into_week_order(&mut workouts);
        let days: Vec<Weekday> = workouts.iter().map(|w| w.day).collect();
        assert_eq!(
            days,
            vec![Weekday::Monday, Weekday::Thursday, Weekday::Friday]
        );
    }
}
