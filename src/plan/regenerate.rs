// ABOUTME: Workout regeneration orchestrator for full workouts and single sections
// ABOUTME: Persists atomically and records WOD history when the WOD changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::parser;
use crate::database::Database;
use crate::errors::AppError;
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{SectionKind, Workout};

/// Orchestrates regeneration of an existing workout, whole or per section
pub struct WorkoutRegenerator {
    provider: Arc<dyn LlmProvider>,
    database: Database,
}

impl WorkoutRegenerator {
    /// Create a regenerator over the given provider and store
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, database: Database) -> Self {
        Self { provider, database }
    }

    /// Regenerate all three sections of one workout
    ///
    /// The three sections are written in a single UPDATE so a failure never
    /// leaves a half-regenerated workout. WOD history is recorded only when
    /// the WOD text actually changed.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank request or empty regenerated
    /// fields, an external-service error for an unparseable model response,
    /// `not_found` when the workout does not exist or belongs to another
    /// user, and store errors otherwise
    #[instrument(skip(self, user_request), fields(user.id = %user_id, workout.id = %workout_id))]
    pub async fn regenerate_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        user_request: &str,
    ) -> Result<Workout, AppError> {
        if user_request.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Please describe how you'd like to modify the workout",
            ));
        }

        let current = self
            .database
            .get_workout(user_id, workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;

        let prompt =
            prompts::regenerate_workout_prompt(current.day, &current.sections(), user_request.trim());
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self.provider.complete(&request).await?;

        let sections = parser::parse_regenerated_sections(&response.content)?;

        let updated = self
            .database
            .update_sections(user_id, workout_id, &sections)
            .await
            .map_err(|e| AppError::database(format!("Failed to persist regeneration: {e}")))?;
        if !updated {
            return Err(AppError::not_found(format!("workout {workout_id}")));
        }

        if sections.wod != current.wod {
            self.database
                .save_workout_history(workout_id, user_id, user_request.trim(), &current.wod, &sections.wod)
                .await
                .map_err(|e| AppError::database(format!("Failed to record WOD history: {e}")))?;
        } else {
            debug!("WOD unchanged after regeneration, skipping history entry");
        }

        info!(day = %current.day, "Regenerated workout");

        Ok(Workout {
            warmup: sections.warmup,
            wod: sections.wod,
            notes: sections.notes,
            ..current
        })
    }

    /// Regenerate a single section of one workout
    ///
    /// The section agent sees the full current workout for context but only
    /// its own section is rewritten. WOD regenerations are recorded in
    /// history like full regenerations.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank request or an empty model
    /// response, `not_found` when the workout does not exist or belongs to
    /// another user, and store errors otherwise
    #[instrument(skip(self, user_request), fields(user.id = %user_id, workout.id = %workout_id, section = %section))]
    pub async fn regenerate_section(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        section: SectionKind,
        user_request: &str,
    ) -> Result<Workout, AppError> {
        if user_request.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Please describe how you'd like to modify the workout",
            ));
        }

        let current = self
            .database
            .get_workout(user_id, workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;

        let prompt =
            prompts::section_agent_prompt(section, current.day, &current.sections(), user_request.trim());
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self.provider.complete(&request).await?;

        let content = parser::sanitize(&response.content);
        if content.is_empty() {
            return Err(AppError::invalid_input(
                "Invalid or empty workout fields received",
            ));
        }

        let updated = self
            .database
            .update_section(user_id, workout_id, section, &content)
            .await
            .map_err(|e| AppError::database(format!("Failed to persist section: {e}")))?;
        if !updated {
            return Err(AppError::not_found(format!("workout {workout_id}")));
        }

        if section == SectionKind::Wod && content != current.wod {
            self.database
                .save_workout_history(workout_id, user_id, user_request.trim(), &current.wod, &content)
                .await
                .map_err(|e| AppError::database(format!("Failed to record WOD history: {e}")))?;
        }

        info!(day = %current.day, "Regenerated workout section");

        let mut result = current;
        match section {
            SectionKind::Warmup => result.warmup = content,
            SectionKind::Wod => result.wod = content,
            SectionKind::Notes => result.notes = content,
        }
        Ok(result)
    }
}
