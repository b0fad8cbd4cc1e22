// ABOUTME: Weekly plan generation orchestrator
// ABOUTME: Prompt build, model call, parse, persist, return in weekday order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::parser;
use crate::database::Database;
use crate::errors::AppError;
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{sort_into_week_order, Workout};

/// Orchestrates one weekly plan generation: prompt, model call, parse,
/// persist, return
pub struct WeeklyPlanGenerator {
    provider: Arc<dyn LlmProvider>,
    database: Database,
}

impl WeeklyPlanGenerator {
    /// Create a generator over the given provider and store
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, database: Database) -> Self {
        Self { provider, database }
    }

    /// Generate, persist, and return a full Monday-Friday plan
    ///
    /// The blank-prompt check runs before any external call so a sloppy
    /// request never burns model quota.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank request, an external-service
    /// error if the model call fails or its reply cannot be parsed, and a
    /// database error if persisting the week fails
    #[instrument(skip(self, user_request), fields(user.id = %user_id))]
    pub async fn generate_week(
        &self,
        user_id: Uuid,
        user_request: &str,
    ) -> Result<Vec<Workout>, AppError> {
        if user_request.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Please enter how you'd like to customize the weekly workouts",
            ));
        }

        let prompt = prompts::weekly_plan_prompt(user_request.trim());
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self.provider.complete(&request).await?;

        let days = parser::parse_weekly_plan(&response.content)?;

        let mut workouts: Vec<Workout> = days
            .into_iter()
            .map(|planned| Workout::new(user_id, planned.day, planned.sections))
            .collect();

        self.database
            .upsert_week(&workouts)
            .await
            .map_err(|e| AppError::database(format!("Failed to persist weekly plan: {e}")))?;

        sort_into_week_order(&mut workouts);

        info!(
            user.id = %user_id,
            model = %response.model,
            "Generated weekly workout plan"
        );

        Ok(workouts)
    }
}
