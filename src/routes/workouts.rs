// ABOUTME: Workout route handlers: weekly fetch, generation, edits, regeneration
// ABOUTME: Also serves per-workout history and the calendar export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Workout routes
//!
//! The weekly fetch performs the full reconciliation contract: session
//! verification, profile ensure-or-create, weekday-filtered query, and a
//! `first_run` flag for empty results. Everything else delegates to the plan
//! orchestrators and the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calendar;
use crate::errors::AppError;
use crate::models::{sort_into_week_order, SectionKind, Workout, WorkoutHistoryEntry};
use crate::plan::{WeeklyPlanGenerator, WorkoutRegenerator};
use crate::resources::ServerResources;

/// Weekly fetch response
#[derive(Debug, Serialize)]
pub struct WeekResponse {
    /// Workouts in weekday order, empty on first run
    pub workouts: Vec<Workout>,
    /// True when the user has no workouts yet; distinct from an error
    pub first_run: bool,
    /// True when this request created the user's profile
    pub profile_created: bool,
}

/// Weekly generation request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text customization request for the week
    pub prompt: String,
}

/// Manual section edit request
#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    /// Which section to replace
    pub section: SectionKind,
    /// New section content
    pub value: String,
}

/// Regeneration request; omitting `section` regenerates the whole workout
#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    /// Free-text modification request
    pub prompt: String,
    /// Target section, or all three when absent
    #[serde(default)]
    pub section: Option<SectionKind>,
}

/// History listing response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Regeneration records, newest first
    pub entries: Vec<WorkoutHistoryEntry>,
}

/// Workout routes implementation
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", get(Self::handle_fetch_week))
            .route("/api/workouts/generate", post(Self::handle_generate))
            .route("/api/workouts/calendar.ics", get(Self::handle_calendar))
            .route("/api/workouts/:id", patch(Self::handle_update_section))
            .route("/api/workouts/:id/regenerate", post(Self::handle_regenerate))
            .route("/api/workouts/:id/history", get(Self::handle_history))
            .with_state(resources)
    }

    /// Weekly fetch with profile reconciliation
    ///
    /// An empty week is a normal outcome for a new user, reported as
    /// `first_run: true` with HTTP 200; only genuine store failures become
    /// errors.
    async fn handle_fetch_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        let profile_status = resources
            .database
            .ensure_profile(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("Profile bootstrap failed: {e}")))?;

        let mut workouts = resources
            .database
            .list_week(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workouts: {e}")))?;

        let first_run = workouts.is_empty();
        if first_run {
            debug!(user.id = %session.user_id, "No workouts yet, first run");
        }

        sort_into_week_order(&mut workouts);

        Ok(Json(WeekResponse {
            workouts,
            first_run,
            profile_created: profile_status.was_created(),
        })
        .into_response())
    }

    /// Generate a fresh Monday-Friday plan
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<GenerateRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        resources
            .database
            .ensure_profile(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("Profile bootstrap failed: {e}")))?;

        let generator =
            WeeklyPlanGenerator::new(resources.llm.clone(), resources.database.clone());
        let workouts = generator
            .generate_week(session.user_id, &request.prompt)
            .await?;

        Ok((StatusCode::CREATED, Json(workouts)).into_response())
    }

    /// Manually replace one section of a workout
    async fn handle_update_section(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<Uuid>,
        headers: HeaderMap,
        Json(request): Json<UpdateSectionRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        if request.value.trim().is_empty() {
            return Err(AppError::invalid_input("Section content cannot be empty"));
        }

        let updated = resources
            .database
            .update_section(
                session.user_id,
                workout_id,
                request.section,
                request.value.trim(),
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to update section: {e}")))?;

        if !updated {
            return Err(AppError::not_found(format!("workout {workout_id}")));
        }

        let workout = resources
            .database
            .get_workout(session.user_id, workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;

        info!(user.id = %session.user_id, workout.id = %workout_id, section = %request.section, "Section updated");

        Ok(Json(workout).into_response())
    }

    /// Regenerate a workout, whole or per section
    async fn handle_regenerate(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<Uuid>,
        headers: HeaderMap,
        Json(request): Json<RegenerateRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        let regenerator =
            WorkoutRegenerator::new(resources.llm.clone(), resources.database.clone());

        let workout = match request.section {
            Some(section) => {
                regenerator
                    .regenerate_section(session.user_id, workout_id, section, &request.prompt)
                    .await?
            }
            None => {
                regenerator
                    .regenerate_workout(session.user_id, workout_id, &request.prompt)
                    .await?
            }
        };

        Ok(Json(workout).into_response())
    }

    /// List regeneration history for one workout
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Path(workout_id): Path<Uuid>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        // Scope check before the history query so foreign ids read as 404
        resources
            .database
            .get_workout(session.user_id, workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;

        let entries = resources
            .database
            .list_workout_history(session.user_id, workout_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load history: {e}")))?;

        Ok(Json(HistoryResponse { entries }).into_response())
    }

    /// Export the current week as an iCalendar document
    async fn handle_calendar(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        let mut workouts = resources
            .database
            .list_week(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load workouts: {e}")))?;
        sort_into_week_order(&mut workouts);

        let document = calendar::render_week_ics(&workouts, chrono::Utc::now());

        Ok((
            [
                (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"wodforge-week.ics\"",
                ),
            ],
            document,
        )
            .into_response())
    }
}
