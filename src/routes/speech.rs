// ABOUTME: Speech synthesis route handler
// ABOUTME: Formats workout text for narration and returns base64 MPEG audio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::tts::format_workout_speech;

/// Speech synthesis request
///
/// Either a workout id (the server formats the narration) or raw text.
#[derive(Debug, Deserialize)]
pub struct SpeechRequest {
    /// Workout to narrate
    #[serde(default)]
    pub workout_id: Option<Uuid>,
    /// Raw text to speak, used when no workout id is given
    #[serde(default)]
    pub text: Option<String>,
}

/// Speech synthesis response
#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    /// Base64-encoded MPEG audio
    #[serde(rename = "audioContent")]
    pub audio_content: String,
}

/// Speech routes implementation
pub struct SpeechRoutes;

impl SpeechRoutes {
    /// Create the speech route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/speech", post(Self::handle_speech))
            .with_state(resources)
    }

    async fn handle_speech(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<SpeechRequest>,
    ) -> Result<Response, AppError> {
        let session = resources.auth_middleware.authenticate(&headers).await?;

        let tts = resources
            .tts
            .as_ref()
            .ok_or_else(|| AppError::config("Text-to-speech is not configured"))?;

        let text = match (request.workout_id, request.text) {
            (Some(workout_id), _) => {
                let workout = resources
                    .database
                    .get_workout(session.user_id, workout_id)
                    .await
                    .map_err(|e| AppError::database(format!("Failed to load workout: {e}")))?
                    .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;
                format_workout_speech(&workout)
            }
            (None, Some(text)) => text,
            (None, None) => return Err(AppError::invalid_input("Text is required")),
        };

        let audio_content = tts.synthesize(&text).await?;

        Ok(Json(SpeechResponse { audio_content }).into_response())
    }
}
