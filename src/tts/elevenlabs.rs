// ABOUTME: ElevenLabs text-to-speech HTTP client
// ABOUTME: Synthesizes MPEG audio and returns it base64-encoded for JSON transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use std::fmt::{Debug, Formatter, Result as FmtResult};

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::config::environment::TtsConfig;
use crate::errors::AppError;

/// Voice stability setting; the original product shipped with 0.5
const VOICE_STABILITY: f32 = 0.5;

/// Voice similarity boost; the original product shipped with 0.5
const VOICE_SIMILARITY_BOOST: f32 = 0.5;

/// Synthesis request body for the ElevenLabs API
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// Voice tuning parameters
#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs text-to-speech client
pub struct ElevenLabsClient {
    api_key: String,
    client: Client,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl ElevenLabsClient {
    /// Create a client from server configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn from_config(config: &TtsConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("ELEVENLABS_API_KEY environment variable not set"))?;
        Ok(Self {
            api_key,
            client: Client::new(),
            base_url: config.base_url.clone(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id.clone(),
        })
    }

    /// Synthesize speech for the given text and return base64 MPEG audio
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty text and an external-service
    /// error if the API call fails
    #[instrument(skip(self, text), fields(text.len = text.len(), voice = %self.voice_id))]
    pub async fn synthesize(&self, text: &str) -> Result<String, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::invalid_input("Text is required"));
        }

        let url = format!("{}/text-to-speech/{}", self.base_url, self.voice_id);
        let body = SynthesisRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        debug!("Sending synthesis request to ElevenLabs");

        let response = self
            .client
            .post(&url)
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service("elevenlabs", format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            error!(status = %status, error = %error_text, "ElevenLabs API error");
            return Err(AppError::external_service(
                "elevenlabs",
                "Failed to generate speech",
            ));
        }

        let audio = response.bytes().await.map_err(|e| {
            AppError::external_service("elevenlabs", format!("Failed to read audio: {e}"))
        })?;

        debug!(bytes = audio.len(), "Received synthesized audio");

        Ok(STANDARD.encode(&audio))
    }
}

impl Debug for ElevenLabsClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ElevenLabsClient")
            .field("base_url", &self.base_url)
            .field("voice_id", &self.voice_id)
            .field("model_id", &self.model_id)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
