// ABOUTME: Shared server resources container passed to all route handlers
// ABOUTME: Bundles the database, auth, LLM provider, TTS client, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Central resource container created once at startup and shared behind an
//! `Arc` across every route handler. Resources are constructed eagerly so a
//! misconfigured server fails at boot, not on the first request.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::llm::LlmProvider;
use crate::middleware::AuthMiddleware;
use crate::tts::ElevenLabsClient;

/// All long-lived server state shared across request handlers
pub struct ServerResources {
    /// Database handle (pooled, cheap to clone)
    pub database: Database,
    /// Token issuing and validation
    pub auth_manager: AuthManager,
    /// Request authentication middleware
    pub auth_middleware: AuthMiddleware,
    /// Plan generation provider
    pub llm: Arc<dyn LlmProvider>,
    /// Text-to-speech client, absent when no API key is configured
    pub tts: Option<ElevenLabsClient>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle startup-constructed resources for sharing across handlers
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        llm: Arc<dyn LlmProvider>,
        tts: Option<ElevenLabsClient>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());
        Self {
            database,
            auth_manager,
            auth_middleware,
            llm,
            tts,
            config,
        }
    }
}

impl std::fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerResources")
            .field("llm", &self.llm.name())
            .field("tts", &self.tts.is_some())
            .finish_non_exhaustive()
    }
}
