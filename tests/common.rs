// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, auth, resources, and scripted-provider helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `wodforge`

use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use wodforge::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    models::{User, Weekday, Workout, WorkoutSections},
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory SQLite, migrated)
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    let jwt_secret = wodforge::auth::generate_jwt_secret().to_vec();
    AuthManager::new(jwt_secret, 24)
}

/// Create and persist a test user
pub async fn create_test_user(database: &Database) -> Result<User> {
    let unique = uuid::Uuid::new_v4().simple().to_string();
    let user = User::new(
        format!("athlete-{unique}@example.com"),
        bcrypt::hash("testpassword", 4)?,
        Some("Test Athlete".into()),
    );
    database.create_user(&user).await?;
    Ok(user)
}

/// A full starter week of workouts for the given user
pub fn sample_week(user_id: uuid::Uuid) -> Vec<Workout> {
    Weekday::ALL
        .into_iter()
        .map(|day| {
            Workout::new(
                user_id,
                day,
                WorkoutSections {
                    warmup: format!("{day} warmup"),
                    wod: format!("{day} wod"),
                    notes: format!("{day} notes"),
                },
            )
        })
        .collect()
}

/// An LLM provider that replays scripted responses, recording the prompts
pub struct ScriptedProvider {
    responses: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Provider that returns the given responses in order
    pub fn new(responses: Vec<String>) -> Self {
        let mut reversed = responses;
        reversed.reverse();
        Self {
            responses: Mutex::new(reversed),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Provider that always fails with an external-service error
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        let content = self
            .responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AppError::external_service("scripted", "no scripted response left"))?;

        Ok(ChatResponse {
            content,
            model: "scripted-1".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// A plausible weekly plan response wrapped in prose and a code fence
pub fn scripted_week_response() -> String {
    let days: Vec<String> = Weekday::ALL
        .iter()
        .map(|day| {
            format!(
                r#"{{"day": "{day}", "warmup": "{day} rowing", "wod": "{day} AMRAP", "notes": "{day} pacing"}}"#
            )
        })
        .collect();
    format!(
        "Here is your personalized plan!\n```json\n[{}]\n```\nHave a great week.",
        days.join(",\n")
    )
}

/// Build server resources over an in-memory database and a scripted provider
pub async fn create_test_resources(provider: Arc<dyn LlmProvider>) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    let config = Arc::new(ServerConfig::from_env()?);

    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        provider,
        None,
        config,
    )))
}
