// ABOUTME: Main library entry point for the Wodforge workout planning API
// ABOUTME: Exposes auth, storage, plan orchestration, TTS, and the HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

#![deny(unsafe_code)]

//! # Wodforge
//!
//! An AI-assisted weekly workout planning API. The server owns user accounts
//! and session tokens, stores Monday-Friday workout plans in SQLite, and
//! orchestrates two external services: Google Gemini for plan generation and
//! regeneration, and ElevenLabs for spoken workout narration.
//!
//! ## Architecture
//!
//! - **Models**: Weekday-ordered workout plans and their three sections
//! - **Database**: SQLite storage with idempotent profile bootstrap
//! - **Plan**: Prompt construction, response parsing, generation flows
//! - **TTS**: Speech formatting and ElevenLabs synthesis
//! - **Routes**: The REST surface, assembled in [`server`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wodforge::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Wodforge configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// Used by the binaries (src/bin/) and integration tests (tests/).

/// Session token generation and validation
pub mod auth;

/// iCalendar export of the training week
pub mod calendar;

/// Configuration management
pub mod config;

/// SQLite storage for users, profiles, workouts, and history
pub mod database;

/// Error types and HTTP error mapping
pub mod errors;

/// LLM provider abstraction and the Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Request middleware: authentication and CORS
pub mod middleware;

/// Core domain models
pub mod models;

/// Plan generation and regeneration orchestration
pub mod plan;

/// Shared server resources container
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly and serving
pub mod server;

/// Text-to-speech synthesis
pub mod tts;
