// ABOUTME: Configuration module organization for the Wodforge server
// ABOUTME: Environment-only configuration, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Configuration management
//!
//! All runtime configuration comes from environment variables; there is no
//! configuration file format. See [`environment::ServerConfig::from_env`].

/// Environment-based configuration management
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseUrl, Environment, LlmConfig, LogLevel, ServerConfig, TtsConfig,
};
