// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default HTTP port for the API server
const DEFAULT_HTTP_PORT: u16 = 8081;

/// Default JWT expiry in hours
const DEFAULT_JWT_EXPIRY_HOURS: u64 = 24;

/// Default Gemini model for plan generation
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Default base URL for the Generative Language API
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default base URL for the ElevenLabs API
pub const DEFAULT_TTS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default ElevenLabs voice (same voice the original app shipped with)
pub const DEFAULT_TTS_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Default ElevenLabs model id
pub const DEFAULT_TTS_MODEL_ID: &str = "eleven_monolingual_v1";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose debugging
    Debug,
    /// Maximum verbosity
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and other configurations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated testing
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where workout and profile data lives
    pub url: DatabaseUrl,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT lifetime in hours
    pub jwt_expiry_hours: u64,
}

/// Generative-AI provider configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key for the Generative Language API
    pub api_key: Option<String>,
    /// Model used for plan generation
    pub model: String,
    /// API base URL
    pub base_url: String,
}

/// Text-to-speech provider configuration
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// ElevenLabs API key
    pub api_key: Option<String>,
    /// Voice identifier
    pub voice_id: String,
    /// TTS model identifier
    pub model_id: String,
    /// API base URL
    pub base_url: String,
}

/// CORS configuration for browser clients
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; empty means permissive (any origin)
    pub allowed_origins: Vec<String>,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Generative-AI settings
    pub llm: LlmConfig,
    /// Text-to-speech settings
    pub tts: TtsConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse (e.g. a non-numeric
    /// `HTTP_PORT`). Unset variables fall back to defaults; missing external
    /// API keys are tolerated at startup and reported when first used.
    pub fn from_env() -> Result<Self> {
        let http_port = match env::var("HTTP_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .with_context(|| format!("invalid HTTP_PORT value: {port}"))?,
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        );

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/wodforge.db".into());

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(hours) => hours
                .parse::<u64>()
                .with_context(|| format!("invalid JWT_EXPIRY_HOURS value: {hours}"))?,
            Err(_) => DEFAULT_JWT_EXPIRY_HOURS,
        };

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_owned())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            http_port,
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&database_url),
            },
            auth: AuthConfig { jwt_expiry_hours },
            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY").ok(),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.into()),
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.into()),
            },
            tts: TtsConfig {
                api_key: env::var("ELEVENLABS_API_KEY").ok(),
                voice_id: env::var("ELEVENLABS_VOICE_ID")
                    .unwrap_or_else(|_| DEFAULT_TTS_VOICE_ID.into()),
                model_id: env::var("ELEVENLABS_MODEL_ID")
                    .unwrap_or_else(|_| DEFAULT_TTS_MODEL_ID.into()),
                base_url: env::var("ELEVENLABS_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_TTS_BASE_URL.into()),
            },
            cors: CorsConfig { allowed_origins },
        })
    }

    /// One-line startup summary for the logs, with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} env={} db={} llm_model={} llm_key={} tts_voice={} tts_key={}",
            self.http_port,
            self.environment,
            self.database.url.to_connection_string(),
            self.llm.model,
            if self.llm.api_key.is_some() {
                "set"
            } else {
                "missing"
            },
            self.tts.voice_id,
            if self.tts.api_key.is_some() {
                "set"
            } else {
                "missing"
            },
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(matches!(
            DatabaseUrl::parse_url("sqlite::memory:"),
            DatabaseUrl::Memory
        ));
        let file = DatabaseUrl::parse_url("sqlite:./data/wodforge.db");
        assert_eq!(file.to_connection_string(), "sqlite:./data/wodforge.db");
        // Bare paths are treated as SQLite files
        let bare = DatabaseUrl::parse_url("/tmp/w.db");
        assert_eq!(bare.to_connection_string(), "sqlite:/tmp/w.db");
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("weird"),
            Environment::Development
        );
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("nope"), LogLevel::Info);
    }
}
