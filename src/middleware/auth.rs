// ABOUTME: Request authentication middleware for the HTTP API
// ABOUTME: Extracts bearer tokens, validates sessions, and confirms the account is live
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

use axum::http::HeaderMap;
use tracing::{debug, warn};

use crate::auth::{AuthManager, JwtValidationError, SessionUser};
use crate::database::Database;
use crate::errors::AppError;

/// Authentication middleware shared by all protected routes
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: AuthManager,
    database: Database,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Access to the wrapped auth manager (token issuing lives there)
    #[must_use]
    pub const fn auth_manager(&self) -> &AuthManager {
        &self.auth_manager
    }

    /// Authenticate a request from its headers
    ///
    /// Validates the bearer token, confirms the account still exists and is
    /// active, and touches `last_active`.
    ///
    /// # Errors
    ///
    /// Returns `auth_required` when no bearer token is present and
    /// `auth_invalid`/`auth_expired` when validation fails
    #[tracing::instrument(skip(self, headers), fields(user.id = tracing::field::Empty))]
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<SessionUser, AppError> {
        let auth_header = headers
            .get("authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))?;

        let session = self
            .auth_manager
            .session_from_token(token)
            .map_err(map_jwt_validation_error)?;

        tracing::Span::current().record("user.id", session.user_id.to_string());

        let user = self
            .database
            .get_user(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
            .ok_or_else(|| {
                warn!(user.id = %session.user_id, "Valid token for unknown user");
                AppError::auth_invalid("Account no longer exists")
            })?;

        if !user.is_active {
            return Err(AppError::auth_invalid("Account is deactivated"));
        }

        // Best effort; an authenticated request should not fail on bookkeeping
        if let Err(e) = self.database.update_last_active(session.user_id).await {
            debug!(user.id = %session.user_id, error = %e, "Failed to touch last_active");
        }

        Ok(session)
    }
}

/// Map token validation failures onto API errors
fn map_jwt_validation_error(error: JwtValidationError) -> AppError {
    match error {
        JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
        JwtValidationError::TokenInvalid { .. } | JwtValidationError::TokenMalformed { .. } => {
            AppError::auth_invalid(error.to_string())
        }
    }
}
