// ABOUTME: User authentication route handlers for registration, login, and refresh
// ABOUTME: Thin REST wrappers over the AuthService business logic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! Authentication routes for account management
//!
//! Handlers are thin wrappers that delegate to [`AuthService`]. Login and
//! refresh return the same response shape so clients treat a refreshed
//! session exactly like a fresh one.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthManager;
use crate::database::Database;
use crate::errors::AppError;
use crate::models::User;
use crate::resources::ServerResources;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address, used for login
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    /// Optional display name
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Identifier of the created account
    pub user_id: String,
    /// Human-readable confirmation
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// User info embedded in login responses
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User identifier
    pub user_id: String,
    /// Email address
    pub email: String,
    /// Display name when set
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub jwt_token: String,
    /// Token expiry, RFC 3339
    pub expires_at: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    /// The current (possibly expired) token
    pub token: String,
    /// The user the token was issued to
    pub user_id: String,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    auth_manager: AuthManager,
    database: Database,
}

impl AuthService {
    /// Create the service over the shared auth manager and store
    #[must_use]
    pub const fn new(auth_manager: AuthManager, database: Database) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad email or weak password and a
    /// conflict-style error when the email is taken
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AppError> {
        info!("User registration attempt for email: {}", request.email);

        if !Self::is_valid_email(&request.email) {
            return Err(AppError::invalid_input("Invalid email format"));
        }

        if !Self::is_valid_password(&request.password) {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters",
            ));
        }

        if let Ok(Some(_)) = self.database.get_user_by_email(&request.email).await {
            return Err(AppError::invalid_input("Email is already registered"));
        }

        // Hashing is CPU-bound; keep it off the async executor
        let password = request.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password hashing error: {e}")))?;

        let user = User::new(request.email.clone(), password_hash, request.display_name);

        let user_id = self
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        // Bootstrap the profile at registration so first fetch has one less
        // race to win
        self.database
            .ensure_profile(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to create profile: {e}")))?;

        info!(
            "User registered successfully: {} ({})",
            request.email, user_id
        );

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns an authentication error for unknown emails and wrong
    /// passwords, indistinguishably
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        info!("User login attempt for email: {}", request.email);

        let user = self
            .database
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        // Verify password off the async executor
        let password = request.password.clone();
        let password_hash = user.password_hash.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            warn!("Invalid password for user: {}", request.email);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        if !user.is_active {
            return Err(AppError::auth_invalid("Account is deactivated"));
        }

        self.database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last_active: {e}")))?;

        let jwt_token = self
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
        let expires_at = self.auth_manager.token_expiry();

        info!("User logged in successfully: {} ({})", request.email, user.id);

        Ok(LoginResponse {
            jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Handle token refresh
    ///
    /// Accepts an expired token as long as it was issued to the requesting
    /// user; the account must still exist and be active.
    ///
    /// # Errors
    ///
    /// Returns an authentication error for tokens issued to another user or
    /// accounts that no longer exist
    pub async fn refresh_token(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<LoginResponse, AppError> {
        let user_id = Uuid::parse_str(&request.user_id)
            .map_err(|_| AppError::invalid_input("Invalid user_id"))?;

        let user = self
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
            .ok_or_else(|| AppError::not_found("User"))?;

        if !user.is_active {
            return Err(AppError::auth_invalid("Account is deactivated"));
        }

        let new_jwt_token = self
            .auth_manager
            .refresh_token(&request.token, &user)
            .map_err(|e| AppError::auth_invalid(format!("Token refresh failed: {e}")))?;
        let expires_at = self.auth_manager.token_expiry();

        self.database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last_active: {e}")))?;

        info!("Token refreshed successfully for user: {}", user.id);

        Ok(LoginResponse {
            jwt_token: new_jwt_token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        })
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() <= 5 {
            return false;
        }
        let Some(at_pos) = email.find('@') else {
            return false;
        };
        if at_pos == 0 || at_pos == email.len() - 1 {
            return false;
        }
        let domain_part = &email[at_pos + 1..];
        domain_part.contains('.')
    }

    /// Validate password strength
    #[must_use]
    pub const fn is_valid_password(password: &str) -> bool {
        password.len() >= 8
    }
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/refresh", post(Self::handle_refresh))
            .with_state(resources)
    }

    fn service(resources: &ServerResources) -> AuthService {
        AuthService::new(resources.auth_manager.clone(), resources.database.clone())
    }

    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).login(request).await?;
        Ok(Json(response).into_response())
    }

    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RefreshTokenRequest>,
    ) -> Result<Response, AppError> {
        let response = Self::service(&resources).refresh_token(request).await?;
        Ok(Json(response).into_response())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(AuthService::is_valid_email("athlete@example.com"));
        assert!(!AuthService::is_valid_email("a@b"));
        assert!(!AuthService::is_valid_email("@example.com"));
        assert!(!AuthService::is_valid_email("no-at-sign.com"));
        assert!(!AuthService::is_valid_email("trailing@"));
    }

    #[test]
    fn password_validation() {
        assert!(AuthService::is_valid_password("longenough"));
        assert!(!AuthService::is_valid_password("short"));
    }
}
