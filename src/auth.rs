// ABOUTME: JWT-based user authentication and session management
// ABOUTME: Handles token generation, validation, and refresh for the session bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge

//! # Authentication and Session Management
//!
//! This module is the session bridge for the rest of the server: it issues
//! HS256 JWTs at login and validates them on every authenticated request,
//! reporting expiry, signature, and malformation failures distinctly so the
//! HTTP layer can map them to the right status codes.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// Audience claim for tokens issued by this server
const TOKEN_AUDIENCE: &str = "wodforge-api";

/// Length of a generated JWT secret in bytes
const JWT_SECRET_LEN: usize = 64;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let expired_for = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} ago at {}",
                    humanize_duration(expired_for),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// An authenticated session as seen by request handlers
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Email carried in the token
    pub email: String,
}

/// Authentication manager for session tokens
#[derive(Clone)]
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub const fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            aud: TOKEN_AUDIENCE.into(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )?;
        Ok(token)
    }

    /// When a token generated now would expire
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] distinguishing expiry from signature
    /// failure from malformation
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        ) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(Self::map_jwt_error(&e, token)),
        }
    }

    /// Validate a token and resolve it to a session user
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is rejected or its
    /// subject is not a UUID
    pub fn session_from_token(&self, token: &str) -> Result<SessionUser, JwtValidationError> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| JwtValidationError::TokenInvalid {
            reason: "subject claim is not a user id".into(),
        })?;
        Ok(SessionUser {
            user_id,
            email: claims.email,
        })
    }

    /// Refresh a token: accept a valid or recently expired token and issue a
    /// new one for the same user
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid for any reason other than
    /// expiry, or if encoding the replacement fails
    pub fn refresh_token(&self, token: &str, user: &User) -> Result<String> {
        match self.validate_token(token) {
            Ok(claims) if claims.sub == user.id.to_string() => self.generate_token(user),
            Ok(_) => Err(anyhow::anyhow!("token does not belong to this user")),
            Err(JwtValidationError::TokenExpired { .. }) => {
                // Expired tokens can still be exchanged, the caller has
                // already re-authenticated the user against the database
                self.generate_token(user)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Map a jsonwebtoken error into the detailed validation error
    fn map_jwt_error(error: &jsonwebtoken::errors::Error, token: &str) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;

        match error.kind() {
            ErrorKind::ExpiredSignature => {
                let expired_at = extract_expiry_unverified(token)
                    .unwrap_or_else(|| Utc.timestamp_opt(0, 0).single().unwrap_or_default());
                JwtValidationError::TokenExpired {
                    expired_at,
                    current_time: Utc::now(),
                }
            }
            ErrorKind::InvalidSignature | ErrorKind::InvalidAudience => {
                JwtValidationError::TokenInvalid {
                    reason: error.to_string(),
                }
            }
            _ => JwtValidationError::TokenMalformed {
                details: error.to_string(),
            },
        }
    }
}

/// Pull the exp claim out of a token without verifying the signature, for
/// expiry reporting only
fn extract_expiry_unverified(token: &str) -> Option<DateTime<Utc>> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = value.get("exp")?.as_i64()?;
    Utc.timestamp_opt(exp, 0).single()
}

/// Generate a random JWT secret suitable for HS256
#[must_use]
pub fn generate_jwt_secret() -> [u8; JWT_SECRET_LEN] {
    let mut secret = [0u8; JWT_SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "athlete@example.com".into(),
            "hashed_password_123".into(),
            Some("Test Athlete".into()),
        )
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(generate_jwt_secret().to_vec(), 24)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.email, "athlete@example.com");
        assert_eq!(claims.sub, user.id.to_string());
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_session_from_token() {
        let manager = test_manager();
        let user = test_user();
        let token = manager.generate_token(&user).unwrap();

        let session = manager.session_from_token(&token).unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.email, user.email);
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let user = test_user();
        let token = test_manager().generate_token(&user).unwrap();

        let other = test_manager();
        let err = other.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenInvalid { .. }));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let manager = test_manager();
        let err = manager.validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, JwtValidationError::TokenMalformed { .. }));
    }

    #[test]
    fn test_expired_token_reports_expiry() {
        let manager = AuthManager::new(generate_jwt_secret().to_vec(), -1);
        let user = test_user();
        let token = manager.generate_token(&user).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        match err {
            JwtValidationError::TokenExpired { expired_at, .. } => {
                assert!(expired_at < Utc::now());
            }
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn test_refresh_rejects_foreign_token() {
        let manager = test_manager();
        let owner = test_user();
        let stranger = test_user();
        let token = manager.generate_token(&owner).unwrap();

        assert!(manager.refresh_token(&token, &stranger).is_err());
        assert!(manager.refresh_token(&token, &owner).is_ok());
    }
}
