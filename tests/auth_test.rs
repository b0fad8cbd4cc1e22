// ABOUTME: Integration tests for registration, login, and token refresh
// ABOUTME: Exercises AuthService against an in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Wodforge
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use wodforge::routes::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use wodforge::routes::AuthService;

async fn service() -> AuthService {
    let database = common::create_test_database().await.unwrap();
    AuthService::new(common::create_test_auth_manager(), database)
}

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_owned(),
        password: "strongpassword".to_owned(),
        display_name: Some("Test Athlete".to_owned()),
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let service = service().await;

    let registered = service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap();
    assert!(!registered.user_id.is_empty());

    let login = service
        .login(LoginRequest {
            email: "athlete@example.com".to_owned(),
            password: "strongpassword".to_owned(),
        })
        .await
        .unwrap();

    assert!(!login.jwt_token.is_empty());
    assert_eq!(login.user.email, "athlete@example.com");
    assert_eq!(login.user.user_id, registered.user_id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let service = service().await;

    service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap();
    let err = service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn invalid_email_and_weak_password_are_rejected() {
    let service = service().await;

    let mut bad_email = register_request("not-an-email");
    bad_email.email = "not-an-email".to_owned();
    assert_eq!(
        service.register(bad_email).await.unwrap_err().http_status(),
        400
    );

    let mut weak = register_request("athlete@example.com");
    weak.password = "short".to_owned();
    assert_eq!(service.register(weak).await.unwrap_err().http_status(), 400);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let service = service().await;
    service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap();

    let wrong_password = service
        .login(LoginRequest {
            email: "athlete@example.com".to_owned(),
            password: "wrongpassword".to_owned(),
        })
        .await
        .unwrap_err();

    let unknown_email = service
        .login(LoginRequest {
            email: "nobody@example.com".to_owned(),
            password: "strongpassword".to_owned(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.http_status(), 401);
    assert_eq!(unknown_email.http_status(), 401);
}

#[tokio::test]
async fn refresh_issues_a_new_token_for_the_same_user() {
    let service = service().await;
    service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap();

    let login = service
        .login(LoginRequest {
            email: "athlete@example.com".to_owned(),
            password: "strongpassword".to_owned(),
        })
        .await
        .unwrap();

    let refreshed = service
        .refresh_token(RefreshTokenRequest {
            token: login.jwt_token,
            user_id: login.user.user_id.clone(),
        })
        .await
        .unwrap();

    assert_eq!(refreshed.user.user_id, login.user.user_id);
    assert!(!refreshed.jwt_token.is_empty());
}

#[tokio::test]
async fn refresh_with_a_foreign_token_is_rejected() {
    let service = service().await;
    service
        .register(register_request("alice@example.com"))
        .await
        .unwrap();
    let bob = service
        .register(register_request("bob@example.com"))
        .await
        .unwrap();

    let alice_login = service
        .login(LoginRequest {
            email: "alice@example.com".to_owned(),
            password: "strongpassword".to_owned(),
        })
        .await
        .unwrap();

    let err = service
        .refresh_token(RefreshTokenRequest {
            token: alice_login.jwt_token,
            user_id: bob.user_id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn registration_bootstraps_the_profile() {
    let database = common::create_test_database().await.unwrap();
    let service = AuthService::new(common::create_test_auth_manager(), database.clone());

    let registered = service
        .register(register_request("athlete@example.com"))
        .await
        .unwrap();
    let user_id = registered.user_id.parse().unwrap();

    assert!(database.profile_exists(user_id).await.unwrap());
}
