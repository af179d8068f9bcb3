// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account and session tests.
//!
//! These tests verify that:
//! 1. Registration and login follow the account rules
//! 2. Protected routes reject requests without valid sessions
//! 3. CORS preflight requests return correct headers
//! 4. Every response carries the hardening headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitlife_pro::middleware::auth::create_jwt;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_register_returns_session_user() {
    let app = common::create_test_app();

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123", "name": "Ana"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["user"],
        json!({"email": "a@b.com", "name": "Ana", "provider": "local"})
    );
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // The stored record carries a hash, never the password itself
    let stored = app.state.db.get_user("a@b.com").unwrap();
    assert!(stored
        .password_hash
        .as_deref()
        .is_some_and(|h| h.starts_with("$argon2")));
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = common::create_test_app();
    app.register("a@b.com", "pw123", "Ana").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "other", "name": "Outra"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_account");
    assert_eq!(body["details"], "Este e-mail já está cadastrado.");
    assert_eq!(app.state.db.get_users().len(), 1);
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = common::create_test_app();
    let form = json!({"email": "race@b.com", "password": "pw", "name": "Race"});

    let (first, second) = tokio::join!(
        app.send("POST", "/auth/register", None, Some(form.clone())),
        app.send("POST", "/auth/register", None, Some(form.clone())),
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(app.state.db.get_users().len(), 1);
}

#[tokio::test]
async fn test_login_with_bad_credentials_creates_no_session() {
    let app = common::create_test_app();
    app.register("a@b.com", "pw123", "Ana").await;

    for (email, password) in [("a@b.com", "wrong"), ("nobody@b.com", "pw123")] {
        let (status, body) = app
            .send(
                "POST",
                "/auth/login",
                None,
                Some(json!({"email": email, "password": password})),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_credentials");
        assert_eq!(body["details"], "E-mail ou senha incorretos.");
        assert!(body.get("token").is_none());
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = common::create_test_app();
    app.register("a@b.com", "pw123", "Ana").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, me) = app.send("GET", "/api/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@b.com");
    assert_eq!(me["hasProfile"], false);
    assert_eq!(me["hasPlan"], false);
}

#[tokio::test]
async fn test_register_missing_name() {
    let app = common::create_test_app();

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123", "name": ""})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Digite seu nome completo");
}

#[tokio::test]
async fn test_google_login_is_idempotent() {
    let app = common::create_test_app();

    let (status, first) = app.send("POST", "/auth/google", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["user"]["email"], "usuario.google@gmail.com");
    assert_eq!(first["user"]["provider"], "google");
    assert!(first["user"]["avatar"].is_string());

    let (status, _) = app.send("POST", "/auth/google", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.state.db.get_users().len(), 1);
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = common::create_test_app();

    let (status, body) = app.send("GET", "/api/plan", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let app = common::create_test_app();

    let (status, body) = app
        .send("GET", "/api/plan", Some("invalid.token.here"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_valid_token_for_unknown_account() {
    let app = common::create_test_app();
    let token = create_jwt("ghost@b.com", &app.state.config.jwt_signing_key).unwrap();

    let (status, _) = app.send("GET", "/api/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = common::create_test_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/plan")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let app = common::create_test_app();

    let (status, body) = app.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["persistent"], false);
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let app = common::create_test_app();

    for uri in ["/health", "/api/me"] {
        let response = app
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff", "{}", uri);
        assert_eq!(headers["x-frame-options"], "DENY", "{}", uri);
        assert_eq!(headers["cache-control"], "no-store", "{}", uri);
        assert!(headers.contains_key("content-security-policy"));
    }
}

#[tokio::test]
async fn test_register_rejects_blank_name() {
    let app = common::create_test_app();

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123", "name": "   "})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Digite seu nome completo");
    assert!(app.state.db.get_user("a@b.com").is_none());

    let (status, body) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"email": "a@b.com", "password": "pw123", "name": "  Ana "})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], "Ana");
}
