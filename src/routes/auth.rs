// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account authentication routes.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::Result;
use crate::middleware::auth::{create_jwt, removal_cookie, session_cookie};
use crate::models::profile::trimmed;
use crate::models::{SessionUser, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/google", post(google_login))
        .route("/auth/logout", post(logout))
}

/// Registration form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Preencha todos os campos obrigatórios"))]
    pub email: String,
    #[validate(length(min = 1, message = "Preencha todos os campos obrigatórios"))]
    pub password: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Digite seu nome completo"))]
    pub name: String,
}

/// Login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Preencha todos os campos obrigatórios"))]
    pub email: String,
    #[validate(length(min = 1, message = "Preencha todos os campos obrigatórios"))]
    pub password: String,
}

/// Issued session.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    /// Bearer token; the same value is set as the session cookie
    pub token: String,
    pub user: SessionUser,
}

/// Cookies are `Secure` unless the frontend is served over plain HTTP.
fn secure_cookies(state: &AppState) -> bool {
    state.config.frontend_url.starts_with("https://")
}

/// Sign `user` in: mint a token and attach the session cookie.
fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&user.email, &state.config.jwt_signing_key)?;
    let jar = jar.add(session_cookie(token.clone(), secure_cookies(state)));

    Ok((
        jar,
        Json(SessionResponse {
            token,
            user: SessionUser::from(user),
        }),
    ))
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state
        .accounts
        .register(&body.email, &body.password, &body.name)
        .await?;

    let (jar, session) = start_session(&state, jar, &user)?;
    Ok((StatusCode::CREATED, jar, session))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let user = state.accounts.login(&body.email, &body.password).await?;
    tracing::info!(email = %user.email, "Login");

    start_session(&state, jar, &user)
}

async fn google_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let user = state.accounts.login_with_google().await?;

    start_session(&state, jar, &user)
}

/// Drops the client session only. Stored data is kept for the next login.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(removal_cookie(secure_cookies(&state))),
        StatusCode::NO_CONTENT,
    )
}
