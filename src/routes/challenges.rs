// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge catalog and session routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Challenge;
use crate::services::challenges::{catalog, find_challenge, ChallengeProgress};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/challenges", get(list_challenges))
        .route(
            "/api/challenges/session",
            get(get_session).delete(stop_session),
        )
        .route(
            "/api/challenges/session/exercises/{index}",
            post(toggle_exercise),
        )
        .route("/api/challenges/{id}", get(get_challenge))
        .route("/api/challenges/{id}/start", post(start_challenge))
}

async fn list_challenges() -> Json<&'static [Challenge]> {
    Json(catalog())
}

async fn get_challenge(Path(id): Path<String>) -> Result<Json<&'static Challenge>> {
    find_challenge(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Challenge {}", id)))
}

async fn start_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeProgress>> {
    Ok(Json(state.challenges.start(&user.email, &id).await?))
}

/// Running session, or `null`.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Option<ChallengeProgress>>> {
    Ok(Json(state.challenges.current(&user.email)?))
}

async fn toggle_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(index): Path<usize>,
) -> Result<Json<ChallengeProgress>> {
    Ok(Json(
        state.challenges.toggle_exercise(&user.email, index).await?,
    ))
}

#[derive(Serialize)]
pub struct StopResponse {
    pub stopped: bool,
}

async fn stop_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StopResponse>> {
    let stopped = state.challenges.stop(&user.email).await?;
    Ok(Json(StopResponse { stopped }))
}
