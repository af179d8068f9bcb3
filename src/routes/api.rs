// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users: account, profile and progress.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{SessionUser, UserGoal, UserProfile, WeightEntry};
use crate::services::progress::{weight_progress, WeightProgress};
use crate::time_utils::today;
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const GOALS_INCOMPLETE_MESSAGE: &str =
    "Por favor, preencha todas as informações antes de continuar.";

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/account", delete(delete_account))
        .route("/api/data", delete(delete_data))
        .route("/api/profile", get(get_profile).put(put_profile))
        .route("/api/profile/goals", put(put_goals))
        .route("/api/profile/weight", post(log_weight))
        .route("/api/progress", get(get_progress))
}

/// Stored profile, or `OnboardingRequired` when there is none.
pub(crate) fn require_profile(state: &AppState, email: &str) -> Result<UserProfile> {
    state
        .db
        .get_profile(email)
        .ok_or(AppError::OnboardingRequired)
}

// ─── Current User ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: SessionUser,
    pub has_profile: bool,
    pub has_plan: bool,
}

/// Get the signed-in account and whether onboarding is done.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let account = state
        .db
        .get_user(&user.email)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.email)))?;

    Ok(Json(MeResponse {
        user: SessionUser::from(&account),
        has_profile: state.db.get_profile(&user.email).is_some(),
        has_plan: state.db.get_plan(&user.email).is_some(),
    }))
}

// ─── Data & Account Deletion ─────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    /// Number of per-user records removed
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub removed: usize,
    pub account_deleted: bool,
}

/// Erase every `{email}_*` record. The account remains.
async fn delete_data(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.db.delete_user_data(&user.email).await?;
    Ok(Json(DeleteResponse {
        removed,
        account_deleted: false,
    }))
}

/// Erase all data and the account record.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.accounts.delete_account(&user.email).await?;
    Ok(Json(DeleteResponse {
        removed,
        account_deleted: true,
    }))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    Ok(Json(require_profile(&state, &user.email)?))
}

/// Replace the profile. The plan is left as is until the user regenerates it.
async fn put_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>> {
    if profile.name.trim().is_empty() {
        return Err(AppError::Validation("Informe seu nome.".to_string()));
    }
    if profile.weight <= 0.0 || profile.height <= 0.0 {
        return Err(AppError::Validation("Peso e altura devem ser positivos.".to_string()));
    }

    state.db.set_profile(&user.email, &profile).await?;
    tracing::info!(email = %user.email, "Profile updated");
    Ok(Json(profile))
}

/// Goal settings form. Goal, weight and target weight are mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsRequest {
    pub goal: Option<UserGoal>,
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub deadline: Option<u32>,
    pub reminders: Option<bool>,
}

async fn put_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GoalsRequest>,
) -> Result<Json<UserProfile>> {
    let positive = |v: Option<f64>| v.filter(|w| *w > 0.0);
    let (Some(goal), Some(weight), Some(target_weight)) =
        (body.goal, positive(body.weight), positive(body.target_weight))
    else {
        return Err(AppError::Validation(GOALS_INCOMPLETE_MESSAGE.to_string()));
    };

    let profile = state
        .db
        .update_profile(&user.email, |profile| {
            profile.goal = goal;
            profile.weight = weight;
            profile.target_weight = Some(target_weight);
            profile.deadline = body.deadline.or(profile.deadline);
            profile.reminders = body.reminders.or(profile.reminders);
            Ok(())
        })
        .await?;
    Ok(Json(profile))
}

/// Weight log entry. `date` defaults to today.
#[derive(Debug, Deserialize, Validate)]
pub struct WeightRequest {
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "Peso inválido."))]
    pub weight: f64,
    #[serde(default)]
    pub date: Option<String>,
}

async fn log_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<WeightRequest>,
) -> Result<Json<UserProfile>> {
    body.validate()?;

    let date = body
        .date
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);

    let profile = state
        .db
        .update_profile(&user.email, |profile| {
            profile
                .weight_history
                .get_or_insert_with(Vec::new)
                .push(WeightEntry {
                    date,
                    weight: body.weight,
                });
            profile.weight = body.weight;
            Ok(())
        })
        .await?;
    Ok(Json(profile))
}

// ─── Progress ────────────────────────────────────────────────

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeightProgress>> {
    let profile = require_profile(&state, &user.email)?;
    Ok(Json(weight_progress(&profile)))
}
