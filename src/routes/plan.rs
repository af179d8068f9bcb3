// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Onboarding, plan generation and the plan views.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{GeneratedPlan, OnboardingForm, UserProfile};
use crate::routes::api::require_profile;
use crate::services::calculator::{calculate, CalculatorItem, CalculatorResult};
use crate::services::plan_view::{
    nutrition_view, workout_view, NutritionContent, Section, WorkoutContent,
};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/onboarding", post(onboarding))
        .route("/api/plan", get(get_plan))
        .route("/api/plan/regenerate", post(regenerate_plan))
        .route("/api/plan/workout", get(get_workout))
        .route("/api/plan/nutrition", get(get_nutrition))
        .route("/api/nutrition/calculator", post(nutrition_calculator))
}

fn require_plan(state: &AppState, email: &str) -> Result<GeneratedPlan> {
    state.db.get_plan(email).ok_or(AppError::OnboardingRequired)
}

// ─── Generation ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct OnboardingResponse {
    pub profile: UserProfile,
    pub plan: GeneratedPlan,
}

/// Complete onboarding: generate the first plan, then store profile and plan.
///
/// Nothing is stored when generation fails, so the form can be resubmitted.
async fn onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<OnboardingForm>,
) -> Result<Json<OnboardingResponse>> {
    form.validate()?;
    let profile = form.into_profile();

    let plan = state.planner.generate_plan(&profile).await?;
    state
        .db
        .set_profile_and_plan(&user.email, &profile, &plan)
        .await?;

    tracing::info!(email = %user.email, "Onboarding complete");
    Ok(Json(OnboardingResponse { profile, plan }))
}

async fn get_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GeneratedPlan>> {
    Ok(Json(require_plan(&state, &user.email)?))
}

/// Replace the stored plan with a fresh one for the current profile.
/// The previous plan survives a failed attempt.
async fn regenerate_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GeneratedPlan>> {
    let profile = require_profile(&state, &user.email)?;

    let plan = state.planner.generate_plan(&profile).await?;
    state.db.set_plan(&user.email, &plan).await?;

    tracing::info!(email = %user.email, "Plan regenerated");
    Ok(Json(plan))
}

// ─── Views ───────────────────────────────────────────────────

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Section<WorkoutContent>>> {
    let plan = require_plan(&state, &user.email)?;
    Ok(Json(workout_view(&plan)))
}

async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Section<NutritionContent>>> {
    let plan = require_plan(&state, &user.email)?;
    Ok(Json(nutrition_view(&plan)))
}

#[derive(Debug, Deserialize)]
pub struct CalculatorRequest {
    #[serde(default)]
    pub items: Vec<CalculatorItem>,
}

async fn nutrition_calculator(Json(body): Json<CalculatorRequest>) -> Result<Json<CalculatorResult>> {
    Ok(Json(calculate(&body.items)?))
}
