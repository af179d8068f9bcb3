// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::RecipeCategory;
use crate::services::recipes::{
    craving_message, find_recipe, recommended_category, search_recipes, RecipeView,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Category value that disables filtering.
const ALL_CATEGORIES: &str = "Todos";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/{id}", get(get_recipe))
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    #[serde(default)]
    pub search: String,
    /// A category label or "Todos". Absent means "recommended for me".
    pub category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListResponse {
    /// Active category; `None` when every category is shown
    pub category: Option<RecipeCategory>,
    /// Whether the category came from the user's stated cravings
    pub recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub recipes: Vec<RecipeView>,
}

async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<RecipeListResponse>> {
    // Recipes do not need onboarding; without a profile there are no cravings
    let cravings = state
        .db
        .get_profile(&user.email)
        .and_then(|p| p.food_cravings);

    let (category, recommended) = match query.category.as_deref().map(str::trim) {
        None | Some("") => {
            let category = cravings.as_deref().and_then(recommended_category);
            (category, category.is_some())
        }
        Some(ALL_CATEGORIES) => (None, false),
        Some(label) => {
            let category = RecipeCategory::from_label(label)
                .ok_or_else(|| AppError::Validation(format!("Categoria desconhecida: {}", label)))?;
            (Some(category), false)
        }
    };

    let recommendation = category.and_then(|_| craving_message(cravings.as_deref()));

    Ok(Json(RecipeListResponse {
        category,
        recommended,
        recommendation,
        recipes: search_recipes(&query.search, category),
    }))
}

async fn get_recipe(Path(id): Path<String>) -> Result<Json<RecipeView>> {
    find_recipe(&id)
        .map(|r| Json(RecipeView::from(r)))
        .ok_or_else(|| AppError::NotFound(format!("Recipe {}", id)))
}
