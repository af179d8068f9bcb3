// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily quote and supplement chat.

use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/quote", get(daily_quote))
        .route("/api/supplements/chat", post(supplement_chat))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct QuoteResponse {
    pub quote: String,
}

async fn daily_quote(State(state): State<Arc<AppState>>) -> Json<QuoteResponse> {
    Json(QuoteResponse {
        quote: state.coach.daily_quote().await,
    })
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Prior turns, oldest first, already labelled by the client
    #[serde(default)]
    pub history: Vec<String>,
    pub message: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChatResponse {
    pub reply: String,
}

async fn supplement_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Digite sua dúvida.".to_string()));
    }

    let reply = state.coach.supplement_chat(&body.history, message).await;
    Ok(Json(ChatResponse { reply }))
}
