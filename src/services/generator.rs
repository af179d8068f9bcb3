// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text generation seam.
//!
//! Everything that talks to the external generator goes through
//! [`TextGenerator`], so the plan pipeline and the coach features can be
//! exercised against a scripted generator in tests.

use crate::error::AppError;
use async_trait::async_trait;

/// One generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// JSON schema for structured output. When set, JSON output is requested.
    pub response_schema: Option<serde_json::Value>,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Plain text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }
}

/// External AI text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `request`. An empty string means the model produced nothing.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;
}
