// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("No plan stored for this user")]
    OnboardingRequired,

    #[error("Generator did not respond in time")]
    GeneratorTimeout,

    #[error("Generator returned malformed plan JSON")]
    PlanFormat,

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const DUPLICATE_ACCOUNT_MESSAGE: &'static str = "Este e-mail já está cadastrado.";
    pub const INVALID_CREDENTIALS_MESSAGE: &'static str = "E-mail ou senha incorretos.";
    pub const GENERATOR_TIMEOUT_MESSAGE: &'static str =
        "A IA está demorando muito para responder. Verifique sua conexão e tente novamente.";
    pub const PLAN_FORMAT_MESSAGE: &'static str =
        "Erro ao processar o formato do plano. Tente novamente.";
    pub const GENERATOR_RETRY_MESSAGE: &'static str =
        "Ocorreu um erro ao gerar seu plano. Tente novamente.";
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first human-readable message, falling back to the field name
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Campo inválido: {}", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Dados inválidos.".to_string());
        AppError::Validation(message)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                Some(Self::INVALID_CREDENTIALS_MESSAGE.to_string()),
            ),
            AppError::DuplicateAccount => (
                StatusCode::CONFLICT,
                "duplicate_account",
                Some(Self::DUPLICATE_ACCOUNT_MESSAGE.to_string()),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::OnboardingRequired => {
                (StatusCode::NOT_FOUND, "onboarding_required", None)
            }
            AppError::GeneratorTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "generator_timeout",
                Some(Self::GENERATOR_TIMEOUT_MESSAGE.to_string()),
            ),
            AppError::PlanFormat => (
                StatusCode::BAD_GATEWAY,
                "plan_format",
                Some(Self::PLAN_FORMAT_MESSAGE.to_string()),
            ),
            AppError::Generator(msg) => {
                tracing::error!(error = %msg, "Generator error");
                (
                    StatusCode::BAD_GATEWAY,
                    "generator_error",
                    Some(Self::GENERATOR_RETRY_MESSAGE.to_string()),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
