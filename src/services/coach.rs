// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily quote and the supplement chat.
//!
//! Neither feature ever fails towards the user: generator errors and
//! timeouts are logged and answered with a fixed fallback text.

use crate::error::AppError;
use crate::services::generator::{GenerationRequest, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

const QUOTE_PROMPT: &str =
    "Gere uma frase curta e muito inspiradora sobre fitness. Apenas a frase, sem aspas.";
pub const QUOTE_EMPTY_FALLBACK: &str = "A disciplina é a ponte entre metas e realizações.";
pub const QUOTE_ERROR_FALLBACK: &str = "O único treino ruim é aquele que não aconteceu.";

const SUPPLEMENT_SYSTEM_PROMPT: &str = "Você é um especialista em nutrição esportiva. \
     Seja direto e amigável. Responda em Português do Brasil. \
     Priorize respostas curtas e práticas.";
pub const CHAT_EMPTY_FALLBACK: &str = "Desculpe, não consegui processar sua dúvida agora.";
pub const CHAT_ERROR_FALLBACK: &str = "Erro ao conectar com o especialista. Tente novamente.";

/// Prompt for one supplement chat turn.
pub fn build_chat_prompt(history: &[String], message: &str) -> String {
    format!(
        "{}\n\nHistórico:\n{}\n\nUsuário: {}",
        SUPPLEMENT_SYSTEM_PROMPT,
        history.join("\n"),
        message
    )
}

#[derive(Clone)]
pub struct CoachService {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl CoachService {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Short motivational quote.
    pub async fn daily_quote(&self) -> String {
        self.generate_or(QUOTE_PROMPT.to_string(), QUOTE_EMPTY_FALLBACK, QUOTE_ERROR_FALLBACK)
            .await
    }

    /// Answer `message` given the prior turns in `history`.
    pub async fn supplement_chat(&self, history: &[String], message: &str) -> String {
        self.generate_or(
            build_chat_prompt(history, message),
            CHAT_EMPTY_FALLBACK,
            CHAT_ERROR_FALLBACK,
        )
        .await
    }

    async fn generate_or(&self, prompt: String, on_empty: &str, on_error: &str) -> String {
        let request = GenerationRequest::text(prompt);
        let result = tokio::time::timeout(self.timeout, self.generator.generate(&request))
            .await
            .unwrap_or(Err(AppError::GeneratorTimeout));

        match result {
            Ok(text) if text.trim().is_empty() => on_empty.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Coach generation failed, using fallback");
                on_error.to_string()
            }
        }
    }
}
