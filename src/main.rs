// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitLife Pro API Server
//!
//! Generates personalised workout and nutrition plans through Gemini and
//! keeps every user's data in a local key/value store.

use fitlife_pro::{config::Config, db::LocalDb, services::GeminiClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FitLife Pro API");

    // Open the key/value store
    let db = match &config.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Opening local store");
            LocalDb::open(path).await?
        }
        None => {
            tracing::warn!("DATA_PATH disabled, data will not survive a restart");
            LocalDb::in_memory()
        }
    };

    let generator = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone());
    tracing::info!(
        model = %config.gemini_model,
        timeout_secs = config.generator_timeout.as_secs(),
        "Gemini client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, Arc::new(generator)));

    // Build router
    let app = fitlife_pro::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitlife_pro=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
