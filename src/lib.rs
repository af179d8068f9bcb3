// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitLife Pro: AI-generated workout and nutrition plans.
//!
//! This crate provides the backend API: accounts and sessions, the local
//! key/value store, the onboarding-to-plan pipeline against an external
//! text generator, and the challenge, recipe, progress and coaching features.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::LocalDb;
use services::{AccountService, ChallengeTracker, CoachService, PlanService, TextGenerator};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: LocalDb,
    pub accounts: AccountService,
    pub planner: PlanService,
    pub coach: CoachService,
    pub challenges: ChallengeTracker,
}

impl AppState {
    /// Wire the services on top of `db` and `generator`.
    pub fn new(config: Config, db: LocalDb, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            accounts: AccountService::new(db.clone(), config.federated_login_delay),
            planner: PlanService::new(generator.clone(), config.generator_timeout),
            coach: CoachService::new(generator, config.generator_timeout),
            challenges: ChallengeTracker::new(db.clone()),
            config,
            db,
        }
    }
}
