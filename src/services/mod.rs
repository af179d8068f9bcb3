// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod calculator;
pub mod challenges;
pub mod coach;
pub mod gemini;
pub mod generator;
pub mod plan_view;
pub mod planner;
pub mod progress;
pub mod recipes;

pub use accounts::AccountService;
pub use challenges::ChallengeTracker;
pub use coach::CoachService;
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, TextGenerator};
pub use planner::PlanService;
