// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod challenge;
pub mod plan;
pub mod profile;
pub mod recipe;
pub mod user;

pub use challenge::{Challenge, ChallengeSession};
pub use plan::{Exercise, GeneratedPlan, Meal, MealItem, WorkoutDay};
pub use profile::{OnboardingForm, UserGoal, UserLevel, UserProfile, WeightEntry};
pub use recipe::{Recipe, RecipeCategory};
pub use user::{Provider, SessionUser, User};
