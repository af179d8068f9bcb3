// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generated workout/nutrition plan.
//!
//! These types mirror the JSON object the generator is asked to produce.
//! Every collection defaults to empty so that a partial response still
//! deserializes and the views can fall back to their placeholders.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Plan stored at `{email}_plan`. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub workout_routine: Vec<WorkoutDay>,
    #[serde(default)]
    pub nutrition_plan: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
    /// e.g. "Segunda-feira" or "Dia A"
    #[serde(default)]
    pub day_name: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A single exercise. `sets` and `reps` are free text ("até a falha", "45s").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Category label, e.g. "Café da Manhã"
    #[serde(rename = "type", default)]
    pub meal_type: String,
    #[serde(default)]
    pub items: Vec<MealItem>,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub substitutions: Vec<String>,
}

impl Meal {
    /// Protein across all items (grams).
    pub fn protein(&self) -> f64 {
        self.items.iter().map(|item| item.protein).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub portion: String,
    #[serde(default)]
    pub calories: f64,
    /// Protein (grams)
    #[serde(default)]
    pub protein: f64,
}
