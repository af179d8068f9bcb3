// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model and the onboarding questionnaire.

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Training goal chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UserGoal {
    #[serde(rename = "Perder Peso")]
    LoseWeight,
    #[serde(rename = "Ganhar Massa")]
    GainMuscle,
    #[serde(rename = "Resistência")]
    Endurance,
    #[serde(rename = "Manter Saúde")]
    Maintain,
}

impl UserGoal {
    /// Label used in prompts and shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            UserGoal::LoseWeight => "Perder Peso",
            UserGoal::GainMuscle => "Ganhar Massa",
            UserGoal::Endurance => "Resistência",
            UserGoal::Maintain => "Manter Saúde",
        }
    }
}

/// Self-reported training experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UserLevel {
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
}

impl UserLevel {
    pub fn label(self) -> &'static str {
        match self {
            UserLevel::Beginner => "Iniciante",
            UserLevel::Intermediate => "Intermediário",
            UserLevel::Advanced => "Avançado",
        }
    }
}

/// One point of the weight log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeightEntry {
    pub date: String,
    pub weight: f64,
}

/// User profile stored at `{email}_profile`.
///
/// Only mutated by explicit user edits (onboarding, settings, goals, weight log).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    /// Current weight (kg)
    pub weight: f64,
    /// Height (cm)
    pub height: f64,
    pub goal: UserGoal,
    pub level: UserLevel,
    /// Combined equipment description
    pub equipment: String,
    #[serde(default)]
    pub dietary_restrictions: String,

    // ─── Goals ───────────────────────────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    /// Deadline in weeks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_history: Option<Vec<WeightEntry>>,

    // ─── Activity & Supplements ──────────────────────────────────
    /// e.g. "Bike 16km"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_commute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wants_supplements: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plays_soccer: Option<bool>,
    /// Opaque encoded image (data URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_photo: Option<String>,

    // ─── Preferences & Limitations ───────────────────────────────
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_cravings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_limitations: Option<String>,
}

/// Where the user trains. Determines the equipment description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLocation {
    #[default]
    Gym,
    Home,
}

/// Home equipment checklist from the onboarding form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeEquipment {
    pub dumbbells: bool,
    pub bands: bool,
    pub jump_rope: bool,
    pub bar: bool,
    pub kettlebell: bool,
    pub bench: bool,
    pub ankle_weights: bool,
    pub barbell: bool,
}

impl HomeEquipment {
    /// Selected items in questionnaire order.
    fn selected(&self) -> Vec<&'static str> {
        [
            (self.dumbbells, "Halteres"),
            (self.bands, "Elásticos"),
            (self.jump_rope, "Corda de Pular"),
            (self.bar, "Barra Fixa de Porta"),
            (self.kettlebell, "Kettlebell"),
            (self.bench, "Banco Regulável"),
            (self.ankle_weights, "Caneleiras"),
            (self.barbell, "Barra Longa e Anilhas"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

/// Deserialize a string with surrounding whitespace removed, so that
/// length checks see what will actually be stored.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

pub const GYM_EQUIPMENT: &str = "Academia Completa (Máquinas, Barras, Halteres)";

/// Completed onboarding questionnaire.
///
/// Numeric fields arrive already coerced from the form; presence checks
/// happen here before anything reaches the plan generator.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 100, message = "Informe seu nome."))]
    pub name: String,
    #[validate(range(min = 1, max = 120, message = "Idade inválida."))]
    pub age: u32,
    #[validate(range(exclusive_min = 0.0, max = 500.0, message = "Peso inválido."))]
    pub weight: f64,
    #[validate(range(exclusive_min = 0.0, max = 300.0, message = "Altura inválida."))]
    pub height: f64,
    pub goal: UserGoal,
    pub level: UserLevel,
    #[serde(default)]
    pub training_location: TrainingLocation,
    #[serde(default)]
    pub home_equipment: HomeEquipment,
    #[serde(default)]
    pub other_equipment: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: String,
    #[serde(default)]
    pub daily_commute: Option<String>,
    #[serde(default)]
    pub extra_activity: Option<String>,
    #[serde(default)]
    pub wants_supplements: Option<bool>,
    #[serde(default)]
    pub plays_soccer: Option<bool>,
    #[serde(default)]
    pub starting_photo: Option<String>,
    #[serde(default)]
    pub food_cravings: Option<String>,
    #[serde(default)]
    pub physical_limitations: Option<String>,
}

impl OnboardingForm {
    /// Compose the equipment description sent to the generator.
    pub fn equipment_description(&self) -> String {
        match self.training_location {
            TrainingLocation::Gym => GYM_EQUIPMENT.to_string(),
            TrainingLocation::Home => {
                let mut items = vec!["Peso do Corpo (Calistenia)".to_string()];
                items.extend(self.home_equipment.selected().into_iter().map(String::from));
                if let Some(other) = self
                    .other_equipment
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    items.push(format!("Outros: {}", other));
                }
                format!("Em Casa com: {}", items.join(", "))
            }
        }
    }

    /// Turn the questionnaire into the stored profile.
    pub fn into_profile(self) -> UserProfile {
        let equipment = self.equipment_description();
        UserProfile {
            name: self.name.trim().to_string(),
            age: self.age,
            weight: self.weight,
            height: self.height,
            goal: self.goal,
            level: self.level,
            equipment,
            dietary_restrictions: self.dietary_restrictions,
            target_weight: None,
            deadline: None,
            reminders: None,
            weight_history: None,
            daily_commute: self.daily_commute,
            extra_activity: self.extra_activity,
            wants_supplements: self.wants_supplements,
            plays_soccer: self.plays_soccer,
            starting_photo: self.starting_photo.filter(|s| !s.is_empty()),
            food_cravings: self.food_cravings,
            physical_limitations: self.physical_limitations,
        }
    }
}
