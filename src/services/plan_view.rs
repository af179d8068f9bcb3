// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan sections prepared for rendering.
//!
//! Every section goes through [`section`], the single precondition check:
//! a section whose backing sequence is empty is replaced by its own
//! placeholder, independently of the other sections.

use crate::models::{Exercise, GeneratedPlan, Meal, WorkoutDay};
use serde::Serialize;

const DEFAULT_MOTIVATION: &str = "Sua jornada começa hoje.";

/// Placeholder shown instead of a section whose data is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placeholder {
    pub title: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

pub const WORKOUT_PLACEHOLDER: Placeholder = Placeholder {
    title: "Erro ao carregar treino",
    message: "Não foi possível ler os dados do treino gerado. Isso pode ocorrer se a IA sofreu uma interrupção.",
    hint: Some("Por favor, tente gerar o plano novamente nas configurações."),
};

pub const NUTRITION_PLACEHOLDER: Placeholder = Placeholder {
    title: "Dados da Dieta Indisponíveis",
    message: "O plano alimentar não foi carregado corretamente.",
    hint: None,
};

/// A renderable section or its placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Available(T),
    Unavailable(Placeholder),
}

impl<T> Section<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Section::Available(_))
    }
}

/// Shared precondition: build the section only if `items` is non-empty.
pub fn section<I, T>(items: &[I], placeholder: Placeholder, build: impl FnOnce(&[I]) -> T) -> Section<T> {
    if items.is_empty() {
        Section::Unavailable(placeholder)
    } else {
        Section::Available(build(items))
    }
}

/// Video search for an exercise or recipe tutorial.
pub fn tutorial_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

/// Tutorial search for an exercise.
pub fn exercise_tutorial_url(exercise_name: &str) -> String {
    tutorial_url(&format!(
        "como fazer exercicio {} execução correta",
        exercise_name
    ))
}

// ─── Workout ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutContent {
    pub motivation: String,
    pub days: Vec<WorkoutDayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDayView {
    pub day_name: String,
    pub focus: String,
    pub exercises: Vec<ExerciseView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseView {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub tutorial_url: String,
}

fn day_view(day: &WorkoutDay) -> WorkoutDayView {
    WorkoutDayView {
        day_name: day.day_name.clone(),
        focus: day.focus.clone(),
        exercises: day
            .exercises
            .iter()
            .map(|ex| ExerciseView {
                exercise: ex.clone(),
                tutorial_url: exercise_tutorial_url(&ex.name),
            })
            .collect(),
    }
}

/// Workout section of `plan`.
pub fn workout_view(plan: &GeneratedPlan) -> Section<WorkoutContent> {
    section(&plan.workout_routine, WORKOUT_PLACEHOLDER, |days| {
        let motivation = if plan.motivation.trim().is_empty() {
            DEFAULT_MOTIVATION.to_string()
        } else {
            plan.motivation.clone()
        };
        WorkoutContent {
            motivation,
            days: days.iter().map(day_view).collect(),
        }
    })
}

// ─── Nutrition ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionContent {
    pub total_calories: f64,
    /// Rounded to whole grams
    pub total_protein: f64,
    pub meals: Vec<MealView>,
    /// Calories per meal, for the distribution chart
    pub calorie_distribution: Vec<CalorieShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    #[serde(flatten)]
    pub meal: Meal,
    pub protein: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieShare {
    pub name: String,
    pub value: f64,
}

/// Nutrition section of `plan`. Totals are only computed when meals exist.
pub fn nutrition_view(plan: &GeneratedPlan) -> Section<NutritionContent> {
    section(&plan.nutrition_plan, NUTRITION_PLACEHOLDER, |meals| {
        let total_calories = meals.iter().map(|m| m.total_calories).sum();
        let total_protein: f64 = meals.iter().map(Meal::protein).sum();

        NutritionContent {
            total_calories,
            total_protein: total_protein.round(),
            meals: meals
                .iter()
                .map(|m| MealView {
                    meal: m.clone(),
                    protein: m.protein().round(),
                })
                .collect(),
            calorie_distribution: meals
                .iter()
                .map(|m| CalorieShare {
                    name: m.meal_type.clone(),
                    value: m.total_calories,
                })
                .collect(),
        }
    })
}
