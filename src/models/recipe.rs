// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe catalog entries.

use serde::Serialize;

/// Recipe category, serialized as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecipeCategory {
    #[serde(rename = "Café da Manhã")]
    Breakfast,
    #[serde(rename = "Almoço/Jantar")]
    MainMeal,
    #[serde(rename = "Lanches")]
    Snack,
    #[serde(rename = "Doces Fit")]
    Sweets,
    #[serde(rename = "Fast Food Fit")]
    FastFood,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 5] = [
        RecipeCategory::Breakfast,
        RecipeCategory::MainMeal,
        RecipeCategory::Snack,
        RecipeCategory::Sweets,
        RecipeCategory::FastFood,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecipeCategory::Breakfast => "Café da Manhã",
            RecipeCategory::MainMeal => "Almoço/Jantar",
            RecipeCategory::Snack => "Lanches",
            RecipeCategory::Sweets => "Doces Fit",
            RecipeCategory::FastFood => "Fast Food Fit",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// A built-in recipe.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: &'static str,
    pub title: &'static str,
    pub category: RecipeCategory,
    /// Preparation time, e.g. "10 min"
    pub time: &'static str,
    pub calories: u32,
    /// Grams
    pub protein: u32,
    pub ingredients: &'static [&'static str],
    pub steps: &'static [&'static str],
}
