// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ad-hoc nutrition calculator.

use crate::error::AppError;
use crate::models::MealItem;
use serde::{Deserialize, Serialize};

pub const INCOMPLETE_ITEM_MESSAGE: &str =
    "Por favor, preencha todos os campos: Nome, Porção, Kcal e Proteína.";

/// Calculator row as typed by the user. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub portion: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResult {
    pub items: Vec<MealItem>,
    pub total_calories: f64,
    pub total_protein: f64,
}

fn complete(item: &CalculatorItem) -> Option<MealItem> {
    let name = item.name.trim();
    let portion = item.portion.trim();
    if name.is_empty() || portion.is_empty() {
        return None;
    }
    Some(MealItem {
        name: name.to_string(),
        portion: portion.to_string(),
        calories: item.calories.filter(|v| v.is_finite())?,
        protein: item.protein.filter(|v| v.is_finite())?,
    })
}

/// Validate every row and total them. One incomplete row rejects the batch.
pub fn calculate(items: &[CalculatorItem]) -> Result<CalculatorResult, AppError> {
    let items = items
        .iter()
        .map(complete)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AppError::Validation(INCOMPLETE_ITEM_MESSAGE.to_string()))?;

    Ok(CalculatorResult {
        total_calories: items.iter().map(|i| i.calories).sum(),
        total_protein: items.iter().map(|i| i.protein).sum(),
        items,
    })
}
