// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight progress summary.

use crate::models::{UserGoal, UserProfile, WeightEntry};
use serde::Serialize;

/// Progress numbers plus the series to chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProgress {
    pub series: Vec<WeightEntry>,
    /// True when `series` is illustrative rather than logged data
    pub simulated: bool,
    pub start_weight: f64,
    pub current_weight: f64,
    pub target_weight: f64,
    pub remaining: f64,
    pub is_positive_trend: bool,
}

/// Build the progress summary for `profile`.
///
/// With fewer than two logged weights a four-point series ending at the
/// current weight is fabricated so the chart always has a shape.
pub fn weight_progress(profile: &UserProfile) -> WeightProgress {
    let current = profile.weight;
    let target = profile.target_weight.unwrap_or(current);

    let (series, simulated) = match &profile.weight_history {
        Some(history) if history.len() > 1 => (history.clone(), false),
        _ => (simulated_series(current, profile.goal), true),
    };

    let start = series.first().map(|e| e.weight).unwrap_or(current);
    let difference = current - start;
    let is_positive_trend = if profile.goal == UserGoal::GainMuscle {
        difference > 0.0
    } else {
        difference < 0.0
    };

    WeightProgress {
        series,
        simulated,
        start_weight: start,
        current_weight: current,
        target_weight: target,
        remaining: (target - current).abs(),
        is_positive_trend,
    }
}

fn simulated_series(current: f64, goal: UserGoal) -> Vec<WeightEntry> {
    let offsets: [f64; 3] = if goal == UserGoal::LoseWeight {
        [3.0, 2.0, 1.0]
    } else {
        [-2.0, -1.5, -0.8]
    };

    let mut series: Vec<WeightEntry> = offsets
        .iter()
        .enumerate()
        .map(|(i, offset)| WeightEntry {
            date: format!("Semana {}", i + 1),
            weight: current + offset,
        })
        .collect();
    series.push(WeightEntry {
        date: "Atual".to_string(),
        weight: current,
    });
    series
}
