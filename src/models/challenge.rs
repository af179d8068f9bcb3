// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge catalog entries and the per-user tracking session.

use serde::{Deserialize, Serialize};

use crate::models::Exercise;

/// A predefined challenge module.
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    /// e.g. "15 min"
    pub duration: &'static str,
    pub exercises: Vec<Exercise>,
}

/// Running challenge for a user, stored at `{email}_challenge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSession {
    pub challenge_id: String,
    /// When the timer started (RFC 3339)
    pub started_at: String,
    /// Completion flag per exercise, same order as the catalog entry
    pub completed: Vec<bool>,
    /// Set once every exercise is checked; freezes the timer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl ChallengeSession {
    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }

    pub fn is_done(&self) -> bool {
        !self.completed.is_empty() && self.completed.iter().all(|done| *done)
    }
}
