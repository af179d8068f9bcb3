// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local key/value store with typed operations.
//!
//! Entries live in memory and are written through to a single JSON file
//! (write to a temp file, then rename). Provides high-level operations for:
//! - Accounts (one collection under a fixed key)
//! - Profiles, plans and challenge sessions (keyed `{email}_{suffix}`)
//!
//! A record that is missing or fails to parse reads as `None`; callers treat
//! that as "nothing stored" rather than as a structural error.
//!
//! Writes to a user's records hold that user's lock, so read-modify-write
//! cycles (`update_profile`, `update_challenge_session`) never interleave.

use crate::db::keys;
use crate::error::AppError;
use crate::models::{ChallengeSession, GeneratedPlan, User, UserProfile};
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

struct Inner {
    entries: DashMap<String, String>,
    path: Option<PathBuf>,
    /// Serializes snapshots to disk.
    persist_lock: Mutex<()>,
    /// Serializes read-check-write cycles on the account collection.
    accounts_lock: Mutex<()>,
    /// One lock per email, serializing writes to `{email}_*` records.
    user_locks: DashMap<String, Arc<Mutex<()>>>,
}

/// Local key/value database client.
#[derive(Clone)]
pub struct LocalDb {
    inner: Arc<Inner>,
}

impl LocalDb {
    /// Open a store backed by `path`, loading existing entries if the file exists.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let entries: BTreeMap<String, String> = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Storage(format!("Corrupt store file {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            entries = entries.len(),
            "Opened local store"
        );

        Ok(Self::from_parts(entries.into_iter().collect(), Some(path)))
    }

    /// Create a store that never touches disk (tests, ephemeral runs).
    pub fn in_memory() -> Self {
        Self::from_parts(DashMap::new(), None)
    }

    /// Whether entries are written through to a file.
    pub fn is_persistent(&self) -> bool {
        self.inner.path.is_some()
    }

    fn from_parts(entries: DashMap<String, String>, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries,
                path,
                persist_lock: Mutex::new(()),
                accounts_lock: Mutex::new(()),
                user_locks: DashMap::new(),
            }),
        }
    }

    // ─── Raw Operations ──────────────────────────────────────────

    /// Get the raw JSON text stored at `key`.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.inner.entries.get(key).map(|v| v.value().clone())
    }

    /// Store raw text at `key` and persist.
    pub async fn set_raw(&self, key: &str, value: String) -> Result<(), AppError> {
        self.inner.entries.insert(key.to_string(), value);
        self.persist().await
    }

    /// Remove `key`. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let existed = self.inner.entries.remove(key).is_some();
        if existed {
            self.persist().await?;
        }
        Ok(existed)
    }

    /// All keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        keys.sort();
        keys
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed stored record");
                None
            }
        }
    }

    async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))?;
        self.set_raw(key, raw).await
    }

    /// Write a snapshot of all entries to disk.
    async fn persist(&self) -> Result<(), AppError> {
        let Some(path) = &self.inner.path else {
            return Ok(());
        };

        let _guard = self.inner.persist_lock.lock().await;

        // Snapshot under the lock so the last writer always writes the latest state
        let snapshot: BTreeMap<String, String> = self
            .inner
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let contents = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| AppError::Storage(format!("Failed to encode store: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create data dir: {}", e)))?;
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }

    // ─── Account Operations ──────────────────────────────────────

    /// All accounts. A malformed collection reads as empty.
    pub fn get_users(&self) -> Vec<User> {
        self.get_json(keys::USERS).unwrap_or_default()
    }

    /// Get an account by email (exact match).
    pub fn get_user(&self, email: &str) -> Option<User> {
        self.get_users().into_iter().find(|u| u.email == email)
    }

    /// Insert a new account. Fails with `DuplicateAccount` if the email is taken.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let _guard = self.inner.accounts_lock.lock().await;

        let mut users = self.get_users();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateAccount);
        }
        users.push(user.clone());
        self.set_json(keys::USERS, &users).await
    }

    /// Create or replace an account by email.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _guard = self.inner.accounts_lock.lock().await;

        let mut users = self.get_users();
        match users.iter_mut().find(|u| u.email == user.email) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.set_json(keys::USERS, &users).await
    }

    /// Remove an account record. Returns whether it existed.
    pub async fn delete_user(&self, email: &str) -> Result<bool, AppError> {
        let _guard = self.inner.accounts_lock.lock().await;

        let mut users = self.get_users();
        let before = users.len();
        users.retain(|u| u.email != email);
        if users.len() == before {
            return Ok(false);
        }
        self.set_json(keys::USERS, &users).await?;
        Ok(true)
    }

    // ─── Per-User Data ───────────────────────────────────────────

    async fn lock_user(&self, email: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .user_locks
            .entry(email.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    pub fn get_profile(&self, email: &str) -> Option<UserProfile> {
        self.get_json(&keys::user_key(email, keys::PROFILE))
    }

    pub async fn set_profile(&self, email: &str, profile: &UserProfile) -> Result<(), AppError> {
        let _guard = self.lock_user(email).await;
        self.set_json(&keys::user_key(email, keys::PROFILE), profile)
            .await
    }

    /// Apply `update` to the stored profile and write it back, all under the
    /// user's lock. A missing profile yields `OnboardingRequired`.
    pub async fn update_profile<F>(&self, email: &str, update: F) -> Result<UserProfile, AppError>
    where
        F: FnOnce(&mut UserProfile) -> Result<(), AppError>,
    {
        let _guard = self.lock_user(email).await;

        let mut profile = self
            .get_profile(email)
            .ok_or(AppError::OnboardingRequired)?;
        update(&mut profile)?;
        self.set_json(&keys::user_key(email, keys::PROFILE), &profile)
            .await?;
        Ok(profile)
    }

    pub fn get_plan(&self, email: &str) -> Option<GeneratedPlan> {
        self.get_json(&keys::user_key(email, keys::PLAN))
    }

    pub async fn set_plan(&self, email: &str, plan: &GeneratedPlan) -> Result<(), AppError> {
        let _guard = self.lock_user(email).await;
        self.set_json(&keys::user_key(email, keys::PLAN), plan).await
    }

    /// Store profile and plan together (onboarding, regeneration).
    pub async fn set_profile_and_plan(
        &self,
        email: &str,
        profile: &UserProfile,
        plan: &GeneratedPlan,
    ) -> Result<(), AppError> {
        let _guard = self.lock_user(email).await;
        self.set_json(&keys::user_key(email, keys::PROFILE), profile)
            .await?;
        self.set_json(&keys::user_key(email, keys::PLAN), plan).await
    }

    pub fn get_challenge_session(&self, email: &str) -> Option<ChallengeSession> {
        self.get_json(&keys::user_key(email, keys::CHALLENGE))
    }

    pub async fn set_challenge_session(
        &self,
        email: &str,
        session: &ChallengeSession,
    ) -> Result<(), AppError> {
        let _guard = self.lock_user(email).await;
        self.set_json(&keys::user_key(email, keys::CHALLENGE), session)
            .await
    }

    /// Apply `update` to the running session under the user's lock and store
    /// the result. Returns the stored session along with `update`'s value.
    /// Nothing is written when `update` fails.
    pub async fn update_challenge_session<T, F>(
        &self,
        email: &str,
        update: F,
    ) -> Result<(ChallengeSession, T), AppError>
    where
        F: FnOnce(&mut ChallengeSession) -> Result<T, AppError>,
    {
        let _guard = self.lock_user(email).await;

        let mut session = self
            .get_challenge_session(email)
            .ok_or_else(|| AppError::NotFound("No challenge in progress".to_string()))?;
        let value = update(&mut session)?;
        self.set_json(&keys::user_key(email, keys::CHALLENGE), &session)
            .await?;
        Ok((session, value))
    }

    pub async fn delete_challenge_session(&self, email: &str) -> Result<bool, AppError> {
        let _guard = self.lock_user(email).await;
        self.remove(&keys::user_key(email, keys::CHALLENGE)).await
    }

    /// Delete every record namespaced under `email`. Returns the number removed.
    ///
    /// The account record itself is untouched.
    pub async fn delete_user_data(&self, email: &str) -> Result<usize, AppError> {
        let _guard = self.lock_user(email).await;
        let prefix = keys::user_prefix(email);

        // A remainder containing '@' belongs to a longer email sharing this prefix
        let doomed: Vec<String> = self
            .keys_with_prefix(&prefix)
            .into_iter()
            .filter(|k| !k[prefix.len()..].contains('@'))
            .collect();

        for key in &doomed {
            self.inner.entries.remove(key);
        }
        if !doomed.is_empty() {
            self.persist().await?;
        }

        tracing::info!(email, removed = doomed.len(), "Deleted user data");
        Ok(doomed.len())
    }
}
