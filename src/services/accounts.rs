// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration, credential checks and federated sign-in.
//!
//! Passwords are stored as salted argon2 hashes. Hashing and verification
//! run on the blocking pool so they never stall the async workers. The
//! federated ("Google") path is simulated: after a fixed delay a fabricated
//! identity is upserted.

use crate::db::LocalDb;
use crate::error::AppError;
use crate::models::{Provider, User};
use crate::time_utils::format_utc_rfc3339;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use std::time::Duration;

pub const GOOGLE_DEMO_EMAIL: &str = "usuario.google@gmail.com";
const GOOGLE_DEMO_NAME: &str = "Usuário Google";
const GOOGLE_DEMO_AVATAR: &str = "https://lh3.googleusercontent.com/a/default-user=s96-c";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Check `password` against a stored PHC string. Unparseable hashes never verify.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is unparseable");
            false
        }
    }
}

async fn hash_password_blocking(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))?
}

async fn verify_password_blocking(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e))
        })
}

/// Account operations on top of the local store.
#[derive(Clone)]
pub struct AccountService {
    db: LocalDb,
    federated_delay: Duration,
}

impl AccountService {
    pub fn new(db: LocalDb, federated_delay: Duration) -> Self {
        Self {
            db,
            federated_delay,
        }
    }

    /// Register a local account. A taken email yields `DuplicateAccount`.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AppError> {
        if self.db.get_user(email).is_some() {
            return Err(AppError::DuplicateAccount);
        }

        let user = User {
            email: email.to_string(),
            password_hash: Some(hash_password_blocking(password).await?),
            name: name.to_string(),
            avatar: None,
            provider: Provider::Local,
            created_at: format_utc_rfc3339(Utc::now()),
        };

        // The insert re-checks under the accounts lock
        self.db.insert_user(&user).await?;

        tracing::info!(email, "Registered local account");
        Ok(user)
    }

    /// Verify credentials. Unknown email and wrong password are indistinguishable.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.db.get_user(email).ok_or(AppError::InvalidCredentials)?;

        let valid = match user.password_hash.as_deref() {
            Some(hash) => verify_password_blocking(password, hash).await?,
            None => false,
        };

        if !valid {
            tracing::info!(email, "Rejected login");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Simulated Google sign-in: waits, then upserts the fixed identity.
    pub async fn login_with_google(&self) -> Result<User, AppError> {
        tokio::time::sleep(self.federated_delay).await;

        let created_at = self
            .db
            .get_user(GOOGLE_DEMO_EMAIL)
            .map(|u| u.created_at)
            .unwrap_or_else(|| format_utc_rfc3339(Utc::now()));

        let user = User {
            email: GOOGLE_DEMO_EMAIL.to_string(),
            password_hash: None,
            name: GOOGLE_DEMO_NAME.to_string(),
            avatar: Some(GOOGLE_DEMO_AVATAR.to_string()),
            provider: Provider::Google,
            created_at,
        };
        self.db.upsert_user(&user).await?;

        tracing::info!(email = GOOGLE_DEMO_EMAIL, "Federated login");
        Ok(user)
    }

    /// Remove the account record and all of its data. An unknown account
    /// yields `NotFound` and leaves stored data alone.
    pub async fn delete_account(&self, email: &str) -> Result<usize, AppError> {
        if !self.db.delete_user(email).await? {
            return Err(AppError::NotFound(format!("Account {}", email)));
        }
        let removed = self.db.delete_user_data(email).await?;
        tracing::info!(email, removed, "Deleted account");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AccountService {
        AccountService::new(LocalDb::in_memory(), Duration::ZERO)
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("pw123", &a));
        assert!(verify_password("pw123", &b));
        assert!(!verify_password("pw124", &a));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("pw123", "pw123"));
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let accounts = service();
        let user = accounts.register("a@b.com", "pw123", "Ana").await.unwrap();
        assert_eq!(user.provider, Provider::Local);
        assert_ne!(user.password_hash.as_deref(), Some("pw123"));

        let err = accounts
            .register("a@b.com", "other", "Outra")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let accounts = service();
        accounts.register("a@b.com", "pw123", "Ana").await.unwrap();

        assert!(accounts.login("a@b.com", "pw123").await.is_ok());
        assert!(matches!(
            accounts.login("a@b.com", "PW123").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            accounts.login("A@b.com", "pw123").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_google_login_upserts_and_has_no_password() {
        let accounts = service();
        let first = accounts.login_with_google().await.unwrap();
        let second = accounts.login_with_google().await.unwrap();

        assert_eq!(first.email, GOOGLE_DEMO_EMAIL);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(accounts.db.get_users().len(), 1);

        // No local password can ever match a federated account
        assert!(matches!(
            accounts.login(GOOGLE_DEMO_EMAIL, "").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_account_keeps_data() {
        let accounts = service();
        accounts
            .db
            .set_raw("ghost@b.com_plan", "{}".to_string())
            .await
            .unwrap();

        let err = accounts.delete_account("ghost@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(accounts.db.get_raw("ghost@b.com_plan").is_some());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_does_not_stall_the_runtime() {
        let accounts = service();
        let ticker = tokio::spawn(async {
            let mut worst = Duration::ZERO;
            for _ in 0..20 {
                let before = std::time::Instant::now();
                tokio::time::sleep(Duration::from_millis(5)).await;
                worst = worst.max(before.elapsed());
            }
            worst
        });

        for i in 0..3 {
            accounts
                .register(&format!("u{}@b.com", i), "pw123", "Ana")
                .await
                .unwrap();
        }
        let worst = ticker.await.unwrap();
        assert!(worst < Duration::from_millis(500), "worst tick {:?}", worst);
    }
}
