//! Database layer (local key/value store).

pub mod local;

pub use local::LocalDb;

/// Storage keys.
///
/// Per-user records are namespaced by email: `{email}_{suffix}`.
pub mod keys {
    /// Account collection (one JSON array of users)
    pub const USERS: &str = "fitlifepro_users_db_v2";
    pub const PROFILE: &str = "profile";
    pub const PLAN: &str = "plan";
    /// Running challenge session
    pub const CHALLENGE: &str = "challenge";

    /// Key of a per-user record.
    pub fn user_key(email: &str, suffix: &str) -> String {
        format!("{}{}", user_prefix(email), suffix)
    }

    /// Prefix shared by every record of a user.
    pub fn user_prefix(email: &str) -> String {
        format!("{}_", email)
    }
}
