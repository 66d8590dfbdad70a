// Storage seams consumed by the matching engine.
// Implementations live in vibematch-storage; tests substitute their own.
use chrono::{DateTime, Utc};
use crate::{Gender, Result, UserId, UserProfile};

/// Read/write access to user profiles
pub trait ProfileStore: Send + Sync {
    fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>>;

    /// Profiles with the given gender, excluding `exclude`, ordered by user id
    fn query_profiles(&self, gender: &Gender, exclude: &UserId) -> Result<Vec<UserProfile>>;

    /// Insert or replace a profile. Atomic per user id.
    fn upsert_profile(&self, profile: UserProfile) -> Result<()>;
}

/// Directional match log: `(from, to) -> last match timestamp`
pub trait MatchLogStore: Send + Sync {
    fn last_match(&self, from: &UserId, to: &UserId) -> Result<Option<DateTime<Utc>>>;

    /// Set the timestamp for `(from, to)`. Atomic per key, last writer wins.
    fn upsert_match(&self, from: &UserId, to: &UserId, at: DateTime<Utc>) -> Result<()>;
}
