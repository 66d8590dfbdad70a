use ahash::AHashMap;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use vibematch_core::{Gender, MatchLogStore, ProfileStore, Result, UserId, UserProfile};

/// Process-local profile and match-log store.
/// Each write takes the map's write lock, so upserts are atomic per key.
#[derive(Default)]
pub struct MemoryStorage {
    profiles: RwLock<AHashMap<UserId, UserProfile>>,
    match_logs: RwLock<AHashMap<(UserId, UserId), DateTime<Utc>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn match_log_len(&self) -> usize {
        self.match_logs.read().len()
    }
}

impl ProfileStore for MemoryStorage {
    fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        Ok(self.profiles.read().get(user_id).cloned())
    }

    fn query_profiles(&self, gender: &Gender, exclude: &UserId) -> Result<Vec<UserProfile>> {
        let mut found: Vec<UserProfile> = self
            .profiles
            .read()
            .values()
            .filter(|p| &p.gender == gender && &p.user_id != exclude)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(found)
    }

    fn upsert_profile(&self, profile: UserProfile) -> Result<()> {
        profile.validate()?;
        self.profiles.write().insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

impl MatchLogStore for MemoryStorage {
    fn last_match(&self, from: &UserId, to: &UserId) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .match_logs
            .read()
            .get(&(from.clone(), to.clone()))
            .copied())
    }

    fn upsert_match(&self, from: &UserId, to: &UserId, at: DateTime<Utc>) -> Result<()> {
        self.match_logs.write().insert((from.clone(), to.clone()), at);
        Ok(())
    }
}
