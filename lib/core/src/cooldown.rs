use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use crate::store::MatchLogStore;
use crate::{Result, UserId};

/// Answers "was this pair matched too recently" from the match log.
///
/// Entries are directional. A mutual match is two `record` calls, one per
/// direction; the two writes are independent of each other.
#[derive(Clone)]
pub struct CooldownTracker {
    log: Arc<dyn MatchLogStore>,
    window: TimeDelta,
}

impl CooldownTracker {
    /// A zero window disables the cooldown.
    pub fn new(log: Arc<dyn MatchLogStore>, window: TimeDelta) -> Self {
        Self { log, window }
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }

    pub fn is_in_cooldown(&self, user_a: &UserId, user_b: &UserId) -> Result<bool> {
        self.is_in_cooldown_at(user_a, user_b, Utc::now())
    }

    pub fn is_in_cooldown_at(&self, user_a: &UserId, user_b: &UserId, now: DateTime<Utc>) -> Result<bool> {
        if self.window <= TimeDelta::zero() {
            return Ok(false);
        }
        match self.log.last_match(user_a, user_b)? {
            Some(at) => Ok(now.signed_duration_since(at) < self.window),
            None => Ok(false),
        }
    }

    pub fn record(&self, user_a: &UserId, user_b: &UserId) -> Result<()> {
        self.record_at(user_a, user_b, Utc::now())
    }

    pub fn record_at(&self, user_a: &UserId, user_b: &UserId, at: DateTime<Utc>) -> Result<()> {
        self.log.upsert_match(user_a, user_b, at)
    }
}

impl std::fmt::Debug for CooldownTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownTracker")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
