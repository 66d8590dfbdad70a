use chrono::TimeDelta;
use crate::reason::DEFAULT_REASON_STOP_WORDS;
use crate::{Error, Result};

/// Matching configuration
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// How long a matched pair stays ineligible. Zero disables the cooldown.
    pub cooldown: TimeDelta,
    /// Words never reported as a shared interest
    pub reason_stop_words: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cooldown: TimeDelta::zero(),
            reason_stop_words: DEFAULT_REASON_STOP_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: TimeDelta) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_cooldown_days(self, days: u32) -> Self {
        self.with_cooldown(TimeDelta::days(i64::from(days)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.cooldown < TimeDelta::zero() {
            return Err(Error::InvalidConfig(format!(
                "cooldown must not be negative, got {}",
                self.cooldown
            )));
        }
        Ok(())
    }
}
