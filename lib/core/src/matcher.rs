//! End-to-end matching for one requester
//!
//! ```text
//! Start ─> RequesterLoaded ─> CandidatesFetched ─> Filtered ─> Indexed ─> Searched ─> Matched
//!   │                                                 │           │          │
//!   └────────────────────────── NoMatch <─────────────┴───────────┴──────────┘
//! ```
//!
//! Every no-match exit is reported as `None` by [`MatchOrchestrator::find_best_match`];
//! store and input failures propagate as errors.

use std::sync::Arc;
use chrono::Utc;
use tracing::{debug, info};
use crate::config::MatchConfig;
use crate::cooldown::CooldownTracker;
use crate::error::NoMatchReason;
use crate::filter::CandidateFilter;
use crate::index::SimilarityIndex;
use crate::keywords::KeywordExtractor;
use crate::reason::MatchReasonGenerator;
use crate::store::{MatchLogStore, ProfileStore};
use crate::vector::normalize;
use crate::{Gender, MatchResult, Result, UserId};

/// Result of a match request, keeping the no-match cause for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    NoMatch(NoMatchReason),
}

impl MatchOutcome {
    pub fn into_result(self) -> Option<MatchResult> {
        match self {
            MatchOutcome::Matched(result) => Some(result),
            MatchOutcome::NoMatch(_) => None,
        }
    }
}

/// Composes filtering, indexing, search, cooldown logging and reason text.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct MatchOrchestrator {
    profiles: Arc<dyn ProfileStore>,
    cooldown: CooldownTracker,
    extractor: Arc<dyn KeywordExtractor>,
    reasons: MatchReasonGenerator,
}

impl MatchOrchestrator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        match_log: Arc<dyn MatchLogStore>,
        extractor: Arc<dyn KeywordExtractor>,
        config: &MatchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            profiles,
            cooldown: CooldownTracker::new(match_log, config.cooldown),
            extractor,
            reasons: MatchReasonGenerator::new(&config.reason_stop_words),
        })
    }

    pub fn cooldown(&self) -> &CooldownTracker {
        &self.cooldown
    }

    /// Best counterpart for `user_id` among profiles of `gender_wanted`
    pub fn find_best_match(&self, user_id: &UserId, gender_wanted: &Gender) -> Result<Option<MatchResult>> {
        let outcome = self.evaluate(user_id, gender_wanted)?;
        if let MatchOutcome::NoMatch(reason) = &outcome {
            debug!(user = %user_id, gender = %gender_wanted, %reason, "no match");
        }
        Ok(outcome.into_result())
    }

    /// Same as [`find_best_match`](Self::find_best_match) but keeps the no-match cause
    pub fn evaluate(&self, user_id: &UserId, gender_wanted: &Gender) -> Result<MatchOutcome> {
        let Some(requester) = self.profiles.get_profile(user_id)? else {
            return Ok(MatchOutcome::NoMatch(NoMatchReason::ProfileNotFound));
        };
        let Some(embedding) = requester.embedding.as_ref() else {
            return Ok(MatchOutcome::NoMatch(NoMatchReason::NoEmbedding));
        };
        let query = normalize(embedding);
        let requester_keywords = self.extractor.extract(&requester.transcript);

        let raw = self.profiles.query_profiles(gender_wanted, user_id)?;
        debug!(user = %user_id, fetched = raw.len(), "candidates fetched");

        let pool = CandidateFilter::new(&self.cooldown, self.extractor.as_ref())
            .filter(&requester, raw, gender_wanted)?;
        if pool.is_empty() {
            return Ok(MatchOutcome::NoMatch(NoMatchReason::NoEligibleCandidates));
        }
        debug!(user = %user_id, eligible = pool.len(), "candidates filtered");

        let Some(index) = SimilarityIndex::build(pool)? else {
            return Ok(MatchOutcome::NoMatch(NoMatchReason::NoEligibleCandidates));
        };
        let Some(hit) = index.search(&query)? else {
            return Ok(MatchOutcome::NoMatch(NoMatchReason::NoNeighborFound));
        };
        let matched = hit.candidate;

        let now = Utc::now();
        self.cooldown.record_at(user_id, &matched.user_id, now)?;
        self.cooldown.record_at(&matched.user_id, user_id, now)?;

        let explanation = self.reasons.explain(&requester_keywords, &matched.keywords);
        info!(
            user = %user_id,
            matched = %matched.user_id,
            score = hit.score,
            "match recorded"
        );

        Ok(MatchOutcome::Matched(MatchResult {
            user_id: user_id.clone(),
            your_transcript: requester.transcript,
            matched_user_id: matched.user_id.clone(),
            matched_transcript: matched.transcript.clone(),
            similarity_score: hit.score,
            matched_on: explanation.shared_keywords,
            match_reason: explanation.reason,
            mutual_match: true,
        }))
    }
}

impl std::fmt::Debug for MatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchOrchestrator")
            .field("cooldown", &self.cooldown)
            .field("reasons", &self.reasons)
            .finish_non_exhaustive()
    }
}
