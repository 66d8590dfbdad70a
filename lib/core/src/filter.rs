// Candidate eligibility for a single match request
use std::collections::BTreeSet;
use tracing::trace;
use crate::cooldown::CooldownTracker;
use crate::keywords::KeywordExtractor;
use crate::vector::{normalize, NormalizedVector};
use crate::{Gender, Result, UserId, UserProfile};

/// A profile that survived filtering, ready to be indexed
#[derive(Debug, Clone)]
pub struct Candidate {
    pub user_id: UserId,
    pub vector: NormalizedVector,
    pub transcript: String,
    pub keywords: BTreeSet<String>,
}

/// Eligible candidates for one request, in the order they were supplied
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.candidates
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NoEmbedding,
    WrongGender,
    SelfMatch,
    Cooldown,
}

/// Drops candidates that cannot be matched with the requester.
///
/// The upstream profile query already selects by gender and excludes the
/// requester; both are checked again here so a store that ignores either
/// constraint cannot leak an ineligible candidate.
pub struct CandidateFilter<'a> {
    cooldown: &'a CooldownTracker,
    extractor: &'a dyn KeywordExtractor,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(cooldown: &'a CooldownTracker, extractor: &'a dyn KeywordExtractor) -> Self {
        Self { cooldown, extractor }
    }

    /// Returns an empty pool, not an error, when nothing survives.
    /// Cooldown lookups that fail propagate as errors.
    pub fn filter(
        &self,
        requester: &UserProfile,
        pool: Vec<UserProfile>,
        gender_wanted: &Gender,
    ) -> Result<CandidatePool> {
        let mut candidates = Vec::with_capacity(pool.len());

        for profile in pool {
            if let Some(reason) = self.rejection(requester, &profile, gender_wanted)? {
                trace!(candidate = %profile.user_id, ?reason, "candidate rejected");
                continue;
            }
            let Some(embedding) = profile.embedding.as_ref() else {
                continue;
            };
            candidates.push(Candidate {
                vector: normalize(embedding),
                keywords: self.extractor.extract(&profile.transcript),
                user_id: profile.user_id,
                transcript: profile.transcript,
            });
        }

        Ok(CandidatePool::new(candidates))
    }

    fn rejection(
        &self,
        requester: &UserProfile,
        candidate: &UserProfile,
        gender_wanted: &Gender,
    ) -> Result<Option<Rejection>> {
        if candidate.embedding.is_none() {
            return Ok(Some(Rejection::NoEmbedding));
        }
        if &candidate.gender != gender_wanted {
            return Ok(Some(Rejection::WrongGender));
        }
        if candidate.user_id == requester.user_id {
            return Ok(Some(Rejection::SelfMatch));
        }
        if self.cooldown.is_in_cooldown(&requester.user_id, &candidate.user_id)? {
            return Ok(Some(Rejection::Cooldown));
        }
        Ok(None)
    }
}
