//! # vibematch
//!
//! Matches a user with the most compatible counterpart from the profiles of
//! the gender they are looking for, by cosine similarity over transcript
//! embeddings, with a repeat-match cooldown.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! vibematch --http-port 9000 --cooldown-days 1
//! curl -X PUT localhost:9000/profiles/U1 -H 'content-type: application/json' \
//!      -d '{"gender": "M", "transcript": "I love hiking and cooking"}'
//! curl 'localhost:9000/match_user/U1?looking_for_gender=F'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use std::sync::Arc;
//! use vibematch::prelude::*;
//!
//! let storage = StorageManager::in_memory();
//! let profiles = storage.profiles();
//! profiles.upsert_profile(UserProfile::new("U1", "M", "I love hiking and cooking").with_embedding(vec![1.0, 0.0])).unwrap();
//! profiles.upsert_profile(UserProfile::new("U2", "F", "I love hiking").with_embedding(vec![1.0, 0.0])).unwrap();
//!
//! let matcher = MatchOrchestrator::new(
//!     profiles,
//!     storage.match_log(),
//!     Arc::new(LexicalKeywordExtractor::new()),
//!     &MatchConfig::default(),
//! ).unwrap();
//!
//! let result = matcher.find_best_match(&"U1".into(), &"F".into()).unwrap().unwrap();
//! assert_eq!(result.matched_user_id.as_str(), "U2");
//! assert_eq!(result.matched_on, vec!["hiking"]);
//! ```
//!
//! ## Crate Structure
//!
//! - `vibematch-core` - matching engine (normalization, filtering, search, cooldown, reasons)
//! - `vibematch-storage` - in-memory and LMDB profile / match-log stores
//! - `vibematch-api` - REST API

// Re-export core types
pub use vibematch_core::{
    normalize, CandidateFilter, CandidatePool, CooldownTracker, EmbeddingProvider, Error, Gender,
    HashingEmbedder, KeywordExtractor, LexicalKeywordExtractor, MatchConfig, MatchLogStore,
    MatchOrchestrator, MatchOutcome, MatchReasonGenerator, MatchResult, NoMatchReason,
    NormalizedVector, ProfileStore, Result, SimilarityIndex, UserId, UserProfile, Vector,
};

// Re-export storage
pub use vibematch_storage::{LmdbStorage, MemoryStorage, StorageManager};

// Re-export API
pub use vibematch_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        normalize, EmbeddingProvider, Error, Gender, HashingEmbedder, KeywordExtractor,
        LexicalKeywordExtractor, MatchConfig, MatchLogStore, MatchOrchestrator, MatchResult,
        ProfileStore, Result, StorageManager, UserId, UserProfile, Vector,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use vibematch_core::simd::{dot_product_simd, norm_simd};
}
