//! # vibematch Core
//!
//! Core matching engine for vibematch.
//!
//! Given a requester and the profiles of the gender they are looking for, the
//! engine picks the single most similar counterpart by cosine similarity over
//! transcript embeddings:
//!
//! - [`normalize`] - Unit-length vectors, so inner product is cosine similarity
//! - [`CooldownTracker`] - Directional match log with a repeat-match window
//! - [`CandidateFilter`] - Drops candidates without embeddings, self, and pairs in cooldown
//! - [`SimilarityIndex`] - Per-request flat inner-product index and best-match search
//! - [`MatchReasonGenerator`] - "You both share an interest in ..." from shared keywords
//! - [`MatchOrchestrator`] - The end-to-end pipeline
//!
//! Profiles and the match log are reached through the [`ProfileStore`] and
//! [`MatchLogStore`] traits; `vibematch-storage` provides in-memory and LMDB
//! implementations.
//!
//! ## Example
//!
//! ```rust
//! use vibematch_core::{normalize, CandidatePool, SimilarityIndex, Vector};
//!
//! let query = normalize(&Vector::new(vec![3.0, 4.0]));
//! assert!((query.as_vector().norm() - 1.0).abs() < 1e-6);
//!
//! // An empty pool has no index
//! assert!(SimilarityIndex::build(CandidatePool::default()).unwrap().is_none());
//! ```

pub mod config;
pub mod cooldown;
pub mod embedder;
pub mod error;
pub mod filter;
pub mod index;
pub mod keywords;
pub mod matcher;
pub mod profile;
pub mod reason;
pub mod store;
pub mod vector;

/// SIMD-optimized vector operations
///
/// AVX2/FMA on x86_64 with a scalar fallback everywhere else.
pub mod simd;

pub use config::MatchConfig;
pub use cooldown::CooldownTracker;
pub use embedder::{EmbeddingProvider, HashingEmbedder, DEFAULT_EMBEDDING_DIM};
pub use error::{Error, NoMatchReason, Result};
pub use filter::{Candidate, CandidateFilter, CandidatePool};
pub use index::{Neighbor, SimilarityIndex};
pub use keywords::{KeywordExtractor, LexicalKeywordExtractor};
pub use matcher::{MatchOrchestrator, MatchOutcome};
pub use profile::{Gender, MatchResult, UserId, UserProfile};
pub use reason::{MatchExplanation, MatchReasonGenerator, DEFAULT_REASON_STOP_WORDS, FALLBACK_REASON};
pub use store::{MatchLogStore, ProfileStore};
pub use vector::{normalize, NormalizedVector, Vector};
