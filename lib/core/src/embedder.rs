//! Transcript embedding
//!
//! Matching only needs a fixed-dimension vector per transcript. Production
//! deployments plug a sentence-embedding model in behind [`EmbeddingProvider`];
//! [`HashingEmbedder`] is a dependency-free fallback.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use crate::Vector;

/// Default output dimension, same as all-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Turns a transcript into a fixed-dimension vector.
/// Blank text must produce a zero vector of length [`dim`](Self::dim).
pub trait EmbeddingProvider: Send + Sync {
    fn dim(&self) -> usize;

    fn embed(&self, text: &str) -> Vector;
}

/// Feature-hashing embedder over words and character trigrams
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vector {
        let mut data = vec![0.0f32; self.dim];
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return Vector::new(data);
        }

        for word in normalized.split_whitespace() {
            // Words contribute more than trigrams
            data[self.bucket(word)] += 2.0;

            let chars: Vec<char> = format!(" {} ", word).chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                data[self.bucket(&trigram)] += 1.0;
            }
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }
}
