//! Flat inner-product index
//!
//! Exhaustive search over a contiguous row-major buffer of unit vectors.
//! Built per request from the current [`CandidatePool`] and dropped with it,
//! so there is nothing to invalidate when profiles change.

use rayon::prelude::*;
use std::cmp::Ordering;
use crate::filter::{Candidate, CandidatePool};
use crate::vector::NormalizedVector;
use crate::{Error, Result};

/// Pools at least this large are scored on the rayon pool
const PARALLEL_SEARCH_THRESHOLD: usize = 4096;

/// Best match for a query
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub candidate: &'a Candidate,
    pub score: f32,
}

/// Inner-product index over a candidate pool
#[derive(Debug)]
pub struct SimilarityIndex {
    dim: usize,
    data: Vec<f32>,
    candidates: Vec<Candidate>,
}

impl SimilarityIndex {
    /// Build an index over the pool. Returns `None` for an empty pool.
    ///
    /// Every vector must share the dimension of the first candidate.
    pub fn build(pool: CandidatePool) -> Result<Option<Self>> {
        let candidates = pool.into_inner();
        let Some(first) = candidates.first() else {
            return Ok(None);
        };
        let dim = first.vector.dim();

        let mut data = Vec::with_capacity(dim * candidates.len());
        for candidate in &candidates {
            if candidate.vector.dim() != dim {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: candidate.vector.dim(),
                });
            }
            data.extend_from_slice(candidate.vector.as_slice());
        }

        Ok(Some(Self { dim, data, candidates }))
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Single best candidate by inner product with `query`.
    ///
    /// Equal scores go to the smallest user id. NaN scores never win; if no
    /// row produces a comparable score the result is `None`.
    pub fn search(&self, query: &NormalizedVector) -> Result<Option<Neighbor<'_>>> {
        if query.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: query.dim(),
            });
        }
        let q = query.as_slice();

        let score_row = |row: usize| -> (usize, f32) {
            let start = row * self.dim;
            let v = &self.data[start..start + self.dim];
            (row, crate::simd::dot_product_simd(q, v))
        };
        let pick = |a: Option<(usize, f32)>, b: Option<(usize, f32)>| match (a, b) {
            (Some(a), Some(b)) => Some(if self.better(b, a) { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        };
        let comparable = |(row, score): (usize, f32)| (!score.is_nan()).then_some((row, score));

        let best = if self.len() >= PARALLEL_SEARCH_THRESHOLD {
            (0..self.len())
                .into_par_iter()
                .map(|row| comparable(score_row(row)))
                .reduce(|| None, pick)
        } else {
            (0..self.len())
                .map(|row| comparable(score_row(row)))
                .fold(None, pick)
        };

        Ok(best.map(|(row, score)| Neighbor {
            candidate: &self.candidates[row],
            score,
        }))
    }

    /// True when `a` ranks strictly ahead of `b`
    fn better(&self, a: (usize, f32), b: (usize, f32)) -> bool {
        match a.1.partial_cmp(&b.1) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) => false,
            _ => self.candidates[a.0].user_id < self.candidates[b.0].user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::normalize;
    use crate::Vector;
    use std::collections::BTreeSet;

    fn candidate(id: &str, v: Vec<f32>) -> Candidate {
        Candidate {
            user_id: id.into(),
            vector: normalize(&Vector::new(v)),
            transcript: String::new(),
            keywords: BTreeSet::new(),
        }
    }

    fn query(v: Vec<f32>) -> NormalizedVector {
        normalize(&Vector::new(v))
    }

    #[test]
    fn test_empty_pool_builds_nothing() {
        assert!(SimilarityIndex::build(CandidatePool::default()).unwrap().is_none());
    }

    #[test]
    fn test_single_candidate_always_returned() {
        let q = query(vec![0.3, -0.9]);
        let c = candidate("U2", vec![-1.0, 0.2]);
        let expected = q.inner_product(&c.vector);

        let index = SimilarityIndex::build(CandidatePool::new(vec![c])).unwrap().unwrap();
        let hit = index.search(&q).unwrap().unwrap();
        assert_eq!(hit.candidate.user_id.as_str(), "U2");
        assert!((hit.score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_picks_highest_inner_product() {
        let pool = CandidatePool::new(vec![
            candidate("U3", vec![0.0, 1.0]),
            candidate("U2", vec![1.0, 0.0]),
            candidate("U4", vec![1.0, 1.0]),
        ]);
        let index = SimilarityIndex::build(pool).unwrap().unwrap();
        let hit = index.search(&query(vec![1.0, 0.0])).unwrap().unwrap();
        assert_eq!(hit.candidate.user_id.as_str(), "U2");
        assert!((hit.score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ties_go_to_smallest_id() {
        let pool = CandidatePool::new(vec![
            candidate("U9", vec![2.0, 0.0]),
            candidate("U5", vec![1.0, 0.0]),
            candidate("U7", vec![5.0, 0.0]),
        ]);
        let index = SimilarityIndex::build(pool).unwrap().unwrap();
        let hit = index.search(&query(vec![1.0, 0.0])).unwrap().unwrap();
        assert_eq!(hit.candidate.user_id.as_str(), "U5");
    }

    #[test]
    fn test_zero_query_scores_zero() {
        let pool = CandidatePool::new(vec![
            candidate("U2", vec![1.0, 0.0]),
            candidate("U1", vec![0.0, 1.0]),
        ]);
        let index = SimilarityIndex::build(pool).unwrap().unwrap();
        let hit = index.search(&query(vec![0.0, 0.0])).unwrap().unwrap();
        assert_eq!(hit.score, 0.0);
        assert_eq!(hit.candidate.user_id.as_str(), "U1");
    }

    #[test]
    fn test_nan_rows_yield_no_neighbour() {
        let pool = CandidatePool::new(vec![candidate("U2", vec![f32::NAN, 0.0])]);
        let index = SimilarityIndex::build(pool).unwrap().unwrap();
        assert!(index.search(&query(vec![1.0, 0.0])).unwrap().is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let pool = CandidatePool::new(vec![
            candidate("U2", vec![1.0, 0.0]),
            candidate("U3", vec![1.0, 0.0, 0.0]),
        ]);
        assert!(matches!(
            SimilarityIndex::build(pool),
            Err(Error::InvalidDimension { expected: 2, actual: 3 })
        ));

        let index = SimilarityIndex::build(CandidatePool::new(vec![candidate("U2", vec![1.0, 0.0])]))
            .unwrap()
            .unwrap();
        assert!(index.search(&query(vec![1.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn test_parallel_search_matches_sequential_policy() {
        let n = PARALLEL_SEARCH_THRESHOLD + 10;
        let mut candidates: Vec<Candidate> = (0..n)
            .map(|i| candidate(&format!("c{:05}", i), vec![1.0, 0.5 * i as f32 / n as f32]))
            .collect();
        candidates.push(candidate("a-dup", vec![0.0, 1.0]));
        candidates.push(candidate("z-dup", vec![0.0, 1.0]));

        let index = SimilarityIndex::build(CandidatePool::new(candidates)).unwrap().unwrap();
        let hit = index.search(&query(vec![0.0, 1.0])).unwrap().unwrap();
        assert_eq!(hit.candidate.user_id.as_str(), "a-dup");
    }
}
