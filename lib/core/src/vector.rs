use serde::{Deserialize, Serialize};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self { data: vec![0.0; dim] }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// True when every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> f32 {
        crate::simd::norm_simd(&self.data)
    }

    /// Inner product. Vectors of different dimension score 0.0.
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        crate::simd::dot_product_simd(&self.data, &other.data)
    }

    /// Scale to unit length in place.
    /// A zero vector is left untouched.
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }

    /// Get normalized copy
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// Unit-length view of an embedding, used for inner-product search.
///
/// Holds the input unchanged when its norm was zero, so a zero embedding
/// scores 0.0 against everything instead of producing NaNs.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedVector(Vector);

impl NormalizedVector {
    #[inline]
    pub fn as_vector(&self) -> &Vector {
        &self.0
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.0.as_slice()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    /// Inner product, which equals cosine similarity for two unit vectors
    #[inline]
    pub fn inner_product(&self, other: &NormalizedVector) -> f32 {
        self.0.dot(&other.0)
    }
}

/// Normalize an embedding under the Euclidean norm.
#[inline]
pub fn normalize(vector: &Vector) -> NormalizedVector {
    NormalizedVector(vector.normalized())
}
