use serde::{Deserialize, Serialize};

/// A dense term-weight vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
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
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// True when every component is zero (e.g. a query made only of unknown terms)
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|x| *x == 0.0)
    }

    /// Compute cosine similarity with another vector.
    /// Mismatched dimensions and zero vectors score 0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        // Two accumulators keep the dependency chain short
        let mut sum1 = 0.0f32;
        let mut sum2 = 0.0f32;
        let mut chunks_a = self.data.chunks_exact(2);
        let mut chunks_b = other.data.chunks_exact(2);
        for (a, b) in (&mut chunks_a).zip(&mut chunks_b) {
            sum1 += a[0] * b[0];
            sum2 += a[1] * b[1];
        }
        for (a, b) in chunks_a.remainder().iter().zip(chunks_b.remainder()) {
            sum1 += a * b;
        }
        let dot_product = sum1 + sum2;

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        // Rounding can push identical unit vectors a hair past 1
        (dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }

    /// Normalize the vector to unit length
    #[inline]
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > f32::EPSILON {
            let inv_norm = 1.0 / norm;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }
}
