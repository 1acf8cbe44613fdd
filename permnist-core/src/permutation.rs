// src/permutation.rs

use crate::error::PermnistError;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A fixed reordering of pixel positions.
///
/// Entry `i` holds the source position of output pixel `i`, so applying the
/// permutation to a flattened image produces `out[i] = src[p[i]]`.
/// A `Permutation` is always a bijection over `0..len`: every position
/// appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    /// Creates a permutation from explicit indices.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::InvalidPermutation` if an entry is out of range
    /// or appears more than once.
    pub fn new(indices: Vec<usize>) -> Result<Self, PermnistError> {
        let len = indices.len();
        let mut seen = vec![false; len];
        for (index, &value) in indices.iter().enumerate() {
            if value >= len {
                return Err(PermnistError::InvalidPermutation {
                    index,
                    len,
                    reason: format!("points at {value}, which is out of range"),
                });
            }
            if seen[value] {
                return Err(PermnistError::InvalidPermutation {
                    index,
                    len,
                    reason: format!("repeats position {value}"),
                });
            }
            seen[value] = true;
        }
        Ok(Self { indices })
    }

    /// The permutation that leaves every position in place.
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Draws a permutation of `len` positions uniformly at random.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(rng);
        Self { indices }
    }

    /// Draws a permutation reproducibly from `seed`.
    pub fn seeded(len: usize, seed: u64) -> Self {
        debug!("Permutation: drawing {} positions from seed {}", len, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(len, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.indices
    }

    pub fn is_identity(&self) -> bool {
        self.indices.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// Fails unless the permutation covers exactly `expected` positions.
    pub fn check_len(&self, expected: usize) -> Result<(), PermnistError> {
        if self.indices.len() != expected {
            return Err(PermnistError::PermutationLengthMismatch {
                expected,
                actual: self.indices.len(),
            });
        }
        Ok(())
    }

    /// Returns the permutation `q` such that applying `self` then `q`
    /// gives back the original order.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.indices.len()];
        for (i, &p) in self.indices.iter().enumerate() {
            inverse[p] = i;
        }
        Self { indices: inverse }
    }

    /// The permutation equivalent to applying `self` and then `next`.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::PermutationLengthMismatch` if the lengths differ.
    pub fn then(&self, next: &Permutation) -> Result<Self, PermnistError> {
        next.check_len(self.len())?;
        let indices = next.indices.iter().map(|&q| self.indices[q]).collect();
        Ok(Self { indices })
    }

    /// Reorders `src` so that `out[i] = src[self[i]]`.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::PermutationLengthMismatch` if `src` does not
    /// have one element per position.
    pub fn apply<T: Copy>(&self, src: &[T]) -> Result<Vec<T>, PermnistError> {
        self.check_len(src.len())?;
        Ok(self.indices.iter().map(|&p| src[p]).collect())
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermnistError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        Permutation::new(indices)
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.indices
    }
}

#[cfg(test)]
#[path = "permutation_test.rs"]
mod tests;
