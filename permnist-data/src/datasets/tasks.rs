// permnist-data/src/datasets/tasks.rs

use super::permuted_mnist::PermutedMnist;
use super::source::LabeledImages;
use log::debug;
use permnist_core::{PermnistError, Permutation};

/// A sequence of permuted-MNIST tasks for continual learning.
///
/// Task `t` draws its permutation from `seed + t`, so a sequence is fully
/// determined by `(num_tasks, pixel_count, seed)` and growing the sequence
/// leaves the existing tasks unchanged. Train and test splits of the same
/// task must be built from the same `PermutedTasks` to share a permutation.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutedTasks {
    permutations: Vec<Permutation>,
    seed: u64,
}

impl PermutedTasks {
    pub fn new(num_tasks: usize, pixel_count: usize, seed: u64) -> Self {
        let permutations = (0..num_tasks)
            .map(|task| Permutation::seeded(pixel_count, seed.wrapping_add(task as u64)))
            .collect();
        debug!(
            "PermutedTasks: {} tasks over {} pixels from seed {}",
            num_tasks, pixel_count, seed
        );
        Self { permutations, seed }
    }

    /// Makes task 0 the unpermuted base dataset when `identity_first` is set.
    pub fn with_identity_first(mut self, identity_first: bool) -> Self {
        if let Some(first) = self.permutations.first_mut() {
            *first = if identity_first {
                Permutation::identity(first.len())
            } else {
                Permutation::seeded(first.len(), self.seed)
            };
        }
        self
    }

    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    pub fn permutation(&self, task: usize) -> Option<&Permutation> {
        self.permutations.get(task)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Permutation> {
        self.permutations.iter()
    }

    /// Builds the dataset for `task` from `source`.
    ///
    /// `sample_seed` seeds the dataset's sampling generator.
    ///
    /// # Errors
    ///
    /// * `PermnistError::IndexOutOfBounds` if `task` is not in the sequence.
    /// * `PermnistError::PermutationLengthMismatch` if the source images do
    ///   not have the pixel count the sequence was generated for.
    pub fn build<S>(
        &self,
        task: usize,
        source: &S,
        sample_seed: Option<u64>,
    ) -> Result<PermutedMnist, PermnistError>
    where
        S: LabeledImages + ?Sized,
    {
        let permutation = self
            .permutation(task)
            .ok_or(PermnistError::IndexOutOfBounds {
                index: task,
                len: self.len(),
            })?
            .clone();
        PermutedMnist::from_source(source, Some(permutation), sample_seed)
    }
}

impl<'a> IntoIterator for &'a PermutedTasks {
    type Item = &'a Permutation;
    type IntoIter = std::slice::Iter<'a, Permutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.permutations.iter()
    }
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
