// permnist-data/src/samplers/random_sampler.rs

use super::traits::{IndexIter, Sampler};
use permnist_core::PermnistError;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// A sampler that randomly samples indices from a dataset.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    seed: Option<u64>,
}

impl RandomSampler {
    /// Creates a new `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The total number of samples to draw. If `None`, it defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            seed: None,
        }
    }

    /// Makes every call to `iter` draw the same sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Result<IndexIter, PermnistError> {
        let actual_num_samples = self.num_samples.unwrap_or(dataset_len);
        if actual_num_samples == 0 {
            return Ok(Box::new(std::iter::empty()));
        }

        let mut rng = self.rng();
        if self.replacement {
            if dataset_len == 0 {
                return Err(PermnistError::SampleSizeTooLarge {
                    requested: actual_num_samples,
                    available: 0,
                });
            }
            let indices: Vec<usize> = (0..actual_num_samples)
                .map(|_| rng.gen_range(0..dataset_len))
                .collect();
            Ok(Box::new(indices.into_iter()))
        } else {
            let indices = sample_without_replacement(dataset_len, actual_num_samples, &mut rng)?;
            Ok(Box::new(indices.into_iter()))
        }
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

/// Draws `amount` distinct indices from `0..len`, uniformly at random.
///
/// # Errors
///
/// Returns `PermnistError::SampleSizeTooLarge` if `amount > len`.
pub fn sample_without_replacement<R: Rng + ?Sized>(
    len: usize,
    amount: usize,
    rng: &mut R,
) -> Result<Vec<usize>, PermnistError> {
    if amount > len {
        return Err(PermnistError::SampleSizeTooLarge {
            requested: amount,
            available: len,
        });
    }
    Ok(index::sample(rng, len, amount).into_vec())
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
