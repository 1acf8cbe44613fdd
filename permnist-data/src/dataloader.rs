// dataloader.rs
//! # DataLoader
//!
//! Batches the items of any [`Dataset`] in the order produced by a
//! [`Sampler`].
//!
//! ## Basic usage
//!
//! ```rust
//! use permnist_data::dataloader::DataLoader;
//! use permnist_data::datasets::{InMemoryImages, PermutedMnist};
//! use permnist_data::samplers::SequentialSampler;
//!
//! let base = InMemoryImages::synthetic(6, 28, 28, 0);
//! let dataset = PermutedMnist::from_source(&base, None, Some(1)).unwrap();
//! let loader = DataLoader::new(dataset, 4, SequentialSampler::new(), false, None).unwrap();
//! for batch in loader {
//!     let batch = batch.expect("no error expected");
//!     println!("batch of {}", batch.len());
//! }
//! ```

use crate::datasets::Dataset;
use crate::samplers::{IndexIter, Sampler};
use permnist_core::PermnistError;

/// Custom collate function.
///
/// Receives the samples fetched for one batch and returns the batch handed
/// to the caller, e.g. after reordering or filtering.
pub type CollateFn<D> = Box<
    dyn Fn(Vec<<D as Dataset>::Item>) -> Result<Vec<<D as Dataset>::Item>, PermnistError>
        + Send
        + Sync,
>;

/// Generic loader for batching and sampling data.
///
/// # Type parameters
/// - `D`: the dataset type, implementing [`Dataset`].
/// - `S`: the sampler type, implementing [`Sampler`].
pub struct DataLoader<D: Dataset, S: Sampler> {
    /// The source dataset.
    pub dataset: D,
    /// Number of items per batch.
    pub batch_size: usize,
    /// Sampler generating the indices of one pass.
    pub sampler: S,
    /// If true, a trailing incomplete batch is dropped.
    pub drop_last: bool,
    /// Optional function assembling the samples of a batch.
    pub collate_fn: Option<CollateFn<D>>,
    indices_iter: IndexIter,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// # Errors
    ///
    /// * `PermnistError::InvalidConfig` if `batch_size` is zero.
    /// * Any error the sampler reports for this dataset length.
    pub fn new(
        dataset: D,
        batch_size: usize,
        sampler: S,
        drop_last: bool,
        collate_fn: Option<CollateFn<D>>,
    ) -> Result<Self, PermnistError> {
        if batch_size == 0 {
            return Err(PermnistError::InvalidConfig(
                "DataLoader batch_size must be at least 1".to_string(),
            ));
        }
        let indices_iter = sampler.iter(dataset.len())?;
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            collate_fn,
            indices_iter,
        })
    }

    /// Number of batches one pass yields.
    pub fn num_batches(&self) -> usize {
        let total = self.sampler.len(self.dataset.len());
        if self.drop_last {
            total / self.batch_size
        } else {
            total.div_ceil(self.batch_size)
        }
    }

    /// Starts a new pass over the dataset with fresh sampler indices.
    pub fn reset(&mut self) -> Result<(), PermnistError> {
        self.indices_iter = self.sampler.iter(self.dataset.len())?;
        Ok(())
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Vec<<D as Dataset>::Item>, PermnistError>;

    /// Returns the next batch.
    ///
    /// - `Some(Ok(batch))`: a batch ready to use.
    /// - `Some(Err(e))`: an item could not be fetched.
    /// - `None`: the pass is over.
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.batch_size);
        for idx in self.indices_iter.by_ref().take(self.batch_size) {
            match self.dataset.get(idx) {
                Ok(item) => batch.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        match self.collate_fn {
            Some(ref collate_fn) => Some(collate_fn(batch)),
            None => Some(Ok(batch)),
        }
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
