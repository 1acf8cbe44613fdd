// permnist-data/src/samplers/traits.rs

use permnist_core::PermnistError;
use std::fmt::Debug;

/// Boxed iterator over dataset indices.
pub type IndexIter = Box<dyn Iterator<Item = usize> + Send + Sync>;

/// A Sampler trait that defines how to iterate over indices of a dataset.
///
/// Samplers are used by `DataLoader` to generate a sequence of indices
/// to fetch data from a `Dataset`.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler cannot produce the indices it was
    /// configured for, e.g. more distinct indices than `dataset_len`.
    fn iter(&self, dataset_len: usize) -> Result<IndexIter, PermnistError>;

    /// Returns the total number of samples that will be yielded by the iterator.
    fn len(&self, dataset_len: usize) -> usize;
}
