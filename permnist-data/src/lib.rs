//! # permnist-data
//!
//! Permuted MNIST for continual-learning experiments.
//!
//! This crate provides:
//! - [`PermutedMnist`]: one MNIST split with a fixed pixel permutation applied
//!   to every image and intensities scaled into `[0, 1]`
//! - [`PermutedTasks`]: a reproducible sequence of permutations, one per task
//! - [`MnistDataset`]: the raw IDX loader (plain or `.gz`, optional download)
//! - [`Dataset`], [`Sampler`] and [`DataLoader`] for indexed access and batching

pub mod config;
pub mod dataloader;
pub mod datasets;
pub mod download;
pub mod samplers;

pub use config::PermutedMnistConfig;
pub use dataloader::DataLoader;
pub use datasets::{
    Dataset, InMemoryImages, LabeledImages, MnistDataset, MnistSplit, PermutedMnist, PermutedTasks,
};
pub use permnist_core::{PermnistError, Permutation};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
