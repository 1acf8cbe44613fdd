//! MNIST with one fixed pixel permutation applied to every image.
//!
//! Every image of the selected split is flattened, reordered through a single
//! shared [`Permutation`] and divided by 255, once, at construction. Stacking
//! several instances with different permutations gives the task sequence used
//! in continual-learning experiments (see [`PermutedTasks`]).
//!
//! [`PermutedTasks`]: crate::datasets::PermutedTasks

use std::fmt;
use std::path::Path;

use log::{debug, info};
use permnist_core::{permute_normalize, PermnistError, Permutation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::mnist::{MnistDataset, MnistSplit};
use super::source::LabeledImages;
use super::traits::Dataset;
use crate::config::PermutedMnistConfig;
use crate::samplers::random_sampler::sample_without_replacement;

/// A permuted, normalized copy of one MNIST split.
///
/// Items are `(image, label)` where `image` holds `rows * cols` values in
/// `[0, 1]` and `image[i]` is the original pixel at `permutation[i]`.
pub struct PermutedMnist {
    images: Vec<Vec<f32>>,
    labels: Vec<u8>,
    permutation: Permutation,
    inverse: Permutation,
    rows: usize,
    cols: usize,
    split: MnistSplit,
    rng: StdRng,
}

impl PermutedMnist {
    /// Loads (downloading if needed) one split from `root` and permutes it.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory caching the MNIST files.
    /// * `train` - `true` for the training split, `false` for the test split.
    /// * `permutation` - Permutation to apply; drawn uniformly at random when `None`.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::PermutationLengthMismatch` if the permutation
    /// does not have one entry per pixel, or any loading error.
    pub fn new(
        root: impl AsRef<Path>,
        train: bool,
        permutation: Option<Permutation>,
    ) -> Result<Self, PermnistError> {
        let mut config = PermutedMnistConfig::new(root.as_ref()).with_train(train);
        config.permutation = permutation;
        Self::from_config(&config)
    }

    /// Builds the dataset described by `config`.
    pub fn from_config(config: &PermutedMnistConfig) -> Result<Self, PermnistError> {
        config.validate()?;
        let base = MnistDataset::fetch(&config.root, config.split, config.download)?;
        Self::from_source(&base, config.permutation.clone(), config.seed)
    }

    /// Permutes the images of any base source.
    ///
    /// `seed` drives both the permutation draw (when `permutation` is `None`)
    /// and later calls to [`get_sample`](Self::get_sample); without it both
    /// come from OS entropy. An image whose pixel count differs from
    /// `image_dims()` fails with `PermnistError::ImageSizeMismatch`.
    pub fn from_source<S>(
        source: &S,
        permutation: Option<Permutation>,
        seed: Option<u64>,
    ) -> Result<Self, PermnistError>
    where
        S: LabeledImages + ?Sized,
    {
        let (rows, cols) = source.image_dims();
        let pixel_count = rows * cols;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let permutation = match permutation {
            Some(p) => {
                p.check_len(pixel_count)?;
                debug!("PermutedMnist: using supplied permutation of {} pixels", p.len());
                p
            }
            None => {
                debug!("PermutedMnist: drawing permutation of {} pixels", pixel_count);
                Permutation::random(pixel_count, &mut rng)
            }
        };

        let count = source.num_images();
        let mut images = Vec::with_capacity(count);
        let mut labels = Vec::with_capacity(count);
        for index in 0..count {
            let (pixels, label) = match (source.pixels(index), source.label(index)) {
                (Some(pixels), Some(label)) => (pixels, label),
                _ => return Err(PermnistError::IndexOutOfBounds { index, len: count }),
            };
            if pixels.len() != pixel_count {
                return Err(PermnistError::ImageSizeMismatch {
                    index,
                    expected: pixel_count,
                    actual: pixels.len(),
                });
            }
            images.push(permute_normalize::<f32>(pixels, &permutation)?);
            labels.push(label);
        }

        info!(
            "PermutedMnist: {} images from {} ({}x{}), {}",
            count,
            source.split().name(),
            rows,
            cols,
            if permutation.is_identity() { "identity permutation" } else { "permuted" }
        );

        let inverse = permutation.inverse();
        Ok(Self {
            images,
            labels,
            permutation,
            inverse,
            rows,
            cols,
            split: source.split(),
            rng,
        })
    }

    /// The permutation shared by every image.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn image_dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn split(&self) -> MnistSplit {
        self.split
    }

    /// Transformed image `index` without copying it.
    pub fn image(&self, index: usize) -> Option<&[f32]> {
        self.images.get(index).map(Vec::as_slice)
    }

    pub fn label(&self, index: usize) -> Option<u8> {
        self.labels.get(index).copied()
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Image `index` with the permutation undone: the original image scaled
    /// into `[0, 1]`.
    pub fn restore(&self, index: usize) -> Result<Vec<f32>, PermnistError> {
        let image = self.image(index).ok_or(PermnistError::IndexOutOfBounds {
            index,
            len: self.images.len(),
        })?;
        self.inverse.apply(image)
    }

    /// `sample_size` distinct transformed images chosen uniformly at random,
    /// using the dataset's own generator.
    ///
    /// # Errors
    ///
    /// Returns `PermnistError::SampleSizeTooLarge` if `sample_size > len()`.
    pub fn get_sample(&mut self, sample_size: usize) -> Result<Vec<Vec<f32>>, PermnistError> {
        let indices = sample_without_replacement(self.images.len(), sample_size, &mut self.rng)?;
        Ok(self.collect_images(&indices))
    }

    /// Same as [`get_sample`](Self::get_sample) with a caller-provided generator.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        sample_size: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<f32>>, PermnistError> {
        let indices = sample_without_replacement(self.images.len(), sample_size, rng)?;
        Ok(self.collect_images(&indices))
    }

    fn collect_images(&self, indices: &[usize]) -> Vec<Vec<f32>> {
        indices.iter().map(|&i| self.images[i].clone()).collect()
    }
}

impl Dataset for PermutedMnist {
    type Item = (Vec<f32>, u8);

    fn get(&self, index: usize) -> Result<Self::Item, PermnistError> {
        match (self.images.get(index), self.labels.get(index)) {
            (Some(image), Some(&label)) => Ok((image.clone(), label)),
            _ => Err(PermnistError::IndexOutOfBounds {
                index,
                len: self.images.len(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.images.len()
    }
}

impl fmt::Debug for PermutedMnist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermutedMnist")
            .field("split", &self.split)
            .field("len", &self.images.len())
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("identity", &self.permutation.is_identity())
            .finish()
    }
}

#[cfg(test)]
#[path = "permuted_mnist_test.rs"]
mod tests;
